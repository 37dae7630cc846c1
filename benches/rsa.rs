use blind_set::protocols::blind::{blind_sign, Protocol};
use blind_set::signature::{KeyPair, Signer};
use criterion::{criterion_group, criterion_main, Criterion};
use rug::rand::RandState;
use rug::Integer;

pub fn criterion_benchmark(c: &mut Criterion) {
    let signer = Signer::new(KeyPair::demo().unwrap());
    let protocol = Protocol::from_public_key(signer.public_key());
    let mut rng = RandState::new();
    rng.seed(&Integer::from(13));
    let message = "No true Scotsman";
    let signature = signer.sign(message).unwrap().to_hex();

    c.bench_function("RSA sign", |b| {
        b.iter(|| signer.sign(message).unwrap())
    });

    c.bench_function("RSA verify", |b| {
        b.iter(|| signer.verify(&signature).unwrap())
    });

    c.bench_function("blind round trip", |b| {
        b.iter(|| {
            let (context, blinded) = protocol.prepare(message, &mut rng).unwrap();
            let blind_signature = blind_sign(&signer, &blinded).unwrap();
            protocol.unblind(&blind_signature, &context).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
