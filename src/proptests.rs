//! Property-based tests across modules:
//!
//! - Blind signing followed by unblinding gives exactly the direct signature
//! - Signatures verify back to the signed text
//! - The filter never forgets an inserted value

use proptest::prelude::*;
use rug::rand::RandState;
use rug::Integer;

use crate::filter::MembershipFilter;
use crate::protocols::blind::{blind_sign, Protocol};
use crate::signature::{KeyPair, Signer};

fn demo_signer() -> Signer {
    Signer::new(KeyPair::demo().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Up to 30 non-control characters stay below the 1024-bit modulus.
    #[test]
    fn unblinded_signature_matches_direct_signature(
        message in "\\PC{0,30}",
        seed in any::<u64>(),
    ) {
        let signer = demo_signer();
        let protocol = Protocol::from_public_key(signer.public_key());
        let mut rng = RandState::new();
        rng.seed(&Integer::from(seed));

        let (context, blinded) = protocol.prepare(&message, &mut rng).unwrap();
        let blind_signature = blind_sign(&signer, &blinded).unwrap();
        let unblinded = protocol.unblind(&blind_signature, &context).unwrap();
        prop_assert_eq!(unblinded, signer.sign(&message).unwrap());
    }
}

proptest! {
    #[test]
    fn signature_verifies_to_message(message in "[ -~]{0,100}") {
        let signer = demo_signer();
        let signature = signer.sign(&message).unwrap();
        prop_assert_eq!(signer.verify(&signature.to_hex()).unwrap(), message);
    }

    #[test]
    fn filter_has_no_false_negatives(
        values in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 1..50),
        num_buckets in 1usize..2000,
    ) {
        let mut filter = MembershipFilter::build(num_buckets).unwrap();
        for value in &values {
            filter.insert(value);
        }
        for value in &values {
            prop_assert!(filter.contains(value));
        }
        prop_assert_eq!(filter.inserted(), values.len());
    }
}
