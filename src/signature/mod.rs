//! Textbook (unpadded) RSA signatures over a fixed key pair.
//!
//! Messages are text encoded as the little-endian integer of their UTF-8
//! bytes. Both directions reject values outside `[0, n)` instead of letting
//! them wrap modulo `n`.
use crate::utils::{bytes_to_integer, hex_to_integer, integer_to_bytes, integer_to_hex};
use rug::Integer;
use std::fmt;
use std::string::FromUtf8Error;

pub mod keys;

quick_error! {
    #[derive(Debug)]
    pub enum SignatureError {
        MessageOutOfRange {
            display("encoded message is not below the modulus")
        }
        SignatureOutOfRange {
            display("signature is not below the modulus")
        }
        NotReversible {
            display("message ends in a NUL byte and would not decode back")
        }
        InvalidHex {}
        InvalidKeyPair {}
        InvalidUtf8(err: FromUtf8Error) {
            from()
        }
        IntegerError(err: Integer) {
            from()
        }
    }
}

pub fn encode_message(message: &str) -> Result<Integer, SignatureError> {
    let bytes = message.as_bytes();
    if bytes.last() == Some(&0) {
        return Err(SignatureError::NotReversible);
    }
    Ok(bytes_to_integer(bytes))
}

pub fn decode_message(value: &Integer) -> Result<String, SignatureError> {
    Ok(String::from_utf8(integer_to_bytes(value))?)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub n: Integer,
    pub e: Integer,
}

impl PublicKey {
    fn in_range(&self, value: &Integer) -> bool {
        *value >= 0 && *value < self.n
    }

    /// Encodes `message` and checks that it fits below the modulus.
    pub fn encode(&self, message: &str) -> Result<Integer, SignatureError> {
        let value = encode_message(message)?;
        if !self.in_range(&value) {
            return Err(SignatureError::MessageOutOfRange);
        }
        Ok(value)
    }

    pub fn raise_to_e(&self, value: &Integer) -> Result<Integer, SignatureError> {
        if !self.in_range(value) {
            return Err(SignatureError::SignatureOutOfRange);
        }
        Ok(value.clone().pow_mod(&self.e, &self.n)?)
    }

    pub fn verify(&self, signature: &Signature) -> Result<String, SignatureError> {
        decode_message(&self.raise_to_e(signature.as_integer())?)
    }

    pub fn verify_hex(&self, signature_hex: &str) -> Result<String, SignatureError> {
        self.verify(&Signature::from_hex(signature_hex)?)
    }

    /// Whether `signature` is the signature of `message` under this key.
    pub fn is_signature_of(&self, signature: &Signature, message: &str) -> Result<bool, SignatureError> {
        Ok(self.raise_to_e(signature.as_integer())? == self.encode(message)?)
    }
}

#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    d: Integer,
}

impl KeyPair {
    pub fn new(n: Integer, e: Integer, d: Integer) -> Result<KeyPair, SignatureError> {
        if n <= 2 || e <= 1 || d <= 1 || e >= n || d >= n {
            return Err(SignatureError::InvalidKeyPair);
        }
        for witness in &[2u32, 3, 0x5eed] {
            let x = Integer::from(*witness) % &n;
            if x.clone().pow_mod(&e, &n)?.pow_mod(&d, &n)? != x {
                return Err(SignatureError::InvalidKeyPair);
            }
        }
        Ok(KeyPair {
            public: PublicKey { n, e },
            d,
        })
    }

    pub fn from_hex(n: &str, e: &str, d: &str) -> Result<KeyPair, SignatureError> {
        let parse = |hex: &str| hex_to_integer(hex).ok_or(SignatureError::InvalidHex);
        KeyPair::new(parse(n)?, parse(e)?, parse(d)?)
    }

    /// The fixed 1024-bit pair from [`keys`].
    pub fn demo() -> Result<KeyPair, SignatureError> {
        KeyPair::from_hex(
            keys::DEMO_MODULUS,
            keys::DEMO_PUBLIC_EXPONENT,
            keys::DEMO_PRIVATE_EXPONENT,
        )
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("n", &self.public.n)
            .field("e", &self.public.e)
            .field("d", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(Integer);

impl Signature {
    pub fn from_integer(value: Integer) -> Signature {
        Signature(value)
    }

    pub fn from_hex(hex: &str) -> Result<Signature, SignatureError> {
        hex_to_integer(hex)
            .map(Signature)
            .ok_or(SignatureError::InvalidHex)
    }

    /// Lowercase hex without leading zeros.
    pub fn to_hex(&self) -> String {
        integer_to_hex(&self.0)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The server side of the scheme. Stateless apart from the key pair, so one
/// signer can serve any number of callers.
#[derive(Clone, Debug)]
pub struct Signer {
    key_pair: KeyPair,
}

impl Signer {
    pub fn new(key_pair: KeyPair) -> Signer {
        Signer { key_pair }
    }

    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    pub fn raise_to_d(&self, value: &Integer) -> Result<Integer, SignatureError> {
        let public = self.public_key();
        if !public.in_range(value) {
            return Err(SignatureError::MessageOutOfRange);
        }
        Ok(value.clone().pow_mod(&self.key_pair.d, &public.n)?)
    }

    pub fn sign(&self, message: &str) -> Result<Signature, SignatureError> {
        let value = self.public_key().encode(message)?;
        Ok(Signature(self.raise_to_d(&value)?))
    }

    pub fn verify(&self, signature_hex: &str) -> Result<String, SignatureError> {
        self.public_key().verify_hex(signature_hex)
    }
}

#[cfg(test)]
mod test {
    use super::{encode_message, KeyPair, Signature, SignatureError, Signer};
    use rug::Integer;

    // Signature of "No true Scotsman" under the demo key.
    const SCOTSMAN_SIGNATURE: &str = "1bac7ef2b36fa8afff4097e4c5f6670ce5e6cc4b291fe5f98642273cb354b7b0\
422d3b5dc3e01c975820296f4e4678f8f16d8fdcaf7ed4e89d3adad272a07eda\
bba44c89c1c7d8152987c736d0c05db4b051f3bf060055b49fadb0ee122de4f6\
9aa9d423c6ad86d9315f8db3908bd97a6267c3f22b6ecaa66fe4ebe0f36c21e6";

    fn signer() -> Signer {
        Signer::new(KeyPair::demo().unwrap())
    }

    #[test]
    fn test_known_signature() {
        let signer = signer();
        let signature = signer.sign("No true Scotsman").unwrap();
        assert_eq!(signature.to_hex(), SCOTSMAN_SIGNATURE);
        assert_eq!(signer.verify(SCOTSMAN_SIGNATURE).unwrap(), "No true Scotsman");
        assert!(signer
            .public_key()
            .is_signature_of(&signature, "No true Scotsman")
            .unwrap());
        assert!(!signer
            .public_key()
            .is_signature_of(&signature, "No true Scotswoman")
            .unwrap());
    }

    #[test]
    fn test_encoding_is_little_endian() {
        assert_eq!(encode_message("ab").unwrap(), Integer::from(0x6261));
        assert_eq!(encode_message("").unwrap(), Integer::from(0));
    }

    #[test]
    fn test_empty_message() {
        let signer = signer();
        let signature = signer.sign("").unwrap();
        assert_eq!(signature.to_hex(), "0");
        assert_eq!(signer.public_key().verify(&signature).unwrap(), "");
    }

    #[test]
    fn test_oversized_message_rejected() {
        let signer = signer();
        // 129 bytes is above any 1024-bit modulus.
        let message = "\u{7f}".repeat(129);
        match signer.sign(&message) {
            Err(SignatureError::MessageOutOfRange) => {}
            other => panic!("unexpected {:?}", other),
        }
        let too_big = Signature::from_integer(signer.public_key().n.clone());
        match signer.public_key().verify(&too_big) {
            Err(SignatureError::SignatureOutOfRange) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_trailing_nul_rejected() {
        match signer().sign("abc\u{0}") {
            Err(SignatureError::NotReversible) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_hex_rejected() {
        let signer = signer();
        assert!(signer.verify("not hex").is_err());
        assert!(signer.verify("").is_err());
    }

    #[test]
    fn test_inconsistent_key_pair_rejected() {
        let demo = KeyPair::demo().unwrap();
        let public = demo.public_key().clone();
        let wrong_d = Integer::from(&public.e + 2);
        assert!(KeyPair::new(public.n.clone(), public.e.clone(), wrong_d).is_err());
        assert!(KeyPair::new(Integer::from(2), Integer::from(3), Integer::from(3)).is_err());
        assert!(KeyPair::from_hex("zz", "3", "3").is_err());
        // 3 * 11 = 33, e * d = 3 * 7 = 21 = 1 mod lcm(2, 10).
        KeyPair::new(Integer::from(33), Integer::from(3), Integer::from(7)).unwrap();
    }

    #[test]
    fn test_debug_redacts_private_exponent() {
        let demo = KeyPair::demo().unwrap();
        let printed = format!("{:?}", demo);
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains(&demo.d.to_string()));
    }

    #[test]
    fn test_signer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signer>();
    }
}
