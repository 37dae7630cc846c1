//! Merlin transcripts over the query exchange.
//!
//! Both parties absorb the blinded message and the blind signature in the
//! same order, so a challenge squeezed afterwards binds the two views of one
//! query together.
use crate::utils::integer_to_bytes;
use merlin::Transcript;
use rug::integer::Order;
use rug::Integer;

pub mod query;

pub use query::TranscriptProtocolQuery;

quick_error! {
    #[derive(Debug)]
    pub enum TranscriptChannelError {
        Incomplete {}
    }
}

pub trait TranscriptProtocolChallenge {
    fn challenge_scalar(&mut self, label: &'static [u8], length_in_bits: u16) -> Integer;
}

pub trait TranscriptProtocolInteger {
    fn append_integer_scalar(&mut self, label: &'static [u8], scalar: &Integer);
}

impl TranscriptProtocolInteger for Transcript {
    fn append_integer_scalar(&mut self, label: &'static [u8], scalar: &Integer) {
        self.append_message(label, &integer_to_bytes(scalar));
    }
}

impl TranscriptProtocolChallenge for Transcript {
    fn challenge_scalar(&mut self, label: &'static [u8], length_in_bits: u16) -> Integer {
        let mut buf = vec![0u8; (length_in_bits / 8) as usize];
        self.challenge_bytes(label, &mut buf);
        Integer::from_digits(&buf[..], Order::MsfBe)
    }
}

#[cfg(test)]
mod test {
    use super::{TranscriptProtocolChallenge, TranscriptProtocolInteger};
    use merlin::Transcript;
    use rug::Integer;

    #[test]
    fn test_challenge_depends_on_appended_scalars() {
        let mut first = Transcript::new(b"test");
        let mut second = Transcript::new(b"test");
        first.append_integer_scalar(b"x", &Integer::from(5));
        second.append_integer_scalar(b"x", &Integer::from(5));
        let c1 = first.challenge_scalar(b"c", 128);
        assert_eq!(c1, second.challenge_scalar(b"c", 128));
        assert!(c1.significant_bits() <= 128);

        let mut third = Transcript::new(b"test");
        third.append_integer_scalar(b"x", &Integer::from(6));
        assert_ne!(c1, third.challenge_scalar(b"c", 128));
    }
}
