//! Blind RSA signatures.
//!
//! The client multiplies its encoded message by `r^e`, the server raises the
//! product to `d` exactly as it would sign in the clear, and the client
//! divides the answer by `r`:
//! `(m r^e)^d r^-1 = m^d r r^-1 = m^d (mod n)`.
//! The server only ever sees `m r^e`, which is uniform over the units for a
//! uniform `r`.
use crate::{
    protocols::QueryError,
    signature::{PublicKey, Signature, SignatureError, Signer},
    utils::random_between,
};
use rug::rand::MutRandState;
use rug::Integer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlindedMessage(Integer);

impl BlindedMessage {
    pub fn from_integer(value: Integer) -> BlindedMessage {
        BlindedMessage(value)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlindSignature(Integer);

impl BlindSignature {
    pub fn from_integer(value: Integer) -> BlindSignature {
        BlindSignature(value)
    }

    pub fn as_integer(&self) -> &Integer {
        &self.0
    }
}

/// Per-query blinding secret. Used for exactly one blind/unblind pair and
/// never sent anywhere.
pub struct BlindingContext {
    r: Integer,
    r_inverse: Integer, // r^-1 mod n
    r_e: Integer,       // r^e mod n
}

impl BlindingContext {
    /// Draws `r` uniformly from `[2, n)` until it is invertible modulo `n`.
    pub fn generate<R: MutRandState>(
        public_key: &PublicKey,
        rng: &mut R,
    ) -> Result<BlindingContext, SignatureError> {
        let min = Integer::from(2);
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let r = random_between(rng, &min, &public_key.n);
            match r.clone().invert(&public_key.n) {
                Ok(r_inverse) => {
                    let r_e = public_key.raise_to_e(&r)?;
                    return Ok(BlindingContext { r, r_inverse, r_e });
                }
                Err(_) => debug!(
                    "blinding factor shares a factor with the modulus, drawing again (attempt {})",
                    attempts
                ),
            }
        }
    }
}

pub struct Protocol {
    pub public_key: PublicKey,
}

impl Protocol {
    pub fn from_public_key(public_key: &PublicKey) -> Protocol {
        Protocol {
            public_key: public_key.clone(),
        }
    }

    /// Fresh context plus the blinded message to send.
    pub fn prepare<R: MutRandState>(
        &self,
        message: &str,
        rng: &mut R,
    ) -> Result<(BlindingContext, BlindedMessage), QueryError> {
        let context = BlindingContext::generate(&self.public_key, rng)?;
        let blinded = self.blind(message, &context)?;
        Ok((context, blinded))
    }

    pub fn blind(
        &self,
        message: &str,
        context: &BlindingContext,
    ) -> Result<BlindedMessage, QueryError> {
        let m = self.public_key.encode(message)?;
        Ok(BlindedMessage(m * &context.r_e % &self.public_key.n))
    }

    pub fn unblind(
        &self,
        blind_signature: &BlindSignature,
        context: &BlindingContext,
    ) -> Result<Signature, QueryError> {
        let n = &self.public_key.n;
        if blind_signature.0 < 0 || blind_signature.0 >= *n {
            return Err(SignatureError::SignatureOutOfRange.into());
        }
        Ok(Signature::from_integer(
            Integer::from(&blind_signature.0 * &context.r_inverse) % n,
        ))
    }

    /// Unblinds and checks the result against `message`, catching a
    /// context that does not belong to this answer.
    pub fn unblind_verified(
        &self,
        blind_signature: &BlindSignature,
        context: &BlindingContext,
        message: &str,
    ) -> Result<Signature, QueryError> {
        let signature = self.unblind(blind_signature, context)?;
        if self.public_key.is_signature_of(&signature, message)? {
            Ok(signature)
        } else {
            Err(QueryError::VerificationFailed)
        }
    }
}

/// The server's half: the same exponentiation as signing in the clear.
pub fn blind_sign(signer: &Signer, blinded: &BlindedMessage) -> Result<BlindSignature, QueryError> {
    Ok(BlindSignature(signer.raise_to_d(&blinded.0)?))
}
