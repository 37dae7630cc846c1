//! HMAC-MD5 (RFC 2104) over the crate's own MD5.
use super::{Digest, HashError, Md5, DIGEST_LEN};
use ::hmac::{Hmac, Mac};

pub type HmacMd5 = Hmac<Md5>;

pub fn hmac_md5(key: &[u8], text: &[u8]) -> Result<Digest, HashError> {
    let mut mac = HmacMd5::new_varkey(key).map_err(|_| HashError::InvalidKeyLength)?;
    mac.input(text);
    let code = mac.result().code();
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&code);
    Ok(Digest::from(out))
}
