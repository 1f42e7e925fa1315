use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Check a hex-encoded HMAC-SHA256 `signature` of `body`.
pub fn is_valid_signature(signature: &str, body: &[u8], secret: &str) -> bool {
    let mut hmac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(hmac) => hmac,
        Err(_) => return false,
    };
    hmac.update(body);

    match hex::decode(signature) {
        Ok(decoded) => hmac.verify_slice(&decoded).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
pub fn sign_payload(body: &[u8], secret: &str) -> String {
    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    hmac.update(body);
    hex::encode(hmac.finalize().into_bytes())
}
