//! HMAC-SHA256 request/response signatures.
//!
//! The signed string is every non-empty field except `sign`, sorted by key,
//! as `k=v` pairs joined by `&`, followed by `&key=<api key>`. The MAC is
//! keyed with the same API key and rendered as uppercase hex.

use {
    crate::domain::error::TransportError,
    hmac::{Hmac, Mac},
    sha2::Sha256,
    std::collections::BTreeMap,
};

type HmacSha256 = Hmac<Sha256>;

pub const SIGN_TYPE: &str = "HMAC-SHA256";

fn canonical(fields: &BTreeMap<String, String>, api_key: &str) -> String {
    fields
        .iter()
        .filter(|(k, v)| k.as_str() != "sign" && !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .chain(std::iter::once(format!("key={api_key}")))
        .collect::<Vec<_>>()
        .join("&")
}

fn mac(fields: &BTreeMap<String, String>, api_key: &str) -> Result<HmacSha256, TransportError> {
    let mut mac = HmacSha256::new_from_slice(api_key.as_bytes())
        .map_err(|e| TransportError::Signing(e.to_string()))?;
    mac.update(canonical(fields, api_key).as_bytes());
    Ok(mac)
}

pub fn sign(fields: &BTreeMap<String, String>, api_key: &str) -> Result<String, TransportError> {
    let digest = mac(fields, api_key)?.finalize().into_bytes();
    Ok(hex::encode_upper(digest))
}

/// Constant-time check of the `sign` field. A missing or non-hex signature
/// never verifies.
pub fn verify(fields: &BTreeMap<String, String>, api_key: &str) -> bool {
    let Some(Ok(expected)) = fields.get("sign").map(hex::decode) else {
        return false;
    };
    match mac(fields, api_key) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}
