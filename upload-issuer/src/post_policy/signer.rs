//! AWS Signature Version 4 primitives used by browser-based POST uploads

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::GrantError;

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm advertised in `X-Amz-Algorithm`
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name in the credential scope
pub const SERVICE: &str = "s3";

const TERMINATOR: &str = "aws4_request";

/// `yyyymmddTHHMMSSZ`, the `X-Amz-Date` format
#[must_use]
pub fn amz_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `yyyymmdd`, the date component of the credential scope
#[must_use]
pub fn short_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%d").to_string()
}

/// `<access key>/<yyyymmdd>/<region>/<service>/aws4_request`
#[must_use]
pub fn credential(access_key_id: &str, date: &str, region: &str, service: &str) -> String {
    format!("{access_key_id}/{date}/{region}/{service}/{TERMINATOR}")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, GrantError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| GrantError::Signing(format!("invalid HMAC key: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derives the `SigV4` signing key for one day, region and service
///
/// # Errors
///
/// Returns `GrantError::Signing` if the HMAC cannot be initialised
pub fn signing_key(
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, GrantError> {
    let k_date = hmac_sha256(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, TERMINATOR.as_bytes())
}

/// Hex-encoded signature of `string_to_sign`
///
/// For POST uploads the string to sign is the base64 policy itself.
///
/// # Errors
///
/// Returns `GrantError::Signing` if the HMAC cannot be initialised
pub fn sign(signing_key: &[u8], string_to_sign: &str) -> Result<String, GrantError> {
    Ok(hex::encode(hmac_sha256(
        signing_key,
        string_to_sign.as_bytes(),
    )?))
}
