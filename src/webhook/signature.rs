use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Verifies a `t=<unix>,v1=<hex>` signature header over `"{t}.{body}"` with
/// HMAC-SHA256. Comparison is constant-time via the mac itself. Timestamps
/// outside the tolerance window are rejected even with a valid mac.
pub fn verify_signature(payload: &[u8], header: &str, secret: &str, now: DateTime<Utc>) -> bool {
    let Some((timestamp, signatures)) = parse_signature_header(header) else {
        return false;
    };
    if (now.timestamp() - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return false;
    }

    for candidate in signatures {
        let Ok(expected) = hex::decode(&candidate) else {
            continue;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&expected).is_ok() {
            return true;
        }
    }

    false
}

/// Returns the timestamp and every `v1` signature present. The processor may
/// send multiple `v1` entries during secret rotation.
pub fn parse_signature_header(header: &str) -> Option<(i64, Vec<String>)> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let mut kv = part.trim().splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(value)) => timestamp = value.parse::<i64>().ok(),
            (Some("v1"), Some(value)) => signatures.push(value.to_string()),
            _ => {}
        }
    }

    match (timestamp, signatures.is_empty()) {
        (Some(t), false) => Some((t, signatures)),
        _ => None,
    }
}
