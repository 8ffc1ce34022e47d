use chrono::Utc;
use hmac::{Hmac, Mac};
use marketplace_payments::webhook::signature::{parse_signature_header, verify_signature};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SECRET: &str = "whsec_test123secret456";

fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn valid_signature_is_accepted() {
    let payload = br#"{"type":"account.updated"}"#;
    let now = Utc::now();
    let ts = now.timestamp();
    let header = format!("t={},v1={}", ts, sign(payload, SECRET, ts));

    assert!(verify_signature(payload, &header, SECRET, now));
}

#[test]
fn wrong_secret_is_rejected() {
    let payload = br#"{"type":"account.updated"}"#;
    let now = Utc::now();
    let ts = now.timestamp();
    let header = format!("t={},v1={}", ts, sign(payload, "wrong_secret", ts));

    assert!(!verify_signature(payload, &header, SECRET, now));
}

#[test]
fn tampered_payload_is_rejected() {
    let original = br#"{"type":"charge.succeeded"}"#;
    let tampered = br#"{"type":"charge.succeeded","amount":1}"#;
    let now = Utc::now();
    let ts = now.timestamp();
    let header = format!("t={},v1={}", ts, sign(original, SECRET, ts));

    assert!(!verify_signature(tampered, &header, SECRET, now));
}

#[test]
fn stale_timestamp_is_rejected_even_with_valid_mac() {
    let payload = br#"{"type":"charge.succeeded"}"#;
    let now = Utc::now();
    let ts = now.timestamp() - 600;
    let header = format!("t={},v1={}", ts, sign(payload, SECRET, ts));

    assert!(!verify_signature(payload, &header, SECRET, now));
}

#[test]
fn rotated_secret_second_signature_is_accepted() {
    let payload = br#"{"type":"charge.refunded"}"#;
    let now = Utc::now();
    let ts = now.timestamp();
    let header = format!(
        "t={},v1={},v1={}",
        ts,
        sign(payload, "old_secret", ts),
        sign(payload, SECRET, ts)
    );

    assert!(verify_signature(payload, &header, SECRET, now));
}

#[test]
fn malformed_headers_are_rejected() {
    let payload = b"{}";
    let now = Utc::now();

    assert!(!verify_signature(payload, "", SECRET, now));
    assert!(!verify_signature(payload, "v1=deadbeef", SECRET, now));
    assert!(!verify_signature(payload, "t=notanumber,v1=deadbeef", SECRET, now));
    assert!(!verify_signature(payload, &format!("t={}", now.timestamp()), SECRET, now));
}

#[test]
fn header_parser_collects_all_v1_entries() {
    let (ts, sigs) = parse_signature_header("t=123, v1=aa, v0=ignored, v1=bb").expect("parses");
    assert_eq!(ts, 123);
    assert_eq!(sigs, vec!["aa".to_string(), "bb".to_string()]);
}
