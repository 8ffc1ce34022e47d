use marketplace_payments::domain::error::PaymentError;
use marketplace_payments::processor::stripe::classify_api_error;

fn classify(status: u16, error_type: Option<&str>, error_code: Option<&str>) -> PaymentError {
    classify_api_error(status, error_type, error_code, "test".to_string())
}

#[test]
fn server_errors_are_retryable_unavailability() {
    for status in [500, 502, 503, 408, 429] {
        let e = classify(status, None, None);
        assert!(matches!(e, PaymentError::ProcessorUnavailable), "status {status}");
        assert!(e.retryable());
    }
}

#[test]
fn missing_account_maps_to_account_not_found() {
    assert!(matches!(classify(404, None, None), PaymentError::AccountNotFound));
}

#[test]
fn card_failures_map_to_card_declined() {
    assert!(matches!(classify(402, None, None), PaymentError::CardDeclined));
    assert!(matches!(
        classify(400, Some("card_error"), None),
        PaymentError::CardDeclined
    ));
    assert!(matches!(
        classify(400, None, Some("card_declined")),
        PaymentError::CardDeclined
    ));
}

#[test]
fn disabled_destination_maps_to_account_ineligible() {
    for code in ["account_invalid", "charges_disabled", "payouts_disabled"] {
        assert!(matches!(
            classify(400, Some("invalid_request_error"), Some(code)),
            PaymentError::AccountIneligible
        ));
    }
}

#[test]
fn unrecognized_client_errors_fall_back_to_validation() {
    let e = classify(400, Some("invalid_request_error"), Some("parameter_missing"));
    assert!(matches!(e, PaymentError::Validation(_)));
    assert!(!e.retryable());
}

#[test]
fn taxonomy_maps_to_stable_codes_and_statuses() {
    let cases: [(PaymentError, &str, u16); 6] = [
        (PaymentError::ProcessorUnavailable, "PROCESSOR_UNAVAILABLE", 503),
        (PaymentError::CardDeclined, "CARD_DECLINED", 402),
        (PaymentError::ProviderNotEligible, "PROVIDER_NOT_ELIGIBLE", 409),
        (PaymentError::AlreadyPaid, "ALREADY_PAID", 409),
        (PaymentError::SignatureInvalid, "SIGNATURE_INVALID", 400),
        (PaymentError::AccountNotFound, "ACCOUNT_NOT_FOUND", 404),
    ];

    for (error, code, status) in cases {
        assert_eq!(error.code(), code);
        assert_eq!(error.status().as_u16(), status);
        assert_eq!(error.envelope().error.code, code);
    }
}
