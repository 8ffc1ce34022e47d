use marketplace_payments::domain::fee::{platform_fee_minor, FeeModel};

#[test]
fn fifteen_percent_of_10000_is_1500() {
    let fee = platform_fee_minor(10_000, &FeeModel::Percentage { bps: 1_500 });
    assert_eq!(fee, 1_500);
}

#[test]
fn rounds_half_up_to_smallest_unit() {
    // 333 * 15% = 49.95 -> 50
    assert_eq!(platform_fee_minor(333, &FeeModel::Percentage { bps: 1_500 }), 50);
    // 1 * 50% = 0.5 -> 1
    assert_eq!(platform_fee_minor(1, &FeeModel::Percentage { bps: 5_000 }), 1);
    // 3 * 11% = 0.33 -> 0
    assert_eq!(platform_fee_minor(3, &FeeModel::Percentage { bps: 1_100 }), 0);
}

#[test]
fn zero_rate_charges_no_fee() {
    assert_eq!(platform_fee_minor(10_000, &FeeModel::Percentage { bps: 0 }), 0);
}

#[test]
fn full_rate_takes_entire_gross() {
    assert_eq!(platform_fee_minor(10_000, &FeeModel::Percentage { bps: 10_000 }), 10_000);
}

#[test]
fn fixed_fee_ignores_gross_amount() {
    assert_eq!(platform_fee_minor(10_000, &FeeModel::Fixed { amount_minor: 250 }), 250);
    assert_eq!(platform_fee_minor(500, &FeeModel::Fixed { amount_minor: 250 }), 250);
}

#[test]
fn fee_model_deserializes_from_tagged_json() {
    let pct: FeeModel = serde_json::from_str(r#"{"type":"PERCENTAGE","bps":1500}"#).unwrap();
    assert_eq!(platform_fee_minor(10_000, &pct), 1_500);

    let fixed: FeeModel = serde_json::from_str(r#"{"type":"FIXED","amount_minor":99}"#).unwrap();
    assert_eq!(platform_fee_minor(10_000, &fixed), 99);
}
