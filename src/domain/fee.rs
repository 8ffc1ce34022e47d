use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeModel {
    Percentage { bps: i64 },
    Fixed { amount_minor: i64 },
}

/// Computed once at checkout and stored; the stored value stays authoritative
/// even if the configured rate changes later. Round-half-up to the smallest
/// currency unit.
pub fn platform_fee_minor(gross_amount_minor: i64, model: &FeeModel) -> i64 {
    match model {
        FeeModel::Percentage { bps } => (gross_amount_minor * bps + 5_000) / 10_000,
        FeeModel::Fixed { amount_minor } => *amount_minor,
    }
}
