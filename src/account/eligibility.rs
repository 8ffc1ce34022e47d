use crate::domain::account::ConnectedAccount;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityDecision {
    Allow,
    Reject(&'static str),
}

/// Gate consulted before any charge is attempted. Both capabilities must be
/// on; an ineligible account never reaches the processor.
pub fn checkout_eligibility(account: &ConnectedAccount) -> EligibilityDecision {
    if !account.charges_enabled {
        return EligibilityDecision::Reject("charges disabled for connected account");
    }
    if !account.payouts_enabled {
        return EligibilityDecision::Reject("payouts disabled for connected account");
    }
    EligibilityDecision::Allow
}
