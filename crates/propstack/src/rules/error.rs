/// Validation failures raised at the rule boundary.
///
/// Every variant is a local, synchronous rejection: bad input fails the call
/// outright instead of flowing onward as NaN, Infinity, or a silently wrong
/// score. None of these are transient, so none are retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("unrecognized pricing input: {0}")]
    InvalidPricingInput(String),
    #[error("commission percent {0} outside (0, 100]")]
    InvalidCommissionPercent(f64),
    #[error("sale amount {0} must be positive")]
    InvalidSaleAmount(f64),
    #[error("invalid preference profile: {0}")]
    InvalidPreferenceProfile(String),
    #[error("division guard triggered: {0}")]
    DivisionGuardTriggered(&'static str),
}
