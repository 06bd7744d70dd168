//! Pure business rules for the listing marketplace.
//!
//! Every function in this module tree is a stateless, deterministic
//! computation over plain value records. Callers read entities from the
//! external store, invoke a rule, and persist the returned value themselves;
//! nothing here mutates state or performs I/O, so every rule is safe to call
//! concurrently from any number of request handlers.

pub mod boost;
pub mod commission;
pub mod domain;
pub mod gamification;
pub mod matching;
pub mod pricing;

mod error;

#[cfg(test)]
mod tests;

pub use boost::RankedListing;
pub use commission::CommissionSplit;
pub use error::RuleError;
pub use gamification::{Badge, LevelInfo};
pub use matching::{MatchReason, MatchScore, RecommendationTier};
