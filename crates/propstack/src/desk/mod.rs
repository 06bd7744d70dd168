//! Deal-desk layer: the caller side of the rule engine.
//!
//! Repositories abstract the hosted data store, the service composes them
//! with the pure rules, and the router exposes the operations over HTTP.
//! Every operation follows the same shape: read entities, invoke a rule,
//! persist the returned value, respond.

pub mod config;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::DeskConfig;
pub use repository::{
    AgentProgressRepository, CreditWallet, ListingRecord, MarketRepository, RepositoryError,
    SaleRecord, WalletError,
};
pub use router::desk_router;
pub use service::{
    AgentProgressView, CreditQuote, CreditReceipt, DealDeskError, DealDeskService, ExperienceAward,
    ListingMatch, SaleOutcome, SaleSubmission,
};
