use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::domain::{
    AchievementCounters, AgentId, BoostState, ClientId, ClientPreferenceProfile, ExperienceLedger,
    Listing, ListingId, SaleEvent,
};
use crate::rules::{Badge, CommissionSplit};

/// Listing row joined with its optional boost record.
///
/// The boost is passed through as stored; expiry is judged by the scoring
/// rule, not by the repository query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub listing: Listing,
    pub boost: Option<BoostState>,
}

/// Persisted sale row: the event plus the computed split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub event: SaleEvent,
    pub split: CommissionSplit,
    pub recorded_at: DateTime<Utc>,
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction over the hosted store's listing, sale, and client
/// profile tables, so the service can be exercised in isolation.
pub trait MarketRepository: Send + Sync {
    fn listing(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError>;
    fn active_listings(&self, limit: usize) -> Result<Vec<ListingRecord>, RepositoryError>;
    fn insert_sale(&self, record: SaleRecord) -> Result<SaleRecord, RepositoryError>;
    fn client_profile(
        &self,
        client: &ClientId,
    ) -> Result<Option<ClientPreferenceProfile>, RepositoryError>;
}

/// Client credit balances.
pub trait CreditWallet: Send + Sync {
    fn balance(&self, client: &ClientId) -> Result<u32, WalletError>;
    /// Debit `amount` and return the remaining balance. The balance must be
    /// untouched when the debit is rejected.
    fn debit(&self, client: &ClientId, amount: u32) -> Result<u32, WalletError>;
}

/// Wallet failure modes.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("insufficient credits: required {required}, available {available}")]
    InsufficientCredits { required: u32, available: u32 },
    #[error("unknown client wallet")]
    UnknownClient,
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// Experience ledgers, activity counters, and stored badge sets per agent.
///
/// The stored badge set is a display cache, never the source of truth:
/// unlocks are always recomputed from counters.
pub trait AgentProgressRepository: Send + Sync {
    fn ledger(&self, agent: &AgentId) -> Result<ExperienceLedger, RepositoryError>;
    fn credit_points(&self, agent: &AgentId, points: u64)
        -> Result<ExperienceLedger, RepositoryError>;
    fn counters(&self, agent: &AgentId) -> Result<AchievementCounters, RepositoryError>;
    fn record_contract_closed(
        &self,
        agent: &AgentId,
    ) -> Result<AchievementCounters, RepositoryError>;
    fn known_badges(&self, agent: &AgentId) -> Result<BTreeSet<Badge>, RepositoryError>;
    fn store_badges(
        &self,
        agent: &AgentId,
        badges: &BTreeSet<Badge>,
    ) -> Result<(), RepositoryError>;
}
