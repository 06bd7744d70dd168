use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::rules::domain::{AgentId, ClientId, ExperienceLedger, ListingId, SaleEvent};
use crate::rules::{
    boost, commission, gamification, matching, pricing, Badge, LevelInfo, MatchScore,
    RankedListing, RuleError,
};

use super::config::DeskConfig;
use super::repository::{
    AgentProgressRepository, CreditWallet, MarketRepository, RepositoryError, SaleRecord,
    WalletError,
};

/// Service composing the repositories with the pure rules.
///
/// The service owns no business logic of its own: every decision is made by
/// a rule in [`crate::rules`], and every side effect is a repository call.
pub struct DealDeskService<M, W, P> {
    market: Arc<M>,
    wallet: Arc<W>,
    progress: Arc<P>,
    config: DeskConfig,
}

/// Inbound payload for recording a closed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSubmission {
    pub listing_id: ListingId,
    pub sale_amount: f64,
    pub commission_percent: f64,
    pub capturing_agent_id: AgentId,
    pub selling_agent_id: AgentId,
}

/// Credit cost to act on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditQuote {
    pub listing_id: ListingId,
    pub cost: u8,
}

/// Receipt for a completed credit spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReceipt {
    pub listing_id: ListingId,
    pub cost: u8,
    pub remaining: u32,
}

/// Experience credited to one agent by a closed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceAward {
    pub agent_id: AgentId,
    pub points: u64,
    pub ledger: ExperienceLedger,
}

/// Result of recording a sale: the persisted record plus experience awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOutcome {
    pub record: SaleRecord,
    pub awards: Vec<ExperienceAward>,
}

/// A listing scored against one client's preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingMatch {
    pub listing_id: ListingId,
    pub result: MatchScore,
}

/// Gamification standing returned to the agent dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProgressView {
    pub agent_id: AgentId,
    pub level: LevelInfo,
    pub unlocked: BTreeSet<Badge>,
    pub newly_unlocked: BTreeSet<Badge>,
}

/// Error raised by the deal-desk service.
#[derive(Debug, thiserror::Error)]
pub enum DealDeskError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("listing {0} not found")]
    UnknownListing(String),
    #[error("client {0} has no preference profile")]
    MissingProfile(String),
}

impl<M, W, P> DealDeskService<M, W, P>
where
    M: MarketRepository + 'static,
    W: CreditWallet + 'static,
    P: AgentProgressRepository + 'static,
{
    pub fn new(market: Arc<M>, wallet: Arc<W>, progress: Arc<P>, config: DeskConfig) -> Self {
        Self {
            market,
            wallet,
            progress,
            config,
        }
    }

    /// Credit cost for acting on a listing, without spending anything.
    pub fn quote_action(&self, listing_id: &ListingId) -> Result<CreditQuote, DealDeskError> {
        let record = self
            .market
            .listing(listing_id)?
            .ok_or_else(|| DealDeskError::UnknownListing(listing_id.0.clone()))?;

        Ok(CreditQuote {
            listing_id: listing_id.clone(),
            cost: pricing::credit_cost_for(&record.listing),
        })
    }

    /// Quote and debit in one step so a client can act on a listing.
    pub fn spend_credits(
        &self,
        client_id: &ClientId,
        listing_id: &ListingId,
    ) -> Result<CreditReceipt, DealDeskError> {
        let quote = self.quote_action(listing_id)?;
        let remaining = self.wallet.debit(client_id, u32::from(quote.cost))?;

        info!(
            client = %client_id.0,
            listing = %listing_id.0,
            cost = quote.cost,
            "credits spent"
        );

        Ok(CreditReceipt {
            listing_id: quote.listing_id,
            cost: quote.cost,
            remaining,
        })
    }

    /// Validate and split the commission, persist the sale, and award
    /// closing experience to the agents involved.
    pub fn record_sale(
        &self,
        submission: SaleSubmission,
        now: DateTime<Utc>,
    ) -> Result<SaleOutcome, DealDeskError> {
        if self.market.listing(&submission.listing_id)?.is_none() {
            return Err(DealDeskError::UnknownListing(submission.listing_id.0.clone()));
        }

        let split = commission::split(
            submission.sale_amount,
            submission.commission_percent,
            &submission.capturing_agent_id,
            &submission.selling_agent_id,
        )?;

        let event = SaleEvent {
            listing_id: submission.listing_id,
            sale_amount: submission.sale_amount,
            capturing_agent_id: submission.capturing_agent_id,
            selling_agent_id: submission.selling_agent_id,
            commission_percent: submission.commission_percent,
        };
        let record = self.market.insert_sale(SaleRecord {
            event,
            split,
            recorded_at: now,
        })?;

        self.progress
            .record_contract_closed(&record.event.selling_agent_id)?;

        let awards = self.award_closing_experience(&record)?;

        info!(
            listing = %record.event.listing_id.0,
            total_cents = record.split.total_cents,
            same_agent = record.split.same_agent,
            "sale recorded"
        );

        Ok(SaleOutcome { record, awards })
    }

    /// Active listings scored and ordered for display.
    pub fn ranked_listings(
        &self,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<RankedListing>, DealDeskError> {
        let limit = limit.unwrap_or(self.config.rank_page_size);
        let entries: Vec<_> = self
            .market
            .active_listings(limit)?
            .into_iter()
            .map(|record| (record.listing, record.boost))
            .collect();

        Ok(boost::rank(&entries, now))
    }

    /// Match score for one client/listing pairing.
    pub fn match_client(
        &self,
        client_id: &ClientId,
        listing_id: &ListingId,
    ) -> Result<ListingMatch, DealDeskError> {
        let profile = self
            .market
            .client_profile(client_id)?
            .ok_or_else(|| DealDeskError::MissingProfile(client_id.0.clone()))?;
        let record = self
            .market
            .listing(listing_id)?
            .ok_or_else(|| DealDeskError::UnknownListing(listing_id.0.clone()))?;

        let result = matching::score(&profile, &record.listing)?;
        Ok(ListingMatch {
            listing_id: listing_id.clone(),
            result,
        })
    }

    /// Active listings scored for the client, best match first. Equal match
    /// scores keep their boost-rank order.
    pub fn recommendations(
        &self,
        client_id: &ClientId,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<ListingMatch>, DealDeskError> {
        let limit = limit.unwrap_or(self.config.rank_page_size);
        let profile = self
            .market
            .client_profile(client_id)?
            .ok_or_else(|| DealDeskError::MissingProfile(client_id.0.clone()))?;

        let records = self.market.active_listings(limit)?;
        let entries: Vec<_> = records
            .iter()
            .cloned()
            .map(|record| (record.listing, record.boost))
            .collect();
        let rank_order = boost::rank(&entries, now);

        let mut matches = Vec::with_capacity(rank_order.len());
        for ranked in &rank_order {
            let record = records
                .iter()
                .find(|record| record.listing.id == ranked.listing_id)
                .ok_or(RepositoryError::NotFound)?;
            let result = matching::score(&profile, &record.listing)?;
            matches.push(ListingMatch {
                listing_id: ranked.listing_id.clone(),
                result,
            });
        }

        matches.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        Ok(matches)
    }

    /// Level standing and badge unlocks for an agent. Newly unlocked badges
    /// are the diff against the stored set, which is refreshed afterwards.
    pub fn agent_progress(&self, agent_id: &AgentId) -> Result<AgentProgressView, DealDeskError> {
        let ledger = self.progress.ledger(agent_id)?;
        let counters = self.progress.counters(agent_id)?;

        let level = gamification::level_info(ledger.total_points);
        let unlocked = gamification::unlocked_badges(&counters);
        let known = self.progress.known_badges(agent_id)?;
        let newly = gamification::newly_unlocked(&unlocked, &known);

        if !newly.is_empty() {
            self.progress.store_badges(agent_id, &unlocked)?;
        }

        Ok(AgentProgressView {
            agent_id: agent_id.clone(),
            level,
            unlocked,
            newly_unlocked: newly,
        })
    }

    fn award_closing_experience(
        &self,
        record: &SaleRecord,
    ) -> Result<Vec<ExperienceAward>, DealDeskError> {
        let seller = &record.event.selling_agent_id;
        let capturer = &record.event.capturing_agent_id;

        if record.split.same_agent {
            let points = self.config.seller_close_xp + self.config.capturer_close_xp;
            let ledger = self.progress.credit_points(seller, points)?;
            return Ok(vec![ExperienceAward {
                agent_id: seller.clone(),
                points,
                ledger,
            }]);
        }

        let seller_ledger = self
            .progress
            .credit_points(seller, self.config.seller_close_xp)?;
        let capturer_ledger = self
            .progress
            .credit_points(capturer, self.config.capturer_close_xp)?;

        Ok(vec![
            ExperienceAward {
                agent_id: seller.clone(),
                points: self.config.seller_close_xp,
                ledger: seller_ledger,
            },
            ExperienceAward {
                agent_id: capturer.clone(),
                points: self.config.capturer_close_xp,
                ledger: capturer_ledger,
            },
        ])
    }
}
