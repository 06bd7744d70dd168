use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::desk::config::DeskConfig;
use crate::desk::repository::{
    AgentProgressRepository, CreditWallet, ListingRecord, MarketRepository, RepositoryError,
    SaleRecord, WalletError,
};
use crate::desk::service::DealDeskService;
use crate::rules::domain::{
    AchievementCounters, AgentId, BoostState, ClientId, ClientPreferenceProfile, ExperienceLedger,
    Listing, ListingId, ListingOrigin, PriceTier, PropertyType,
};
use crate::rules::Badge;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn listing(id: &str, origin: ListingOrigin, tier: PriceTier) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        price_amount: 350_000.0,
        origin,
        price_tier: tier,
        property_type: PropertyType::Apartment,
        location: "Riverside District".to_string(),
        bedrooms: Some(2),
        area_sqm: Some(84.0),
        image_count: 8,
        description: Some("Bright corner unit".to_string()),
        amenities: ["gym", "pool"].iter().map(|s| s.to_string()).collect(),
        lifestyle_tags: ["urban"].iter().map(|s| s.to_string()).collect(),
        created_at: now(),
    }
}

pub(super) fn profile() -> ClientPreferenceProfile {
    ClientPreferenceProfile {
        budget_min: 300_000.0,
        budget_max: 400_000.0,
        property_types: [PropertyType::Apartment].into_iter().collect(),
        locations: ["riverside"].iter().map(|s| s.to_string()).collect(),
        bedrooms: 2,
        amenities: ["gym", "pool"].iter().map(|s| s.to_string()).collect(),
        lifestyle_tags: ["urban"].iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn boost_for(listing: &Listing, multiplier: f64, active: bool) -> BoostState {
    let expires_at = if active {
        now() + Duration::days(5)
    } else {
        now() - Duration::days(1)
    };
    BoostState {
        listing_id: listing.id.clone(),
        multiplier,
        activated_at: now() - Duration::days(2),
        expires_at,
    }
}

#[derive(Default)]
pub(super) struct MemoryMarket {
    listings: Mutex<HashMap<ListingId, ListingRecord>>,
    profiles: Mutex<HashMap<ClientId, ClientPreferenceProfile>>,
    pub(super) sales: Mutex<Vec<SaleRecord>>,
}

impl MemoryMarket {
    pub(super) fn add_listing(&self, listing: Listing, boost: Option<BoostState>) {
        self.listings
            .lock()
            .expect("market mutex poisoned")
            .insert(listing.id.clone(), ListingRecord { listing, boost });
    }

    pub(super) fn add_profile(&self, client: ClientId, profile: ClientPreferenceProfile) {
        self.profiles
            .lock()
            .expect("market mutex poisoned")
            .insert(client, profile);
    }

    pub(super) fn recorded_sales(&self) -> Vec<SaleRecord> {
        self.sales.lock().expect("market mutex poisoned").clone()
    }
}

impl MarketRepository for MemoryMarket {
    fn listing(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        Ok(self
            .listings
            .lock()
            .expect("market mutex poisoned")
            .get(id)
            .cloned())
    }

    fn active_listings(&self, limit: usize) -> Result<Vec<ListingRecord>, RepositoryError> {
        let guard = self.listings.lock().expect("market mutex poisoned");
        let mut records: Vec<ListingRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.listing.id.cmp(&b.listing.id));
        records.truncate(limit);
        Ok(records)
    }

    fn insert_sale(&self, record: SaleRecord) -> Result<SaleRecord, RepositoryError> {
        self.sales
            .lock()
            .expect("market mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn client_profile(
        &self,
        client: &ClientId,
    ) -> Result<Option<ClientPreferenceProfile>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("market mutex poisoned")
            .get(client)
            .cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryWallet {
    balances: Mutex<HashMap<ClientId, u32>>,
}

impl MemoryWallet {
    pub(super) fn open_account(&self, client: ClientId, balance: u32) {
        self.balances
            .lock()
            .expect("wallet mutex poisoned")
            .insert(client, balance);
    }
}

impl CreditWallet for MemoryWallet {
    fn balance(&self, client: &ClientId) -> Result<u32, WalletError> {
        self.balances
            .lock()
            .expect("wallet mutex poisoned")
            .get(client)
            .copied()
            .ok_or(WalletError::UnknownClient)
    }

    fn debit(&self, client: &ClientId, amount: u32) -> Result<u32, WalletError> {
        let mut guard = self.balances.lock().expect("wallet mutex poisoned");
        let balance = guard.get_mut(client).ok_or(WalletError::UnknownClient)?;
        if *balance < amount {
            return Err(WalletError::InsufficientCredits {
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(*balance)
    }
}

#[derive(Default)]
pub(super) struct MemoryProgress {
    ledgers: Mutex<HashMap<AgentId, ExperienceLedger>>,
    counters: Mutex<HashMap<AgentId, AchievementCounters>>,
    badges: Mutex<HashMap<AgentId, BTreeSet<Badge>>>,
}

impl MemoryProgress {
    pub(super) fn seed_counters(&self, agent: AgentId, counters: AchievementCounters) {
        self.counters
            .lock()
            .expect("progress mutex poisoned")
            .insert(agent, counters);
    }

    pub(super) fn seed_points(&self, agent: AgentId, total_points: u64) {
        self.ledgers
            .lock()
            .expect("progress mutex poisoned")
            .insert(agent, ExperienceLedger { total_points });
    }
}

impl AgentProgressRepository for MemoryProgress {
    fn ledger(&self, agent: &AgentId) -> Result<ExperienceLedger, RepositoryError> {
        Ok(self
            .ledgers
            .lock()
            .expect("progress mutex poisoned")
            .get(agent)
            .copied()
            .unwrap_or_default())
    }

    fn credit_points(
        &self,
        agent: &AgentId,
        points: u64,
    ) -> Result<ExperienceLedger, RepositoryError> {
        let mut guard = self.ledgers.lock().expect("progress mutex poisoned");
        let ledger = guard.entry(agent.clone()).or_default();
        ledger.total_points += points;
        Ok(*ledger)
    }

    fn counters(&self, agent: &AgentId) -> Result<AchievementCounters, RepositoryError> {
        Ok(self
            .counters
            .lock()
            .expect("progress mutex poisoned")
            .get(agent)
            .copied()
            .unwrap_or_default())
    }

    fn record_contract_closed(
        &self,
        agent: &AgentId,
    ) -> Result<AchievementCounters, RepositoryError> {
        let mut guard = self.counters.lock().expect("progress mutex poisoned");
        let counters = guard.entry(agent.clone()).or_default();
        counters.contracts_closed += 1;
        Ok(*counters)
    }

    fn known_badges(&self, agent: &AgentId) -> Result<BTreeSet<Badge>, RepositoryError> {
        Ok(self
            .badges
            .lock()
            .expect("progress mutex poisoned")
            .get(agent)
            .cloned()
            .unwrap_or_default())
    }

    fn store_badges(
        &self,
        agent: &AgentId,
        badges: &BTreeSet<Badge>,
    ) -> Result<(), RepositoryError> {
        self.badges
            .lock()
            .expect("progress mutex poisoned")
            .insert(agent.clone(), badges.clone());
        Ok(())
    }
}

pub(super) type MemoryService = DealDeskService<MemoryMarket, MemoryWallet, MemoryProgress>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryMarket>,
    Arc<MemoryWallet>,
    Arc<MemoryProgress>,
) {
    let market = Arc::new(MemoryMarket::default());
    let wallet = Arc::new(MemoryWallet::default());
    let progress = Arc::new(MemoryProgress::default());
    let service = DealDeskService::new(
        market.clone(),
        wallet.clone(),
        progress.clone(),
        DeskConfig::default(),
    );
    (service, market, wallet, progress)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
