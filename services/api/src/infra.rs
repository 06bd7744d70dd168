use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use propstack::desk::{
    AgentProgressRepository, CreditWallet, ListingRecord, MarketRepository, RepositoryError,
    SaleRecord, WalletError,
};
use propstack::rules::domain::{
    AchievementCounters, AgentId, BoostState, ClientId, ClientPreferenceProfile, ExperienceLedger,
    Listing, ListingId,
};
use propstack::rules::Badge;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the hosted store's listing, sale, and profile
/// tables. Production deployments swap this for a client of the real store.
#[derive(Default)]
pub(crate) struct InMemoryMarket {
    listings: Mutex<HashMap<ListingId, ListingRecord>>,
    profiles: Mutex<HashMap<ClientId, ClientPreferenceProfile>>,
    sales: Mutex<Vec<SaleRecord>>,
}

impl InMemoryMarket {
    pub(crate) fn add_listing(&self, listing: Listing, boost: Option<BoostState>) {
        self.listings
            .lock()
            .expect("market mutex poisoned")
            .insert(listing.id.clone(), ListingRecord { listing, boost });
    }

    pub(crate) fn add_profile(&self, client: ClientId, profile: ClientPreferenceProfile) {
        self.profiles
            .lock()
            .expect("market mutex poisoned")
            .insert(client, profile);
    }
}

impl MarketRepository for InMemoryMarket {
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
pub(crate) struct InMemoryWallet {
    balances: Mutex<HashMap<ClientId, u32>>,
}

impl InMemoryWallet {
    pub(crate) fn open_account(&self, client: ClientId, balance: u32) {
        self.balances
            .lock()
            .expect("wallet mutex poisoned")
            .insert(client, balance);
    }
}

impl CreditWallet for InMemoryWallet {
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
pub(crate) struct InMemoryProgress {
    ledgers: Mutex<HashMap<AgentId, ExperienceLedger>>,
    counters: Mutex<HashMap<AgentId, AchievementCounters>>,
    badges: Mutex<HashMap<AgentId, BTreeSet<Badge>>>,
}

impl InMemoryProgress {
    pub(crate) fn seed_counters(&self, agent: AgentId, counters: AchievementCounters) {
        self.counters
            .lock()
            .expect("progress mutex poisoned")
            .insert(agent, counters);
    }
}

impl AgentProgressRepository for InMemoryProgress {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now)
}
