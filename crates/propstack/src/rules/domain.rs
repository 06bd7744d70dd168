use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RuleError;

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Identifier wrapper for agents, whether capturing or selling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Identifier wrapper for marketplace clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// How a listing entered the marketplace. Drives credit pricing: listings
/// that cost more to source cost more to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrigin {
    Platform,
    AgentCaptured,
    ExternalImport,
}

impl ListingOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            ListingOrigin::Platform => "platform",
            ListingOrigin::AgentCaptured => "agent_captured",
            ListingOrigin::ExternalImport => "external_import",
        }
    }

    /// Parse a free-form tag from the external store. Unknown tags are a
    /// rejection, never a silent fallback.
    pub fn parse(value: &str) -> Result<Self, RuleError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "platform" => Ok(ListingOrigin::Platform),
            "agent_captured" | "agent-captured" => Ok(ListingOrigin::AgentCaptured),
            "external_import" | "external-import" => Ok(ListingOrigin::ExternalImport),
            other => Err(RuleError::InvalidPricingInput(format!("origin '{other}'"))),
        }
    }
}

/// Price band a listing falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

impl PriceTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriceTier::Low => "low",
            PriceTier::Medium => "medium",
            PriceTier::High => "high",
        }
    }

    pub fn parse(value: &str) -> Result<Self, RuleError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PriceTier::Low),
            "medium" => Ok(PriceTier::Medium),
            "high" => Ok(PriceTier::High),
            other => Err(RuleError::InvalidPricingInput(format!("tier '{other}'"))),
        }
    }
}

/// Property categories a client can express a preference for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Condo,
    Townhouse,
    Land,
    Commercial,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

/// A property record eligible for sale and display.
///
/// Constructed by the caller from a row in the external store immediately
/// before a rule call and discarded after. Invariant: `price_amount >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub price_amount: f64,
    pub origin: ListingOrigin,
    pub price_tier: PriceTier,
    pub property_type: PropertyType,
    pub location: String,
    pub bedrooms: Option<u8>,
    pub area_sqm: Option<f64>,
    pub image_count: u32,
    pub description: Option<String>,
    pub amenities: BTreeSet<String>,
    pub lifestyle_tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

/// A closed sale awaiting commission settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub listing_id: ListingId,
    pub sale_amount: f64,
    pub capturing_agent_id: AgentId,
    pub selling_agent_id: AgentId,
    pub commission_percent: f64,
}

/// Time-limited ranking multiplier attached to a listing.
///
/// A listing has at most one active boost at a time; that exclusivity is
/// enforced by the caller, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostState {
    pub listing_id: ListingId,
    pub multiplier: f64,
    pub activated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl BoostState {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// What a client is shopping for. Invariant: `budget_min <= budget_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPreferenceProfile {
    pub budget_min: f64,
    pub budget_max: f64,
    pub property_types: BTreeSet<PropertyType>,
    pub locations: BTreeSet<String>,
    pub bedrooms: u8,
    pub amenities: BTreeSet<String>,
    pub lifestyle_tags: BTreeSet<String>,
}

impl ClientPreferenceProfile {
    pub fn validate(&self) -> Result<(), RuleError> {
        if !self.budget_min.is_finite() || !self.budget_max.is_finite() {
            return Err(RuleError::InvalidPreferenceProfile(
                "budget bounds must be finite".to_string(),
            ));
        }
        if self.budget_min < 0.0 {
            return Err(RuleError::InvalidPreferenceProfile(format!(
                "budget_min {} is negative",
                self.budget_min
            )));
        }
        if self.budget_min > self.budget_max {
            return Err(RuleError::InvalidPreferenceProfile(format!(
                "budget_min {} exceeds budget_max {}",
                self.budget_min, self.budget_max
            )));
        }
        Ok(())
    }
}

/// Cumulative experience for an agent. Level is always derived from
/// `total_points` at read time so the two can never drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceLedger {
    pub total_points: u64,
}

/// Activity counters supplied by the caller for badge predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementCounters {
    pub properties_listed: u32,
    pub contracts_closed: u32,
    pub proposals_sent: u32,
    pub clients_registered: u32,
    pub boosts_activated: u32,
}
