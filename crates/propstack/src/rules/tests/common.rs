use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::rules::domain::{
    AgentId, BoostState, ClientPreferenceProfile, Listing, ListingId, ListingOrigin, PriceTier,
    PropertyType,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn agent(id: &str) -> AgentId {
    AgentId(id.to_string())
}

pub(super) fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// A fully populated listing created at `now`: every completeness field set.
pub(super) fn complete_listing(id: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        price_amount: 350_000.0,
        origin: ListingOrigin::Platform,
        price_tier: PriceTier::Medium,
        property_type: PropertyType::Apartment,
        location: "Riverside District, Des Moines".to_string(),
        bedrooms: Some(2),
        area_sqm: Some(84.0),
        image_count: 12,
        description: Some("Sunny two-bedroom with river views".to_string()),
        amenities: tags(&["gym", "pool", "parking"]),
        lifestyle_tags: tags(&["pet-friendly", "urban"]),
        created_at: now(),
    }
}

/// A listing with every optional completeness field missing or empty.
pub(super) fn sparse_listing(id: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        price_amount: 0.0,
        origin: ListingOrigin::ExternalImport,
        price_tier: PriceTier::Low,
        property_type: PropertyType::Land,
        location: "Outskirts".to_string(),
        bedrooms: None,
        area_sqm: None,
        image_count: 0,
        description: None,
        amenities: BTreeSet::new(),
        lifestyle_tags: BTreeSet::new(),
        created_at: now(),
    }
}

pub(super) fn listing_aged_days(id: &str, days: i64) -> Listing {
    let mut listing = complete_listing(id);
    listing.created_at = now() - Duration::days(days);
    listing
}

pub(super) fn active_boost(listing: &Listing, multiplier: f64) -> BoostState {
    BoostState {
        listing_id: listing.id.clone(),
        multiplier,
        activated_at: now() - Duration::days(1),
        expires_at: now() + Duration::days(6),
    }
}

pub(super) fn expired_boost(listing: &Listing, multiplier: f64) -> BoostState {
    BoostState {
        listing_id: listing.id.clone(),
        multiplier,
        activated_at: now() - Duration::days(10),
        expires_at: now() - Duration::days(3),
    }
}

/// Profile that matches [`complete_listing`] on every criterion.
pub(super) fn matching_profile() -> ClientPreferenceProfile {
    ClientPreferenceProfile {
        budget_min: 300_000.0,
        budget_max: 400_000.0,
        property_types: [PropertyType::Apartment, PropertyType::Condo]
            .into_iter()
            .collect(),
        locations: tags(&["riverside"]),
        bedrooms: 2,
        amenities: tags(&["gym", "pool"]),
        lifestyle_tags: tags(&["urban"]),
    }
}
