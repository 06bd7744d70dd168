//! Ranking score for listings, with optional time-limited boosts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BoostState, Listing, ListingId};

const RECENCY_CEILING: f64 = 50.0;
const RECENCY_WINDOW_DAYS: f64 = 30.0;
const COMPLETENESS_POINTS: f64 = 10.0;

/// Ranking score for a listing at `now`.
///
/// Recency contributes up to 50 points, decaying linearly to zero over
/// thirty days since `created_at`. Completeness contributes 10 points for
/// each populated optional field out of price, area, bedrooms, images, and
/// description. An active boost multiplies the base score.
///
/// Expiry is re-checked here rather than trusted from the caller's query
/// filter: a stale boost row must never move the visible rank.
pub fn score(listing: &Listing, boost: Option<&BoostState>, now: DateTime<Utc>) -> f64 {
    let base = recency_points(listing, now) + completeness_points(listing);
    match boost {
        Some(state) if state.is_active(now) => base * state.multiplier,
        _ => base,
    }
}

/// Scored entry produced by [`rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    pub listing_id: ListingId,
    pub score: f64,
    pub boosted: bool,
    pub created_at: DateTime<Utc>,
}

/// Score and order listings for display: descending final score, ties broken
/// by more recent `created_at`.
pub fn rank(entries: &[(Listing, Option<BoostState>)], now: DateTime<Utc>) -> Vec<RankedListing> {
    let mut ranked: Vec<RankedListing> = entries
        .iter()
        .map(|(listing, boost)| RankedListing {
            listing_id: listing.id.clone(),
            score: score(listing, boost.as_ref(), now),
            boosted: boost.as_ref().map_or(false, |state| state.is_active(now)),
            created_at: listing.created_at,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    ranked
}

fn recency_points(listing: &Listing, now: DateTime<Utc>) -> f64 {
    let age_days = (now - listing.created_at).num_seconds() as f64 / 86_400.0;
    let age_days = age_days.clamp(0.0, RECENCY_WINDOW_DAYS);
    RECENCY_CEILING * (1.0 - age_days / RECENCY_WINDOW_DAYS)
}

fn completeness_points(listing: &Listing) -> f64 {
    let mut populated = 0u8;
    if listing.price_amount > 0.0 {
        populated += 1;
    }
    if listing.area_sqm.is_some() {
        populated += 1;
    }
    if listing.bedrooms.is_some() {
        populated += 1;
    }
    if listing.image_count > 0 {
        populated += 1;
    }
    if listing
        .description
        .as_deref()
        .map_or(false, |text| !text.trim().is_empty())
    {
        populated += 1;
    }
    f64::from(populated) * COMPLETENESS_POINTS
}
