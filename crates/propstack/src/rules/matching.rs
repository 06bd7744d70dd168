//! Compatibility scoring between a client preference profile and a listing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{ClientPreferenceProfile, Listing};
use super::RuleError;

const BUDGET_WEIGHT: f64 = 30.0;
const LOCATION_WEIGHT: f64 = 25.0;
const TYPE_WEIGHT: f64 = 20.0;
const BEDROOM_WEIGHT: f64 = 10.0;
const AMENITY_WEIGHT: f64 = 10.0;
const LIFESTYLE_WEIGHT: f64 = 5.0;

const OVER_BUDGET_TOLERANCE: f64 = 1.10;
const OVER_BUDGET_CREDIT: f64 = 0.70;

/// Sub-criteria that can contribute to a match.
///
/// `MatchScore::reasons` lists contributors in this declaration order; the
/// ordering is part of the contract, not incidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    BudgetFit,
    LocationFit,
    TypeFit,
    BedroomFit,
    AmenityFit,
    LifestyleFit,
}

impl MatchReason {
    pub const fn label(self) -> &'static str {
        match self {
            MatchReason::BudgetFit => "budget_fit",
            MatchReason::LocationFit => "location_fit",
            MatchReason::TypeFit => "type_fit",
            MatchReason::BedroomFit => "bedroom_fit",
            MatchReason::AmenityFit => "amenity_fit",
            MatchReason::LifestyleFit => "lifestyle_fit",
        }
    }
}

/// Display tier derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Excellent,
    Great,
    Good,
    Basic,
}

impl RecommendationTier {
    pub const fn for_score(score: u8) -> Self {
        if score >= 90 {
            RecommendationTier::Excellent
        } else if score >= 75 {
            RecommendationTier::Great
        } else if score >= 60 {
            RecommendationTier::Good
        } else {
            RecommendationTier::Basic
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RecommendationTier::Excellent => "excellent",
            RecommendationTier::Great => "great",
            RecommendationTier::Good => "good",
            RecommendationTier::Basic => "basic",
        }
    }
}

/// Weighted match between a profile and a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8,
    pub reasons: Vec<MatchReason>,
    pub tier: RecommendationTier,
}

/// Score a listing against a client profile.
///
/// Weighted additive model, weights summing to 100: budget 30, location 25,
/// property type 20, bedrooms 10, amenities 10, lifestyle 5. The final score
/// is clamped to [0, 100] and rounded to the nearest integer. `reasons`
/// holds every sub-criterion that contributed non-zero weight, in
/// [`MatchReason`] declaration order.
pub fn score(
    profile: &ClientPreferenceProfile,
    listing: &Listing,
) -> Result<MatchScore, RuleError> {
    profile.validate()?;

    let contributions = [
        (MatchReason::BudgetFit, budget_fit(profile, listing)),
        (MatchReason::LocationFit, location_fit(profile, listing)),
        (MatchReason::TypeFit, type_fit(profile, listing)),
        (MatchReason::BedroomFit, bedroom_fit(profile, listing)),
        (MatchReason::AmenityFit, amenity_fit(profile, listing)),
        (MatchReason::LifestyleFit, lifestyle_fit(profile, listing)),
    ];

    let mut total = 0.0;
    let mut reasons = Vec::new();
    for (reason, points) in contributions {
        if points > 0.0 {
            reasons.push(reason);
            total += points;
        }
    }

    let score = total.clamp(0.0, 100.0).round() as u8;
    Ok(MatchScore {
        score,
        reasons,
        tier: RecommendationTier::for_score(score),
    })
}

/// Share of desired amenities present on the listing.
///
/// Fails with [`RuleError::DivisionGuardTriggered`] when the desired count
/// is zero; [`score`] pre-checks the set and credits zero instead of
/// failing, so an empty preference never surfaces as NaN or an error there.
pub fn amenity_ratio(matched: usize, desired: usize) -> Result<f64, RuleError> {
    if desired == 0 {
        return Err(RuleError::DivisionGuardTriggered(
            "desired amenity set is empty",
        ));
    }
    Ok(matched as f64 / desired as f64)
}

fn budget_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    let price = listing.price_amount;
    if price >= profile.budget_min && price <= profile.budget_max {
        BUDGET_WEIGHT
    } else if price <= profile.budget_max * OVER_BUDGET_TOLERANCE {
        BUDGET_WEIGHT * OVER_BUDGET_CREDIT
    } else {
        0.0
    }
}

fn location_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    let haystack = listing.location.to_lowercase();
    let hit = profile
        .locations
        .iter()
        .map(|wanted| wanted.trim().to_lowercase())
        .filter(|wanted| !wanted.is_empty())
        .any(|wanted| haystack.contains(&wanted));
    if hit {
        LOCATION_WEIGHT
    } else {
        0.0
    }
}

fn type_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    if profile.property_types.contains(&listing.property_type) {
        TYPE_WEIGHT
    } else {
        0.0
    }
}

fn bedroom_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    match listing.bedrooms {
        Some(bedrooms) if bedrooms == profile.bedrooms => BEDROOM_WEIGHT,
        Some(bedrooms) if bedrooms.abs_diff(profile.bedrooms) == 1 => BEDROOM_WEIGHT / 2.0,
        _ => 0.0,
    }
}

fn amenity_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    if profile.amenities.is_empty() {
        return 0.0;
    }

    let available: BTreeSet<String> = listing
        .amenities
        .iter()
        .map(|amenity| amenity.trim().to_lowercase())
        .collect();
    let matched = profile
        .amenities
        .iter()
        .filter(|wanted| available.contains(&wanted.trim().to_lowercase()))
        .count();

    match amenity_ratio(matched, profile.amenities.len()) {
        Ok(ratio) => AMENITY_WEIGHT * ratio,
        Err(_) => 0.0,
    }
}

fn lifestyle_fit(profile: &ClientPreferenceProfile, listing: &Listing) -> f64 {
    let available: BTreeSet<String> = listing
        .lifestyle_tags
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .collect();
    let hit = profile
        .lifestyle_tags
        .iter()
        .any(|wanted| available.contains(&wanted.trim().to_lowercase()));
    if hit {
        LIFESTYLE_WEIGHT
    } else {
        0.0
    }
}
