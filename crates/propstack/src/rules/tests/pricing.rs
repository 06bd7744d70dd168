use crate::rules::domain::{ListingOrigin, PriceTier};
use crate::rules::pricing::{credit_cost, credit_cost_for};
use crate::rules::RuleError;

use super::common::complete_listing;

const ORIGINS: [ListingOrigin; 3] = [
    ListingOrigin::Platform,
    ListingOrigin::AgentCaptured,
    ListingOrigin::ExternalImport,
];
const TIERS: [PriceTier; 3] = [PriceTier::Low, PriceTier::Medium, PriceTier::High];

#[test]
fn table_matches_published_policy() {
    assert_eq!(credit_cost(ListingOrigin::Platform, PriceTier::Low), 1);
    assert_eq!(credit_cost(ListingOrigin::Platform, PriceTier::High), 3);
    assert_eq!(credit_cost(ListingOrigin::AgentCaptured, PriceTier::Medium), 3);
    assert_eq!(credit_cost(ListingOrigin::ExternalImport, PriceTier::High), 5);
}

#[test]
fn every_cost_is_at_least_one_credit() {
    for origin in ORIGINS {
        for tier in TIERS {
            assert!(credit_cost(origin, tier) >= 1);
        }
    }
}

#[test]
fn cost_is_monotone_across_tiers_for_fixed_origin() {
    for origin in ORIGINS {
        let costs: Vec<u8> = TIERS.iter().map(|tier| credit_cost(origin, *tier)).collect();
        assert!(
            costs.windows(2).all(|pair| pair[0] <= pair[1]),
            "tier costs decreased for {origin:?}: {costs:?}"
        );
    }
}

#[test]
fn cost_is_monotone_across_origins_for_fixed_tier() {
    for tier in TIERS {
        let costs: Vec<u8> = ORIGINS
            .iter()
            .map(|origin| credit_cost(*origin, tier))
            .collect();
        assert!(
            costs.windows(2).all(|pair| pair[0] <= pair[1]),
            "origin costs decreased for {tier:?}: {costs:?}"
        );
    }
}

#[test]
fn listing_wrapper_reads_origin_and_tier() {
    let listing = complete_listing("price-1");
    assert_eq!(
        credit_cost_for(&listing),
        credit_cost(listing.origin, listing.price_tier)
    );
}

#[test]
fn unknown_origin_tag_is_rejected() {
    match ListingOrigin::parse("portal_scrape") {
        Err(RuleError::InvalidPricingInput(detail)) => {
            assert!(detail.contains("portal_scrape"));
        }
        other => panic!("expected InvalidPricingInput, got {other:?}"),
    }
}

#[test]
fn unknown_tier_tag_is_rejected() {
    assert!(matches!(
        PriceTier::parse("luxury"),
        Err(RuleError::InvalidPricingInput(_))
    ));
}

#[test]
fn labels_round_trip_through_parse() {
    for origin in ORIGINS {
        assert_eq!(ListingOrigin::parse(origin.label()), Ok(origin));
    }
    for tier in TIERS {
        assert_eq!(PriceTier::parse(tier.label()), Ok(tier));
    }
}
