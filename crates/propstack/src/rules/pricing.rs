//! Credit pricing for acting on a listing (propose / apply).

use super::domain::{Listing, ListingOrigin, PriceTier};

/// Credit cost to act on a listing with the given origin and tier.
///
/// Fixed policy table. Costs are monotone along both axes: tier low through
/// high, and origin platform through external import.
pub const fn credit_cost(origin: ListingOrigin, tier: PriceTier) -> u8 {
    match (origin, tier) {
        (ListingOrigin::Platform, PriceTier::Low) => 1,
        (ListingOrigin::Platform, PriceTier::Medium) => 2,
        (ListingOrigin::Platform, PriceTier::High) => 3,
        (ListingOrigin::AgentCaptured, PriceTier::Low) => 2,
        (ListingOrigin::AgentCaptured, PriceTier::Medium) => 3,
        (ListingOrigin::AgentCaptured, PriceTier::High) => 4,
        (ListingOrigin::ExternalImport, PriceTier::Low) => 3,
        (ListingOrigin::ExternalImport, PriceTier::Medium) => 4,
        (ListingOrigin::ExternalImport, PriceTier::High) => 5,
    }
}

/// Convenience wrapper reading the origin and tier off a listing record.
pub fn credit_cost_for(listing: &Listing) -> u8 {
    credit_cost(listing.origin, listing.price_tier)
}
