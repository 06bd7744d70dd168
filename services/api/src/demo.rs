use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;

use propstack::desk::{DealDeskService, DeskConfig, SaleSubmission};
use propstack::error::AppError;
use propstack::rules::domain::{
    AchievementCounters, AgentId, BoostState, ClientId, ClientPreferenceProfile, Listing,
    ListingId, ListingOrigin, PriceTier, PropertyType,
};

use crate::infra::{parse_date, start_of_day, InMemoryMarket, InMemoryProgress, InMemoryWallet};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for ranking (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Starting credit balance for the demo client.
    #[arg(long, default_value_t = 10)]
    pub(crate) credits: u32,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.today.map(start_of_day).unwrap_or_else(Utc::now);

    let market = Arc::new(InMemoryMarket::default());
    let wallet = Arc::new(InMemoryWallet::default());
    let progress = Arc::new(InMemoryProgress::default());
    seed_market(&market, now);

    let client = ClientId("demo-client".to_string());
    wallet.open_account(client.clone(), args.credits);
    progress.seed_counters(
        AgentId("demo-agent".to_string()),
        AchievementCounters {
            properties_listed: 3,
            contracts_closed: 2,
            ..Default::default()
        },
    );

    let service = DealDeskService::new(market, wallet, progress, DeskConfig::default());

    println!("PropStack deal desk demo");
    println!("\nRanked listings ({}):", now.date_naive());
    for (position, entry) in service
        .ranked_listings(now, None)
        .map_err(AppError::from)?
        .iter()
        .enumerate()
    {
        let marker = if entry.boosted { " [boosted]" } else { "" };
        println!(
            "  {}. {} score {:.1}{marker}",
            position + 1,
            entry.listing_id.0,
            entry.score
        );
    }

    let quote = service
        .quote_action(&ListingId("harbor-204".to_string()))
        .map_err(AppError::from)?;
    println!("\nActing on {} costs {} credit(s)", quote.listing_id.0, quote.cost);

    let receipt = service
        .spend_credits(&client, &quote.listing_id)
        .map_err(AppError::from)?;
    println!(
        "{} spent {} credit(s), {} remaining",
        client.0, receipt.cost, receipt.remaining
    );

    let matched = service
        .match_client(&client, &ListingId("harbor-204".to_string()))
        .map_err(AppError::from)?;
    println!(
        "\nMatch for {}: {}/100 ({})",
        matched.listing_id.0,
        matched.result.score,
        matched.result.tier.label()
    );
    for reason in &matched.result.reasons {
        println!("  - {}", reason.label());
    }

    let outcome = service
        .record_sale(
            SaleSubmission {
                listing_id: ListingId("harbor-204".to_string()),
                sale_amount: 500_000.0,
                commission_percent: 6.0,
                capturing_agent_id: AgentId("demo-agent".to_string()),
                selling_agent_id: AgentId("demo-agent".to_string()),
            },
            now,
        )
        .map_err(AppError::from)?;
    let split = &outcome.record.split;
    println!("\nCommission split on a 500,000.00 sale at 6%:");
    println!("  platform  {:>12.2}", split.platform_amount());
    println!("  capturer  {:>12.2}", split.capturer_amount());
    println!("  seller    {:>12.2}", split.seller_amount());
    if split.same_agent {
        println!("  (single agent captured and sold: 80% share)");
    }

    let standing = service
        .agent_progress(&AgentId("demo-agent".to_string()))
        .map_err(AppError::from)?;
    println!(
        "\nAgent progress: level {}, {} points to next level",
        standing.level.level, standing.level.points_to_next_level
    );
    for badge in &standing.newly_unlocked {
        println!("  new badge: {}", badge.label());
    }

    Ok(())
}

fn seed_market(market: &InMemoryMarket, now: DateTime<Utc>) {
    let harbor = Listing {
        id: ListingId("harbor-204".to_string()),
        price_amount: 480_000.0,
        origin: ListingOrigin::AgentCaptured,
        price_tier: PriceTier::High,
        property_type: PropertyType::Apartment,
        location: "Harbor Quarter".to_string(),
        bedrooms: Some(3),
        area_sqm: Some(104.0),
        image_count: 14,
        description: Some("Corner apartment over the marina".to_string()),
        amenities: ["parking", "elevator", "gym"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        lifestyle_tags: ["family", "waterfront"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        created_at: now - Duration::days(3),
    };

    let midtown = Listing {
        id: ListingId("midtown-77".to_string()),
        price_amount: 310_000.0,
        origin: ListingOrigin::Platform,
        price_tier: PriceTier::Medium,
        property_type: PropertyType::Condo,
        location: "Midtown".to_string(),
        bedrooms: Some(2),
        area_sqm: Some(71.0),
        image_count: 6,
        description: Some("Walkable two-bedroom condo".to_string()),
        amenities: ["gym"].iter().map(|s| s.to_string()).collect(),
        lifestyle_tags: ["urban"].iter().map(|s| s.to_string()).collect(),
        created_at: now - Duration::days(12),
    };

    let import = Listing {
        id: ListingId("import-9".to_string()),
        price_amount: 150_000.0,
        origin: ListingOrigin::ExternalImport,
        price_tier: PriceTier::Low,
        property_type: PropertyType::Land,
        location: "Inland Plains".to_string(),
        bedrooms: None,
        area_sqm: None,
        image_count: 0,
        description: None,
        amenities: Default::default(),
        lifestyle_tags: Default::default(),
        created_at: now - Duration::days(25),
    };

    let boost = BoostState {
        listing_id: midtown.id.clone(),
        multiplier: 1.6,
        activated_at: now - Duration::days(1),
        expires_at: now + Duration::days(5),
    };

    market.add_listing(harbor, None);
    market.add_listing(midtown, Some(boost));
    market.add_listing(import, None);

    market.add_profile(
        ClientId("demo-client".to_string()),
        ClientPreferenceProfile {
            budget_min: 300_000.0,
            budget_max: 500_000.0,
            property_types: [PropertyType::Apartment, PropertyType::Condo]
                .into_iter()
                .collect(),
            locations: ["harbor"].iter().map(|s| s.to_string()).collect(),
            bedrooms: 3,
            amenities: ["parking", "gym"].iter().map(|s| s.to_string()).collect(),
            lifestyle_tags: ["family"].iter().map(|s| s.to_string()).collect(),
        },
    );
}
