//! Experience leveling and achievement badges.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::AchievementCounters;

const POINTS_PER_LEVEL: u64 = 1000;

/// Snapshot of an agent's position on the experience ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u64,
    pub points_into_level: u64,
    pub points_to_next_level: u64,
    pub progress_percent: f64,
}

/// Derive level standing from cumulative points.
///
/// Level 1 starts at zero points, level 2 at 1000, and so on without a cap.
/// The level is recomputed from the ledger on every call and never stored.
pub fn level_info(total_points: u64) -> LevelInfo {
    let points_into_level = total_points % POINTS_PER_LEVEL;
    LevelInfo {
        level: total_points / POINTS_PER_LEVEL + 1,
        points_into_level,
        points_to_next_level: POINTS_PER_LEVEL - points_into_level,
        progress_percent: points_into_level as f64 / 10.0,
    }
}

/// Achievement badges with pure unlock predicates over activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    FirstProperty,
    DealCloser,
    Prospector,
    Networker,
    PowerSeller,
    Promoter,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::FirstProperty,
        Badge::DealCloser,
        Badge::Prospector,
        Badge::Networker,
        Badge::PowerSeller,
        Badge::Promoter,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Badge::FirstProperty => "first-property",
            Badge::DealCloser => "deal-closer",
            Badge::Prospector => "prospector",
            Badge::Networker => "networker",
            Badge::PowerSeller => "power-seller",
            Badge::Promoter => "promoter",
        }
    }

    const fn unlocked(self, counters: &AchievementCounters) -> bool {
        match self {
            Badge::FirstProperty => counters.properties_listed >= 1,
            Badge::DealCloser => counters.contracts_closed >= 3,
            Badge::Prospector => counters.proposals_sent >= 10,
            Badge::Networker => counters.clients_registered >= 5,
            Badge::PowerSeller => counters.contracts_closed >= 10,
            Badge::Promoter => counters.boosts_activated >= 5,
        }
    }
}

/// Every badge whose predicate holds for the counters snapshot.
///
/// The engine holds no notion of "new": callers diff the result against the
/// set they last stored, via [`newly_unlocked`].
pub fn unlocked_badges(counters: &AchievementCounters) -> BTreeSet<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|badge| badge.unlocked(counters))
        .collect()
}

/// Caller-side diff: badges unlocked now that were not previously stored.
pub fn newly_unlocked(current: &BTreeSet<Badge>, known: &BTreeSet<Badge>) -> BTreeSet<Badge> {
    current.difference(known).copied().collect()
}
