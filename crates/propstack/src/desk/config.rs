use serde::{Deserialize, Serialize};

const DEFAULT_RANK_PAGE_SIZE: usize = 20;
const DEFAULT_SELLER_CLOSE_XP: u64 = 200;
const DEFAULT_CAPTURER_CLOSE_XP: u64 = 100;

/// Tuning knobs for the deal-desk service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Default page size for ranked listings and recommendations.
    pub rank_page_size: usize,
    /// Experience awarded to the selling agent when a sale closes.
    pub seller_close_xp: u64,
    /// Experience awarded to the capturing agent when a sale closes.
    pub capturer_close_xp: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            rank_page_size: DEFAULT_RANK_PAGE_SIZE,
            seller_close_xp: DEFAULT_SELLER_CLOSE_XP,
            capturer_close_xp: DEFAULT_CAPTURER_CLOSE_XP,
        }
    }
}
