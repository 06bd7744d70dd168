//! Three-way commission split between the platform, the capturing agent,
//! and the selling agent.

use serde::{Deserialize, Serialize};

use super::domain::AgentId;
use super::RuleError;

const PLATFORM_RATE: f64 = 0.20;
const CAPTURER_RATE: f64 = 0.30;
const SELLER_RATE: f64 = 0.50;
const SAME_AGENT_RATE: f64 = 0.80;

/// Commission shares in integer cents.
///
/// The three shares always sum exactly to `total_cents`; rounding residue is
/// pushed onto the largest share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSplit {
    pub total_cents: i64,
    pub platform_cents: i64,
    pub capturer_cents: i64,
    pub seller_cents: i64,
    /// Capturing and selling agent are the same payee. The capturer share
    /// then carries the full 80% remainder and `seller_cents` is zero, so
    /// display layers can render a single 80% line.
    pub same_agent: bool,
}

impl CommissionSplit {
    pub fn total_amount(&self) -> f64 {
        cents_to_amount(self.total_cents)
    }

    pub fn platform_amount(&self) -> f64 {
        cents_to_amount(self.platform_cents)
    }

    pub fn capturer_amount(&self) -> f64 {
        cents_to_amount(self.capturer_cents)
    }

    pub fn seller_amount(&self) -> f64 {
        cents_to_amount(self.seller_cents)
    }
}

/// Split a sale's commission: 20% platform, then 30%/50% between capturer
/// and seller, or the full 80% to a single agent who did both.
pub fn split(
    sale_amount: f64,
    commission_percent: f64,
    capturing_agent: &AgentId,
    selling_agent: &AgentId,
) -> Result<CommissionSplit, RuleError> {
    if !sale_amount.is_finite() || sale_amount <= 0.0 {
        return Err(RuleError::InvalidSaleAmount(sale_amount));
    }
    if !commission_percent.is_finite() || commission_percent <= 0.0 || commission_percent > 100.0 {
        return Err(RuleError::InvalidCommissionPercent(commission_percent));
    }

    let total_cents = to_cents(sale_amount * commission_percent / 100.0);
    let platform_cents = round_share(total_cents, PLATFORM_RATE);
    let same_agent = capturing_agent == selling_agent;

    let (capturer_cents, seller_cents) = if same_agent {
        (round_share(total_cents, SAME_AGENT_RATE), 0)
    } else {
        (
            round_share(total_cents, CAPTURER_RATE),
            round_share(total_cents, SELLER_RATE),
        )
    };

    let mut result = CommissionSplit {
        total_cents,
        platform_cents,
        capturer_cents,
        seller_cents,
        same_agent,
    };
    reconcile(&mut result);
    Ok(result)
}

fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

// All inputs are positive, so f64::round (half away from zero) is half-up.
fn round_share(total_cents: i64, rate: f64) -> i64 {
    (total_cents as f64 * rate).round() as i64
}

// Adjust the largest share by the residual so the parts sum to the total.
fn reconcile(result: &mut CommissionSplit) {
    let residual =
        result.total_cents - (result.platform_cents + result.capturer_cents + result.seller_cents);
    if residual == 0 {
        return;
    }

    if result.capturer_cents >= result.seller_cents && result.capturer_cents >= result.platform_cents
    {
        result.capturer_cents += residual;
    } else if result.seller_cents >= result.platform_cents {
        result.seller_cents += residual;
    } else {
        result.platform_cents += residual;
    }
}
