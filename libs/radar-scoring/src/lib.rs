//! Trend scoring for the radar dashboard
//!
//! Turns market snapshots into bounded scores and short commentary:
//! - Trend score (-100..=100): blended 1h/24h momentum plus liquidity rotation
//! - Sector heat (-100..=100): category 24h change plus volume intensity
//!
//! Every function here is pure; callers decide when to recompute.

pub mod sector;
pub mod trend;
pub mod views;

pub use sector::{sector_heat_basis, sector_heat_narrative, sector_heat_score};
pub use trend::{
    compute_trend_score, is_new_and_exploding, momentum_reason, trend_label, TrendAssessment,
    TrendLabel,
};
pub use views::SortKey;

/// Clamp to [-100, 100] and round half away from zero.
/// NaN lands on 0 and infinities saturate at the bounds.
pub(crate) fn bounded_score(raw: f64) -> i32 {
    raw.clamp(-100.0, 100.0).round() as i32
}
