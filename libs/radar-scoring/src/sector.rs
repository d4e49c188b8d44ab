//! Sector heat for category aggregates

use crate::bounded_score;

const CHANGE_WEIGHT: f64 = 1.2;
const VOLUME_WEIGHT: f64 = 25.0;

const BALANCED_FLOWS: &str = "Flows are balanced; no dominant risk-on or risk-off signal.";

/// Heat score (-100..=100) from a category's 24h change and volume / mcap ratio
pub fn sector_heat_score(avg_change_24h: f64, vol_ratio: f64) -> i32 {
    bounded_score(avg_change_24h * CHANGE_WEIGHT + vol_ratio * VOLUME_WEIGHT)
}

/// Commentary sentences behind a sector's heat, never empty
pub fn sector_heat_basis(avg_change: f64, vol_ratio: f64) -> Vec<&'static str> {
    let mut basis = Vec::with_capacity(2);

    let breadth = match avg_change {
        c if c > 6.0 => Some("Sector posting strong green across majors."),
        c if c > 2.0 => Some("Moderate positive drift with constructive breadth."),
        c if c < -6.0 => Some("Broad heavy selling with little dip-buying so far."),
        c if c < -2.0 => Some("Soft red session driven by de-risking."),
        _ => None,
    };
    basis.extend(breadth);

    let flows = match vol_ratio {
        r if r > 0.18 => Some("Volume is expanding aggressively vs. market cap."),
        r if r > 0.1 => Some("Liquidity is rotating steadily into this theme."),
        r if r < 0.03 => Some("Flows are muted; theme may be resting."),
        _ => None,
    };
    basis.extend(flows);

    if basis.is_empty() {
        basis.push(BALANCED_FLOWS);
    }
    basis
}

/// [`sector_heat_basis`] as one paragraph
pub fn sector_heat_narrative(avg_change: f64, vol_ratio: f64) -> String {
    sector_heat_basis(avg_change, vol_ratio).join(" ")
}
