//! Trend score for a single coin
//!
//! Score = (1h * 1.5 + 24h * 0.6) * 0.4 + min(volume / mcap, 2) * 35,
//! clamped to [-100, 100] and rounded.

use std::fmt;

use radar_db::CoinMarket;
use serde::{Serialize, Serializer};

use crate::bounded_score;

const WEIGHT_1H: f64 = 1.5;
const WEIGHT_24H: f64 = 0.6;
const MOMENTUM_BLEND: f64 = 0.4;
const VOLUME_BLEND: f64 = 35.0;
const VOLUME_RATIO_CAP: f64 = 2.0;

// "New & exploding" band
const SMALL_CAP_FLOOR: f64 = 5_000_000.0;
const SMALL_CAP_CEILING: f64 = 400_000_000.0;
const EXPLODING_VOLUME_RATIO: f64 = 0.18;
const EXPLODING_CHANGE_24H: f64 = 12.0;

const QUIET_SESSION: &str = "Quiet session with balanced flows.";

/// Calculate the trend score (-100..=100) for a coin
pub fn compute_trend_score(coin: &CoinMarket) -> i32 {
    let momentum = coin.change_1h() * WEIGHT_1H + coin.change_24h() * WEIGHT_24H;
    // Cap so illiquid caps with wash volume cannot dominate
    let vol_ratio = coin.volume_ratio().min(VOLUME_RATIO_CAP);

    bounded_score(momentum * MOMENTUM_BLEND + vol_ratio * VOLUME_BLEND)
}

/// Qualitative band of a trend score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendLabel {
    ExplodingMomentum,
    StrongUptrend,
    MildBullishBias,
    Sideways,
    MildSellingPressure,
    StrongDowntrend,
    Capitulation,
}

impl TrendLabel {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 70 => TrendLabel::ExplodingMomentum,
            s if s >= 40 => TrendLabel::StrongUptrend,
            s if s >= 15 => TrendLabel::MildBullishBias,
            s if s > -15 => TrendLabel::Sideways,
            s if s > -40 => TrendLabel::MildSellingPressure,
            s if s > -70 => TrendLabel::StrongDowntrend,
            _ => TrendLabel::Capitulation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::ExplodingMomentum => "Exploding momentum",
            TrendLabel::StrongUptrend => "Strong uptrend",
            TrendLabel::MildBullishBias => "Mild bullish bias",
            TrendLabel::Sideways => "Sideways / indecisive",
            TrendLabel::MildSellingPressure => "Mild selling pressure",
            TrendLabel::StrongDowntrend => "Strong downtrend",
            TrendLabel::Capitulation => "Capitulation / blow-off",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TrendLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Human-readable label for a trend score
pub fn trend_label(score: i32) -> &'static str {
    TrendLabel::from_score(score).as_str()
}

/// One-sentence explanation of what drives a coin's move
///
/// The volume clause reads the uncapped ratio, so it can call out extreme
/// volume even when the score has saturated.
pub fn momentum_reason(coin: &CoinMarket) -> String {
    let mut pieces: Vec<&'static str> = Vec::with_capacity(3);

    let one_h = match coin.change_1h() {
        p if p > 3.0 => Some("sharp 1h momentum"),
        p if p > 0.5 => Some("steady 1h bid"),
        p if p < -3.0 => Some("heavy 1h sell-off"),
        p if p < -0.5 => Some("soft intraday selling"),
        _ => None,
    };
    pieces.extend(one_h);

    let day = match coin.change_24h() {
        p if p > 8.0 => Some("strong 24h trend"),
        p if p > 3.0 => Some("constructive 24h move"),
        p if p < -8.0 => Some("deep daily drawdown"),
        p if p < -3.0 => Some("persistent daily weakness"),
        _ => None,
    };
    pieces.extend(day);

    let volume = match coin.volume_ratio() {
        r if r > 0.25 => Some("unusually high volume vs. market cap"),
        r if r > 0.12 => Some("healthy liquidity rotation"),
        r if r < 0.03 => Some("thin liquidity"),
        _ => None,
    };
    pieces.extend(volume);

    if pieces.is_empty() {
        return QUIET_SESSION.to_string();
    }
    format!("{}.", pieces.join(", "))
}

/// Small/mid cap with abnormal volume and a strong daily gain
pub fn is_new_and_exploding(coin: &CoinMarket) -> bool {
    let mc = coin.market_cap;
    let is_low_mid_cap = mc > SMALL_CAP_FLOOR && mc < SMALL_CAP_CEILING;

    is_low_mid_cap
        && coin.volume_ratio() > EXPLODING_VOLUME_RATIO
        && coin.change_24h() > EXPLODING_CHANGE_24H
}

/// Everything the dashboard shows about one coin's trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAssessment {
    pub score: i32,
    pub label: TrendLabel,
    pub reason: String,
    pub new_and_exploding: bool,
}

impl TrendAssessment {
    pub fn assess(coin: &CoinMarket) -> Self {
        let score = compute_trend_score(coin);
        Self {
            score,
            label: TrendLabel::from_score(score),
            reason: momentum_reason(coin),
            new_and_exploding: is_new_and_exploding(coin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(one_h: Option<f64>, day: Option<f64>, volume: f64, market_cap: f64) -> CoinMarket {
        CoinMarket {
            id: "test".into(),
            symbol: "tst".into(),
            name: "Test".into(),
            price_change_pct_1h: one_h,
            price_change_pct_24h: day,
            total_volume: volume,
            market_cap,
            ..Default::default()
        }
    }

    #[test]
    fn test_mild_bullish_coin() {
        let c = coin(Some(5.0), Some(10.0), 50_000_000.0, 100_000_000.0);

        // momentum 13.5, ratio 0.5 -> 5.4 + 17.5 = 22.9
        let score = compute_trend_score(&c);
        assert_eq!(score, 23);
        assert_eq!(trend_label(score), "Mild bullish bias");
    }

    #[test]
    fn test_empty_coin() {
        let c = coin(None, None, 0.0, 0.0);

        assert_eq!(compute_trend_score(&c), 0);
        assert_eq!(trend_label(0), "Sideways / indecisive");
        // a zero ratio still reads as thin liquidity
        assert_eq!(momentum_reason(&c), "thin liquidity.");
    }

    #[test]
    fn test_quiet_session() {
        let c = coin(Some(0.2), Some(-1.0), 5_000_000.0, 100_000_000.0);

        assert_eq!(momentum_reason(&c), "Quiet session with balanced flows.");
    }

    #[test]
    fn test_reason_all_groups() {
        let c = coin(Some(4.0), Some(9.0), 30_000_000.0, 100_000_000.0);

        assert_eq!(
            momentum_reason(&c),
            "sharp 1h momentum, strong 24h trend, unusually high volume vs. market cap."
        );
    }

    #[test]
    fn test_reason_negative_side() {
        let heavy = coin(Some(-3.5), Some(-9.0), 1_000_000.0, 100_000_000.0);
        assert_eq!(
            momentum_reason(&heavy),
            "heavy 1h sell-off, deep daily drawdown, thin liquidity."
        );

        let soft = coin(Some(-1.0), Some(-4.0), 15_000_000.0, 100_000_000.0);
        assert_eq!(
            momentum_reason(&soft),
            "soft intraday selling, persistent daily weakness, healthy liquidity rotation."
        );

        let steady = coin(Some(1.0), Some(4.0), 5_000_000.0, 100_000_000.0);
        assert_eq!(momentum_reason(&steady), "steady 1h bid, constructive 24h move.");
    }

    #[test]
    fn test_reason_uses_uncapped_ratio() {
        // 10x volume saturates the score's ratio at 2 but still reads as high volume
        let c = coin(Some(0.0), Some(0.0), 1_000_000_000.0, 100_000_000.0);

        assert_eq!(compute_trend_score(&c), 70);
        assert_eq!(momentum_reason(&c), "unusually high volume vs. market cap.");
    }

    #[test]
    fn test_score_bounds() {
        let extremes = [-1e12, -500.0, -3.0, 0.0, 3.0, 500.0, 1e12];
        let volumes = [0.0, 1.0, 1e6, 1e12];
        let caps = [0.0, 1.0, 1e6, 1e12];

        for &one_h in &extremes {
            for &day in &extremes {
                for &volume in &volumes {
                    for &cap in &caps {
                        let score = compute_trend_score(&coin(Some(one_h), Some(day), volume, cap));
                        assert!((-100..=100).contains(&score), "score {score} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_non_decreasing_in_1h() {
        let mut previous = i32::MIN;
        let mut one_h = -100.0;

        while one_h <= 100.0 {
            let score = compute_trend_score(&coin(Some(one_h), Some(2.0), 8_000_000.0, 100_000_000.0));
            assert!(score >= previous, "score dropped at 1h = {one_h}");
            previous = score;
            one_h += 0.25;
        }
    }

    #[test]
    fn test_non_finite_input_stays_in_range() {
        assert_eq!(compute_trend_score(&coin(Some(f64::NAN), None, 0.0, 1.0)), 0);
        assert_eq!(compute_trend_score(&coin(Some(f64::INFINITY), None, 0.0, 1.0)), 100);
        assert_eq!(compute_trend_score(&coin(None, Some(f64::NEG_INFINITY), 0.0, 1.0)), -100);
    }

    #[test]
    fn test_labels_partition_score_range() {
        let mut labels = Vec::new();
        for score in -100..=100 {
            let label = TrendLabel::from_score(score);
            if labels.last() != Some(&label) {
                assert!(!labels.contains(&label), "{label} band is not contiguous");
                labels.push(label);
            }
        }

        assert_eq!(
            labels,
            vec![
                TrendLabel::Capitulation,
                TrendLabel::StrongDowntrend,
                TrendLabel::MildSellingPressure,
                TrendLabel::Sideways,
                TrendLabel::MildBullishBias,
                TrendLabel::StrongUptrend,
                TrendLabel::ExplodingMomentum,
            ]
        );
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(trend_label(70), "Exploding momentum");
        assert_eq!(trend_label(69), "Strong uptrend");
        assert_eq!(trend_label(40), "Strong uptrend");
        assert_eq!(trend_label(39), "Mild bullish bias");
        assert_eq!(trend_label(15), "Mild bullish bias");
        assert_eq!(trend_label(14), "Sideways / indecisive");
        assert_eq!(trend_label(-14), "Sideways / indecisive");
        assert_eq!(trend_label(-15), "Mild selling pressure");
        assert_eq!(trend_label(-39), "Mild selling pressure");
        assert_eq!(trend_label(-40), "Strong downtrend");
        assert_eq!(trend_label(-69), "Strong downtrend");
        assert_eq!(trend_label(-70), "Capitulation / blow-off");
        assert_eq!(trend_label(-100), "Capitulation / blow-off");
    }

    #[test]
    fn test_new_and_exploding() {
        let c = coin(None, Some(15.0), 10_000_000.0, 50_000_000.0);
        assert!(is_new_and_exploding(&c));

        // each condition on its own edge
        assert!(!is_new_and_exploding(&coin(None, Some(12.0), 10_000_000.0, 50_000_000.0)));
        assert!(!is_new_and_exploding(&coin(None, Some(15.0), 9_000_000.0, 50_000_000.0)));
    }

    #[test]
    fn test_new_and_exploding_cap_band() {
        for cap in [0.0, 1_000_000.0, 5_000_000.0, 400_000_000.0, 2_000_000_000.0] {
            let c = coin(Some(50.0), Some(90.0), cap * 10.0 + 1e9, cap);
            assert!(!is_new_and_exploding(&c), "cap {cap} should be outside the band");
        }
    }

    #[test]
    fn test_assessment() {
        let c = coin(Some(4.0), Some(15.0), 40_000_000.0, 100_000_000.0);
        let assessment = TrendAssessment::assess(&c);

        // momentum 15 -> 6, ratio 0.4 -> 14
        assert_eq!(assessment.score, 20);
        assert_eq!(assessment.label, TrendLabel::MildBullishBias);
        assert!(assessment.new_and_exploding);
        assert!(assessment.reason.starts_with("sharp 1h momentum"));
    }
}
