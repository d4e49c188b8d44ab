//! Ranked and filtered lists built on the scores
//!
//! These back the dashboard panels: trending table, new & exploding,
//! daily focus, sector heatmap, watchlist and search.

use radar_db::{Category, CoinMarket, Watchlist};
use serde::Serialize;

use crate::{
    sector::{sector_heat_narrative, sector_heat_score},
    trend::{compute_trend_score, is_new_and_exploding, momentum_reason, TrendLabel},
};

pub mod limits {
    pub const TRENDING: usize = 40;
    pub const NEW_AND_EXPLODING: usize = 8;
    pub const DAILY_FOCUS: usize = 3;
    pub const SECTORS: usize = 12;
    pub const SEARCH: usize = 20;
    /// Coins listed before the user types anything
    pub const SEARCH_EMPTY_QUERY: usize = 30;
}

/// Minimum 1h change for the daily focus panel
const FOCUS_MIN_CHANGE_1H: f64 = 1.0;
/// 1h move that earns a watchlist badge, either direction
const BADGE_CHANGE_1H: f64 = 3.0;

/// Ordering of the trending table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Score,
    Volume,
    MarketCap,
}

impl SortKey {
    /// Parse a query parameter, unknown keys rank by score
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("volume") => SortKey::Volume,
            Some("mcap") => SortKey::MarketCap,
            _ => SortKey::Score,
        }
    }
}

/// A coin with its trend score, label and reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCoin {
    pub coin: CoinMarket,
    pub score: i32,
    pub label: TrendLabel,
    pub reason: String,
}

impl ScoredCoin {
    pub fn new(coin: CoinMarket) -> Self {
        let score = compute_trend_score(&coin);
        let reason = momentum_reason(&coin);
        Self {
            coin,
            score,
            label: TrendLabel::from_score(score),
            reason,
        }
    }
}

/// Trending table: every coin scored, sorted descending, truncated
pub fn rank_trending(markets: &[CoinMarket], sort_key: SortKey, limit: usize) -> Vec<ScoredCoin> {
    let mut scored: Vec<ScoredCoin> = markets.iter().cloned().map(ScoredCoin::new).collect();

    match sort_key {
        SortKey::Score => scored.sort_by(|a, b| b.score.cmp(&a.score)),
        SortKey::Volume => {
            scored.sort_by(|a, b| b.coin.total_volume.total_cmp(&a.coin.total_volume))
        }
        SortKey::MarketCap => {
            scored.sort_by(|a, b| b.coin.market_cap.total_cmp(&a.coin.market_cap))
        }
    }

    scored.truncate(limit);
    scored
}

/// Speculative small cap flagged by [`is_new_and_exploding`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplodingCoin {
    pub coin: CoinMarket,
    pub score: i32,
    pub vol_ratio: f64,
}

/// New & exploding panel, in listing order
pub fn new_and_exploding(markets: &[CoinMarket], limit: usize) -> Vec<ExplodingCoin> {
    markets
        .iter()
        .filter(|c| is_new_and_exploding(c))
        .take(limit)
        .map(|c| ExplodingCoin {
            score: compute_trend_score(c),
            vol_ratio: c.volume_ratio(),
            coin: c.clone(),
        })
        .collect()
}

/// Daily focus panel: strongest coins among those up more than 1% this hour
pub fn daily_focus(markets: &[CoinMarket], limit: usize) -> Vec<ScoredCoin> {
    let mut picks: Vec<ScoredCoin> = markets
        .iter()
        .filter(|c| c.change_1h() > FOCUS_MIN_CHANGE_1H)
        .cloned()
        .map(ScoredCoin::new)
        .collect();

    picks.sort_by(|a, b| b.score.cmp(&a.score));
    picks.truncate(limit);
    picks
}

/// Heatmap tile for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorHeat {
    pub category: Category,
    pub avg_change: f64,
    pub vol_ratio: f64,
    pub heat: i32,
    pub basis: String,
}

impl SectorHeat {
    pub fn new(category: Category) -> Self {
        let avg_change = category.avg_change();
        let vol_ratio = category.volume_ratio();
        Self {
            heat: sector_heat_score(avg_change, vol_ratio),
            basis: sector_heat_narrative(avg_change, vol_ratio),
            avg_change,
            vol_ratio,
            category,
        }
    }
}

/// Sector heatmap: first `limit` categories in upstream order
pub fn sector_heatmap(categories: &[Category], limit: usize) -> Vec<SectorHeat> {
    categories
        .iter()
        .take(limit)
        .cloned()
        .map(SectorHeat::new)
        .collect()
}

/// Coins from the board whose logo is one of the category's top three
pub fn sector_members_fallback(category: &Category, markets: &[CoinMarket]) -> Vec<CoinMarket> {
    markets
        .iter()
        .filter(|c| {
            c.image
                .as_ref()
                .is_some_and(|image| category.top_3_coins.contains(image))
        })
        .cloned()
        .collect()
}

/// Coins whose name or symbol contains the query, case-insensitive.
///
/// A blank query lists the board head, never more than
/// `SEARCH_EMPTY_QUERY` coins. Without a limit a query returns up to `SEARCH`.
pub fn search(markets: &[CoinMarket], query: &str, limit: Option<usize>) -> Vec<CoinMarket> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        let limit = limit.map_or(limits::SEARCH_EMPTY_QUERY, |l| l.min(limits::SEARCH_EMPTY_QUERY));
        return markets.iter().take(limit).cloned().collect();
    }

    markets
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q) || c.symbol.to_lowercase().contains(&q))
        .take(limit.unwrap_or(limits::SEARCH))
        .cloned()
        .collect()
}

/// Marker next to a watched coin with a big hourly move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchBadge {
    Hot,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchRow {
    pub coin: CoinMarket,
    pub badge: Option<WatchBadge>,
}

/// Watched coins present on the board, in board order
pub fn watchlist_rows(markets: &[CoinMarket], watchlist: &Watchlist) -> Vec<WatchRow> {
    markets
        .iter()
        .filter(|c| watchlist.contains(&c.id))
        .map(|c| {
            let badge = match c.change_1h() {
                p if p > BADGE_CHANGE_1H => Some(WatchBadge::Hot),
                p if p < -BADGE_CHANGE_1H => Some(WatchBadge::Warning),
                _ => None,
            };
            WatchRow {
                coin: c.clone(),
                badge,
            }
        })
        .collect()
}

/// "Just refreshed" for the first three seconds, then "{n}s ago"
pub fn refresh_label(seconds_since_update: i64) -> String {
    if seconds_since_update <= 3 {
        "Just refreshed".to_string()
    } else {
        format!("{}s ago", seconds_since_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, one_h: f64, day: f64, volume: f64, market_cap: f64) -> CoinMarket {
        CoinMarket {
            id: id.into(),
            symbol: id[..3.min(id.len())].into(),
            name: id.to_uppercase(),
            image: Some(format!("https://img/{id}.png")),
            current_price: 1.0,
            price_change_pct_1h: Some(one_h),
            price_change_pct_24h: Some(day),
            total_volume: volume,
            market_cap,
        }
    }

    fn board() -> Vec<CoinMarket> {
        vec![
            coin("bitcoin", 0.2, 1.0, 30e9, 1_200e9),
            coin("pepe", 6.0, 25.0, 90e6, 300e6),
            coin("ethereum", 1.5, 4.0, 15e9, 400e9),
            coin("dogwif", -4.0, -12.0, 20e6, 200e6),
            coin("tinycap", 2.0, 40.0, 3e6, 4e6),
        ]
    }

    #[test]
    fn test_rank_by_score() {
        let ranked = rank_trending(&board(), SortKey::Score, limits::TRENDING);

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].coin.id, "tinycap");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(ranked[0].label, TrendLabel::from_score(ranked[0].score));
    }

    #[test]
    fn test_rank_by_volume_and_mcap() {
        let by_volume = rank_trending(&board(), SortKey::Volume, 2);
        let ids: Vec<_> = by_volume.iter().map(|s| s.coin.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);

        let by_mcap = rank_trending(&board(), SortKey::MarketCap, 10);
        assert_eq!(by_mcap.last().map(|s| s.coin.id.as_str()), Some("tinycap"));
    }

    #[test]
    fn test_sort_key_from_param() {
        assert_eq!(SortKey::from_param(Some("volume")), SortKey::Volume);
        assert_eq!(SortKey::from_param(Some("mcap")), SortKey::MarketCap);
        assert_eq!(SortKey::from_param(Some("score")), SortKey::Score);
        assert_eq!(SortKey::from_param(Some("bogus")), SortKey::Score);
        assert_eq!(SortKey::from_param(None), SortKey::Score);
    }

    #[test]
    fn test_new_and_exploding_view() {
        let picks = new_and_exploding(&board(), limits::NEW_AND_EXPLODING);

        // tinycap is under the 5M floor, dogwif is falling
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].coin.id, "pepe");
        assert!((picks[0].vol_ratio - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_daily_focus() {
        let picks = daily_focus(&board(), limits::DAILY_FOCUS);
        let ids: Vec<_> = picks.iter().map(|s| s.coin.id.as_str()).collect();

        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&"bitcoin"));
        assert!(!ids.contains(&"dogwif"));
        assert!(picks.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_daily_focus_empty_when_flat() {
        let flat = vec![coin("a", 0.5, 10.0, 1.0, 10.0), coin("b", 1.0, 3.0, 1.0, 10.0)];

        assert!(daily_focus(&flat, limits::DAILY_FOCUS).is_empty());
    }

    #[test]
    fn test_sector_heatmap() {
        let categories: Vec<Category> = (0..15)
            .map(|i| Category {
                id: format!("cat-{i}"),
                name: format!("Category {i}"),
                market_cap: 1_000_000.0,
                market_cap_change_24h: if i == 0 { None } else { Some(-10.0) },
                volume_24h: 300_000.0,
                top_3_coins: Vec::new(),
            })
            .collect();

        let tiles = sector_heatmap(&categories, limits::SECTORS);

        assert_eq!(tiles.len(), 12);
        assert_eq!(tiles[0].avg_change, 0.0);
        assert_eq!(tiles[1].heat, -5);
        assert_eq!(
            tiles[1].basis,
            "Broad heavy selling with little dip-buying so far. Volume is expanding aggressively vs. market cap."
        );
    }

    #[test]
    fn test_sector_members_fallback() {
        let category = Category {
            id: "meme-token".into(),
            top_3_coins: vec!["https://img/pepe.png".into(), "https://img/dogwif.png".into()],
            ..Default::default()
        };

        let members = sector_members_fallback(&category, &board());
        let ids: Vec<_> = members.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["pepe", "dogwif"]);
    }

    #[test]
    fn test_search() {
        let markets = board();

        assert_eq!(search(&markets, "", None).len(), 5);

        let hits = search(&markets, "ETH", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "ethereum");

        // "pep" symbol and "PEPE" name both match, counted once
        assert_eq!(search(&markets, "pep", None).len(), 1);
        assert!(search(&markets, "solana", None).is_empty());
    }

    #[test]
    fn test_search_empty_query_cap() {
        let many: Vec<CoinMarket> = (0..50)
            .map(|i| coin(&format!("coin{i}"), 0.0, 0.0, 1.0, 1.0))
            .collect();

        assert_eq!(search(&many, "", None).len(), limits::SEARCH_EMPTY_QUERY);
        assert_eq!(search(&many, "  ", Some(100)).len(), limits::SEARCH_EMPTY_QUERY);
        assert_eq!(search(&many, "coin", None).len(), limits::SEARCH);
    }

    #[test]
    fn test_search_blank_query_honours_smaller_limit() {
        let many: Vec<CoinMarket> = (0..50)
            .map(|i| coin(&format!("coin{i}"), 0.0, 0.0, 1.0, 1.0))
            .collect();

        assert_eq!(search(&many, "  ", Some(5)).len(), 5);
        assert_eq!(search(&many, "coin", Some(5)).len(), 5);
    }

    #[test]
    fn test_watchlist_rows() {
        let watchlist = Watchlist {
            ids: vec!["dogwif".into(), "pepe".into(), "unlisted".into(), "bitcoin".into()],
        };

        let rows = watchlist_rows(&board(), &watchlist);
        let ids: Vec<_> = rows.iter().map(|r| r.coin.id.as_str()).collect();

        assert_eq!(ids, vec!["bitcoin", "pepe", "dogwif"]);
        assert_eq!(rows[0].badge, None);
        assert_eq!(rows[1].badge, Some(WatchBadge::Hot));
        assert_eq!(rows[2].badge, Some(WatchBadge::Warning));
    }

    #[test]
    fn test_refresh_label() {
        assert_eq!(refresh_label(0), "Just refreshed");
        assert_eq!(refresh_label(3), "Just refreshed");
        assert_eq!(refresh_label(4), "4s ago");
        assert_eq!(refresh_label(95), "95s ago");
    }
}
