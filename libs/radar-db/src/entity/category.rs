use serde::{Deserialize, Serialize};

use super::{finite_or_zero, null_as_default};

/// One aggregate from CoinGecko `/coins/categories`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,
    #[serde(default)]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume_24h: f64,
    /// Logo URLs of the three largest coins in the category
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_3_coins: Vec<String>,
}

impl Category {
    /// 24h market cap change, absent counts as flat
    pub fn avg_change(&self) -> f64 {
        self.market_cap_change_24h.unwrap_or(0.0)
    }

    /// 24h volume over market cap, zero cap floored to 1
    pub fn volume_ratio(&self) -> f64 {
        let mc = if self.market_cap == 0.0 {
            1.0
        } else {
            self.market_cap
        };
        self.volume_24h / mc
    }

    pub fn is_finite(&self) -> bool {
        self.market_cap.is_finite()
            && self.volume_24h.is_finite()
            && self.market_cap_change_24h.map_or(true, f64::is_finite)
    }

    pub fn sanitized(mut self) -> Self {
        self.market_cap = finite_or_zero(self.market_cap);
        self.volume_24h = finite_or_zero(self.volume_24h);
        self.market_cap_change_24h = self.market_cap_change_24h.filter(|v| v.is_finite());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_category() {
        let raw = r#"{
            "id": "layer-1",
            "name": "Layer 1 (L1)",
            "market_cap": 2000000000000,
            "market_cap_change_24h": null,
            "content": "",
            "top_3_coins": ["https://a/1.png", "https://a/2.png"],
            "volume_24h": 80000000000,
            "updated_at": "2024-05-01T10:00:00.000Z"
        }"#;

        let category: Category = serde_json::from_str(raw).unwrap();

        assert_eq!(category.avg_change(), 0.0);
        assert_eq!(category.top_3_coins.len(), 2);
        assert!((category.volume_ratio() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_null_top_coins() {
        let raw = r#"{"id": "empty", "name": "Empty", "market_cap": null,
            "volume_24h": 5, "top_3_coins": null}"#;

        let category: Category = serde_json::from_str(raw).unwrap();

        assert!(category.top_3_coins.is_empty());
        assert_eq!(category.volume_ratio(), 5.0);
    }
}
