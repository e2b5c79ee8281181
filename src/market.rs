//! Market data feeds and signal calculators
//!
//! Deterministic mock price/news feeds seeded from the ticker, so every
//! run over the same subject reproduces the same series. Real fetchers can
//! replace these without touching the pipeline.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub sentiment: String,
    pub date: String,
    pub snippet: String,
}

fn ticker_seed(ticker: &str) -> u64 {
    ticker.bytes().map(u64::from).sum()
}

/// Deterministic mock OHLC close series for a ticker.
pub fn fetch_prices(ticker: &str, days: usize) -> Vec<PricePoint> {
    let seed = ticker_seed(ticker);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut base_price = 100.0 + (seed % 50) as f64;
    let mut date = Utc::now() - Duration::days(days as i64);

    let mut prices = Vec::with_capacity(days);
    for _ in 0..days {
        // Wide daily range keeps the volatility trigger exercisable.
        let change = (rng.gen::<f64>() - 0.5) * 15.0;
        base_price += change;
        prices.push(PricePoint {
            date: date.format("%Y-%m-%d").to_string(),
            close: (base_price * 100.0).round() / 100.0,
            volume: rng.gen_range(1_000_000..5_000_000),
        });
        date += Duration::days(1);
    }

    prices
}

/// Deterministic mock news selection for a ticker.
pub fn fetch_news(ticker: &str) -> Vec<NewsArticle> {
    let headlines = [
        (
            format!("{} announces record breaking quarterly results", ticker),
            "positive",
        ),
        (format!("Analyst upgrades {} to Buy", ticker), "positive"),
        (format!("Supply chain issues affect {}", ticker), "negative"),
        (
            format!("{} CEO faces lawsuit over tweets", ticker),
            "negative",
        ),
        (format!("{} unveils new product line", ticker), "positive"),
    ];

    let seed = ticker_seed(ticker);
    let now = Utc::now();

    headlines
        .into_iter()
        .enumerate()
        .filter(|(i, _)| (seed + *i as u64) % 2 == 0)
        .map(|(i, (title, sentiment))| NewsArticle {
            snippet: format!("Full content of {}...", title),
            date: (now - Duration::days(i as i64)).to_rfc3339(),
            title,
            sentiment: sentiment.to_string(),
        })
        .collect()
}

/// Annualized close-to-close volatility.
pub fn compute_volatility(prices: &[PricePoint]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = prices
        .windows(2)
        .map(|w| (w[1].close - w[0].close) / w[0].close)
        .collect();

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    variance.sqrt() * (252.0_f64).sqrt()
}

/// Maximum peak-to-trough drawdown over the series (non-positive).
pub fn compute_drawdown(prices: &[PricePoint]) -> f64 {
    let mut peak = match prices.first() {
        Some(p) => p.close,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for point in prices {
        if point.close > peak {
            peak = point.close;
        }
        let dd = (point.close - peak) / peak;
        if dd < max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

const RED_FLAG_KEYWORDS: &[&str] = &["lawsuit", "sec", "doj", "recall", "regulator", "investigation"];

/// Scan articles for legal/regulatory keywords.
pub fn check_red_flags(articles: &[NewsArticle]) -> Vec<String> {
    let mut flags = Vec::new();

    for article in articles {
        let text = format!("{} {}", article.title, article.snippet).to_lowercase();
        for keyword in RED_FLAG_KEYWORDS {
            if text.contains(keyword) {
                flags.push(format!("Found '{}' in article: {}", keyword, article.title));
            }
        }
    }

    flags
}

/// Memoizing cache over the feeds, built per process and injected into
/// crews — not ambient global state.
pub struct MarketDataCache {
    prices: Arc<RwLock<HashMap<String, Vec<PricePoint>>>>,
    news: Arc<RwLock<HashMap<String, Vec<NewsArticle>>>>,
}

impl MarketDataCache {
    pub fn new() -> Self {
        Self {
            prices: Arc::new(RwLock::new(HashMap::new())),
            news: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn prices_for(&self, ticker: &str, days: usize) -> Vec<PricePoint> {
        let key = format!("{}:{}", ticker, days);

        {
            let cached = self.prices.read().await;
            if let Some(series) = cached.get(&key) {
                return series.clone();
            }
        }

        let series = fetch_prices(ticker, days);
        let mut cached = self.prices.write().await;
        cached.entry(key).or_insert_with(|| series.clone());
        series
    }

    pub async fn news_for(&self, ticker: &str) -> Vec<NewsArticle> {
        {
            let cached = self.news.read().await;
            if let Some(articles) = cached.get(ticker) {
                return articles.clone();
            }
        }

        let articles = fetch_news(ticker);
        let mut cached = self.news.write().await;
        cached
            .entry(ticker.to_string())
            .or_insert_with(|| articles.clone());
        articles
    }
}

impl Default for MarketDataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_feed_is_deterministic() {
        let a = fetch_prices("ACME", 30);
        let b = fetch_prices("ACME", 30);
        assert_eq!(a.len(), 30);
        assert_eq!(a[0].close, b[0].close);
        assert_eq!(a[29].close, b[29].close);
    }

    #[test]
    fn test_different_tickers_differ() {
        let a = fetch_prices("ACME", 30);
        let b = fetch_prices("ZENITH", 30);
        assert_ne!(a[0].close, b[0].close);
    }

    #[test]
    fn test_volatility_of_flat_series_is_zero() {
        let prices: Vec<PricePoint> = (0..10)
            .map(|i| PricePoint {
                date: format!("2026-01-{:02}", i + 1),
                close: 100.0,
                volume: 1_000_000,
            })
            .collect();
        assert_eq!(compute_volatility(&prices), 0.0);
    }

    #[test]
    fn test_volatility_needs_two_points() {
        assert_eq!(compute_volatility(&[]), 0.0);
        let single = vec![PricePoint {
            date: "2026-01-01".to_string(),
            close: 100.0,
            volume: 1,
        }];
        assert_eq!(compute_volatility(&single), 0.0);
    }

    #[test]
    fn test_drawdown() {
        let closes = [100.0, 120.0, 90.0, 110.0];
        let prices: Vec<PricePoint> = closes
            .iter()
            .map(|c| PricePoint {
                date: "2026-01-01".to_string(),
                close: *c,
                volume: 1,
            })
            .collect();
        // Peak 120 to trough 90.
        let dd = compute_drawdown(&prices);
        assert!((dd - (-0.25)).abs() < 1e-9);
    }

    #[test]
    fn test_red_flag_scan() {
        let articles = vec![
            NewsArticle {
                title: "ACME CEO faces lawsuit over tweets".to_string(),
                sentiment: "negative".to_string(),
                date: "2026-08-30".to_string(),
                snippet: "Full content...".to_string(),
            },
            NewsArticle {
                title: "ACME unveils new product line".to_string(),
                sentiment: "positive".to_string(),
                date: "2026-08-29".to_string(),
                snippet: "Full content...".to_string(),
            },
        ];

        let flags = check_red_flags(&articles);
        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("lawsuit"));
    }

    #[tokio::test]
    async fn test_cache_memoizes() {
        let cache = MarketDataCache::new();
        let first = cache.prices_for("ACME", 30).await;
        let second = cache.prices_for("ACME", 30).await;
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].close, second[0].close);
    }
}
