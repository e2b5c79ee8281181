//! Price analysis crew: volatility and drawdown evidence from the price feed.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::market::{compute_drawdown, compute_volatility, MarketDataCache};
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

const LOOKBACK_DAYS: usize = 30;

pub struct PriceCrew {
    generator: Arc<TextGenerator>,
    market: Arc<MarketDataCache>,
}

impl PriceCrew {
    pub fn new(generator: Arc<TextGenerator>, market: Arc<MarketDataCache>) -> Self {
        Self { generator, market }
    }
}

#[async_trait::async_trait]
impl Crew for PriceCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::Price
    }

    fn description(&self) -> &'static str {
        "Fetch and analyze OHLC price data, volatility, and drawdowns"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);
        let prices = self.market.prices_for(&ticker, LOOKBACK_DAYS).await;

        let volatility = compute_volatility(&prices);
        let drawdown = compute_drawdown(&prices);

        let volatility_prompt = format!(
            "You are a quant analyst. Summarize the volatility signal in one sentence. \
             Ticker: {}. Volatility (annualized): {:.2}%.",
            ticker,
            volatility * 100.0
        );
        // The fallback phrasing carries the parseable "is NN.NN%" pattern
        // the synthesizer looks for.
        let volatility_fallback = format!("Volatility for {} is {:.2}%", ticker, volatility * 100.0);
        let volatility_claim = self
            .generator
            .generate(&volatility_prompt, &volatility_fallback)
            .await;

        let drawdown_prompt = format!(
            "You are a risk analyst. Summarize the drawdown in one sentence. \
             Ticker: {}. Max drawdown: {:.2}%.",
            ticker,
            drawdown * 100.0
        );
        let drawdown_fallback = format!("Max drawdown for {} is {:.2}%", ticker, drawdown * 100.0);
        let drawdown_claim = self
            .generator
            .generate(&drawdown_prompt, &drawdown_fallback)
            .await;

        let recent: Vec<f64> = prices.iter().rev().take(5).map(|p| p.close).collect();

        Ok(vec![
            Evidence::new(
                "price",
                "mock_price_feed",
                volatility_claim,
                0.95,
                &["volatility", "risk"],
            )
            .with_snippet(format!("{:?}", recent)),
            Evidence::new(
                "price",
                "mock_price_feed",
                drawdown_claim,
                1.0,
                &["drawdown", "risk"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_price_crew_produces_parseable_claims() {
        let crew = PriceCrew::new(
            Arc::new(TextGenerator::disabled()),
            Arc::new(MarketDataCache::new()),
        );

        let evidence = crew.execute(&json!({"ticker": "ACME"})).await.unwrap();
        assert_eq!(evidence.len(), 2);
        assert!(evidence[0].claim.starts_with("Volatility for ACME is "));
        assert!(evidence[0].claim.ends_with('%'));
        assert!(evidence[0].tags.contains(&"volatility".to_string()));
        assert!(evidence[1].claim.starts_with("Max drawdown for ACME is "));
        assert!(evidence[1].tags.contains(&"drawdown".to_string()));
    }
}
