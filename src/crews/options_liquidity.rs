//! Options liquidity crew: follow-up analysis for volatility spikes.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

pub struct OptionsLiquidityCrew {
    generator: Arc<TextGenerator>,
}

impl OptionsLiquidityCrew {
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait::async_trait]
impl Crew for OptionsLiquidityCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::OptionsLiquidity
    }

    fn description(&self) -> &'static str {
        "Investigate options flow and liquidity"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);

        let prompt = format!(
            "You are an options market analyst. Summarize the put/call signal in one sentence. \
             Ticker: {}. Signal: high put/call ratio.",
            ticker
        );
        let fallback = format!(
            "High put/call ratio detected for {}, indicating bearish sentiment.",
            ticker
        );
        let claim = self.generator.generate(&prompt, &fallback).await;

        Ok(vec![Evidence::new(
            "market_data",
            "options_chain",
            claim,
            0.75,
            &["options", "bearish"],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_options_crew_evidence() {
        let crew = OptionsLiquidityCrew::new(Arc::new(TextGenerator::disabled()));
        let evidence = crew.execute(&json!({"ticker": "ACME"})).await.unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].source_type, "market_data");
        assert!(evidence[0].claim.contains("put/call"));
    }
}
