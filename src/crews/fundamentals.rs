//! Fundamentals crew: valuation evidence from basic ratios.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

// Mock fundamentals until a filings feed is wired in.
const MOCK_PE_RATIO: f64 = 25.4;
const UNDERVALUED_PE_CEILING: f64 = 20.0;

pub struct FundamentalsCrew {
    generator: Arc<TextGenerator>,
}

impl FundamentalsCrew {
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait::async_trait]
impl Crew for FundamentalsCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::Fundamentals
    }

    fn description(&self) -> &'static str {
        "Analyze basic fundamental ratios"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);

        let verdict = if MOCK_PE_RATIO < UNDERVALUED_PE_CEILING {
            "undervalued"
        } else {
            "overvalued"
        };

        let prompt = format!(
            "You are a fundamental analyst. Write one sentence interpreting the valuation. \
             Ticker: {}. P/E ratio: {}. Conclusion: {}.",
            ticker, MOCK_PE_RATIO, verdict
        );
        let fallback = format!(
            "{} has a P/E ratio of {}, considering it {}",
            ticker, MOCK_PE_RATIO, verdict
        );
        let claim = self.generator.generate(&prompt, &fallback).await;

        Ok(vec![Evidence::new(
            "analysis",
            "10-K",
            claim,
            0.85,
            &["valuation", "fundamental"],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fundamentals_crew_tags_valuation() {
        let crew = FundamentalsCrew::new(Arc::new(TextGenerator::disabled()));
        let evidence = crew.execute(&json!({"ticker": "ACME"})).await.unwrap();
        assert_eq!(evidence.len(), 1);
        assert!(evidence[0].tags.contains(&"valuation".to_string()));
        assert!(evidence[0].claim.contains("overvalued"));
    }
}
