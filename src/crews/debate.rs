//! Debate crew: bull/bear debate synthesis.
//!
//! Registered but not part of the base plan; available for ad-hoc and
//! future triggered use.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

pub struct DebateCrew {
    generator: Arc<TextGenerator>,
}

impl DebateCrew {
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait::async_trait]
impl Crew for DebateCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::Debate
    }

    fn description(&self) -> &'static str {
        "Debate bull and bear cases and summarize the outcome"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);

        let prompt = format!(
            "You are a market research analyst. Summarize a bull/bear debate in one sentence. \
             Make the conclusion explicit and mention the primary risk driver. Ticker: {}.",
            ticker
        );
        let fallback = format!(
            "After debating bull/bear cases for {}, the bear case regarding regulatory risk \
             is deemed more significant.",
            ticker
        );
        let claim = self.generator.generate(&prompt, &fallback).await;

        Ok(vec![Evidence::new(
            "synthesis",
            "debate_session",
            claim,
            0.6,
            &["debate", "verdict"],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_debate_crew_evidence() {
        let crew = DebateCrew::new(Arc::new(TextGenerator::disabled()));
        let evidence = crew.execute(&json!({"ticker": "ACME"})).await.unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].source_type, "synthesis");
        assert!((evidence[0].confidence - 0.6).abs() < 1e-9);
    }
}
