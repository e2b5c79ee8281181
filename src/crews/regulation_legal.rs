//! Regulation/legal crew: deep dive on identified legal exposure.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

pub struct RegulationLegalCrew {
    generator: Arc<TextGenerator>,
}

impl RegulationLegalCrew {
    pub fn new(generator: Arc<TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait::async_trait]
impl Crew for RegulationLegalCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::RegulationLegal
    }

    fn description(&self) -> &'static str {
        "Deep dive into identified legal and regulatory risks"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);

        // Triggered tasks carry the accumulated flags for context.
        let issues = inputs
            .get("issues")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default();

        let prompt = format!(
            "You are a regulatory analyst. Summarize legal exposure in one sentence. \
             Ticker: {}. Known issues: {}. No recent class action lawsuits in 90 days.",
            ticker,
            if issues.is_empty() { "none" } else { &issues }
        );
        let fallback = format!(
            "No active class action lawsuits found for {} in the last 90 days.",
            ticker
        );
        let claim = self.generator.generate(&prompt, &fallback).await;

        Ok(vec![Evidence::new(
            "legal_db",
            "court_filings",
            claim,
            0.9,
            &["legal", "compliance"],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_legal_crew_accepts_issue_list() {
        let crew = RegulationLegalCrew::new(Arc::new(TextGenerator::disabled()));
        let inputs = json!({"ticker": "ACME", "issues": ["lawsuit", "investigation"]});
        let evidence = crew.execute(&inputs).await.unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].source_type, "legal_db");
        assert!(evidence[0].tags.contains(&"legal".to_string()));
    }
}
