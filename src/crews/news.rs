//! News analysis crew: coverage volume and legal red-flag evidence.

use super::{ticker_from, Crew};
use crate::llm::TextGenerator;
use crate::market::{check_red_flags, MarketDataCache};
use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

pub struct NewsCrew {
    generator: Arc<TextGenerator>,
    market: Arc<MarketDataCache>,
}

impl NewsCrew {
    pub fn new(generator: Arc<TextGenerator>, market: Arc<MarketDataCache>) -> Self {
        Self { generator, market }
    }
}

#[async_trait::async_trait]
impl Crew for NewsCrew {
    fn kind(&self) -> CrewKind {
        CrewKind::News
    }

    fn description(&self) -> &'static str {
        "Fetch news coverage and extract sentiment and red flags"
    }

    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>> {
        let ticker = ticker_from(inputs);
        let articles = self.market.news_for(&ticker).await;
        let red_flags = check_red_flags(&articles);

        let mut evidence = Vec::new();

        let volume_prompt = format!(
            "You are a news analyst. Summarize the recent coverage volume in one sentence. \
             Ticker: {}. Article count: {}.",
            ticker,
            articles.len()
        );
        let volume_fallback = format!("Found {} recent articles for {}", articles.len(), ticker);
        let volume_claim = self
            .generator
            .generate(&volume_prompt, &volume_fallback)
            .await;
        evidence.push(Evidence::new(
            "news",
            "mock_news_api",
            volume_claim,
            0.8,
            &["volume", "sentiment"],
        ));

        if !red_flags.is_empty() {
            let flags = red_flags.join(", ");
            let flag_prompt = format!(
                "You are a risk analyst. Summarize the red flags in one sentence. \
                 Ticker: {}. Red flags: {}.",
                ticker, flags
            );
            // The "...: item1, item2" shape is what the synthesizer splits on.
            let flag_fallback = format!("Identified potential red flags: {}", flags);
            let flag_claim = self.generator.generate(&flag_prompt, &flag_fallback).await;
            evidence.push(Evidence::new(
                "news",
                "mock_news_api",
                flag_claim,
                0.7,
                &["risk", "legal"],
            ));
        }

        Ok(evidence)
    }
}
