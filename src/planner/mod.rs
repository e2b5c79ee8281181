//! Base plan construction
//!
//! A pure function of the request: every run starts from the same fixed
//! task set, with inputs populated from the request fields. Follow-up work
//! comes from the trigger engine, never from editing this plan.

use crate::models::{CrewKind, RequestInput, ResearchPlan, TaskSpec};
use serde_json::json;
use uuid::Uuid;

pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    pub fn create_base_plan(&self, request: &RequestInput) -> ResearchPlan {
        let tasks = vec![
            TaskSpec {
                id: Uuid::new_v4(),
                name: "price_analysis".to_string(),
                description: "Fetch and analyze OHLC price data, volatility, and drawdowns."
                    .to_string(),
                crew: CrewKind::Price,
                inputs: json!({
                    "ticker": request.ticker,
                    "horizon": request.horizon.to_string(),
                }),
                depends_on: vec![],
                parallelizable: true,
            },
            TaskSpec {
                id: Uuid::new_v4(),
                name: "news_analysis".to_string(),
                description: "Fetch news and sentiment analysis.".to_string(),
                crew: CrewKind::News,
                inputs: json!({
                    "ticker": request.ticker,
                    "days": 30,
                }),
                depends_on: vec![],
                parallelizable: true,
            },
            TaskSpec {
                id: Uuid::new_v4(),
                name: "fundamental_analysis".to_string(),
                description: "Analyze basic fundamental ratios.".to_string(),
                crew: CrewKind::Fundamentals,
                inputs: json!({
                    "ticker": request.ticker,
                }),
                depends_on: vec![],
                parallelizable: true,
            },
        ];

        ResearchPlan::new(tasks)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}
