//! Crew trait and registry
//!
//! A crew is an Evidence Producer: given opaque task inputs it returns zero
//! or more Evidence items. Crews are the only pipeline components allowed
//! to touch data feeds or the text generator; the decision logic downstream
//! never sees anything but Evidence.

use crate::models::{CrewKind, Evidence};
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

mod debate;
mod fundamentals;
mod news;
mod options_liquidity;
mod price;
mod regulation_legal;

pub use debate::DebateCrew;
pub use fundamentals::FundamentalsCrew;
pub use news::NewsCrew;
pub use options_liquidity::OptionsLiquidityCrew;
pub use price::PriceCrew;
pub use regulation_legal::RegulationLegalCrew;

/// Subject id used when a task carries no ticker input.
pub const UNKNOWN_TICKER: &str = "UNKNOWN";

/// Trait for a single Evidence Producer.
#[async_trait::async_trait]
pub trait Crew: Send + Sync {
    fn kind(&self) -> CrewKind;
    fn description(&self) -> &'static str;
    async fn execute(&self, inputs: &Value) -> Result<Vec<Evidence>>;
}

/// Ticker from task inputs; absence is not an error.
pub(crate) fn ticker_from(inputs: &Value) -> String {
    inputs
        .get("ticker")
        .and_then(|v| v.as_str())
        .unwrap_or(UNKNOWN_TICKER)
        .to_string()
}

/// Crew registry keyed by the closed `CrewKind` selector.
pub struct CrewRegistry {
    crews: HashMap<CrewKind, Arc<dyn Crew>>,
}

impl CrewRegistry {
    pub fn new() -> Self {
        Self {
            crews: HashMap::new(),
        }
    }

    pub fn register(&mut self, crew: Arc<dyn Crew>) {
        self.crews.insert(crew.kind(), crew);
    }

    pub fn get(&self, kind: CrewKind) -> Option<Arc<dyn Crew>> {
        self.crews.get(&kind).cloned()
    }

    pub fn list(&self) -> Vec<CrewKind> {
        self.crews.keys().copied().collect()
    }
}

impl Default for CrewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the full registry with every crew wired to the shared text
/// generator and market data cache.
pub fn create_default_registry(
    generator: Arc<crate::llm::TextGenerator>,
    market: Arc<crate::market::MarketDataCache>,
) -> CrewRegistry {
    let mut registry = CrewRegistry::new();

    registry.register(Arc::new(PriceCrew::new(
        Arc::clone(&generator),
        Arc::clone(&market),
    )));
    registry.register(Arc::new(NewsCrew::new(
        Arc::clone(&generator),
        Arc::clone(&market),
    )));
    registry.register(Arc::new(FundamentalsCrew::new(Arc::clone(&generator))));
    registry.register(Arc::new(OptionsLiquidityCrew::new(Arc::clone(&generator))));
    registry.register(Arc::new(RegulationLegalCrew::new(Arc::clone(&generator))));
    registry.register(Arc::new(DebateCrew::new(generator)));

    registry
}
