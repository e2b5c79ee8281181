//! Trigger engine for dynamic re-planning
//!
//! Rule-based: each rule inspects the signals and evidence and may emit
//! one follow-up task. Rules are independent and always all evaluated;
//! their output is a separate task list, never a mutation of the original
//! plan. The engine runs exactly once per run, so triggered evidence can
//! never trigger again.

use crate::models::{CrewKind, Evidence, RequestInput, Signals, TaskSpec};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// Annualized volatility above this fires the options-liquidity follow-up.
pub const VOLATILITY_SPIKE_THRESHOLD: f64 = 0.40;

/// Evidence floor below which supplementary research is requested.
/// A tunable, not a derived value.
pub const MIN_EVIDENCE_COUNT: usize = 3;

/// Trait for a single re-planning rule.
pub trait TriggerRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        request: &RequestInput,
        evidence: &[Evidence],
        signals: &Signals,
    ) -> Option<TaskSpec>;
}

pub struct TriggerEngine {
    rules: Vec<Box<dyn TriggerRule>>,
}

impl TriggerEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn TriggerRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule; any subset may fire in one pass.
    pub fn evaluate(
        &self,
        request: &RequestInput,
        evidence: &[Evidence],
        signals: &Signals,
    ) -> Vec<TaskSpec> {
        let mut new_tasks = Vec::new();

        for rule in &self.rules {
            if let Some(task) = rule.evaluate(request, evidence, signals) {
                info!(rule = rule.name(), task = %task.name, "Trigger fired");
                new_tasks.push(task);
            }
        }

        new_tasks
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        create_default_trigger_engine()
    }
}

//
// ========== Rules ==========
//

/// Rule 1: volatility spike warrants an options flow/liquidity check.
pub struct VolatilitySpikeRule;

impl TriggerRule for VolatilitySpikeRule {
    fn name(&self) -> &'static str {
        "volatility_spike"
    }

    fn evaluate(
        &self,
        request: &RequestInput,
        _evidence: &[Evidence],
        signals: &Signals,
    ) -> Option<TaskSpec> {
        let volatility = signals.volatility_20d?;
        if volatility <= VOLATILITY_SPIKE_THRESHOLD {
            return None;
        }

        Some(TaskSpec {
            id: Uuid::new_v4(),
            name: "options_liquidity_analysis".to_string(),
            description: "Investigate options flow and liquidity due to high volatility."
                .to_string(),
            crew: CrewKind::OptionsLiquidity,
            inputs: json!({"ticker": request.ticker}),
            depends_on: vec![],
            parallelizable: false,
        })
    }
}

/// Rule 2: legal/regulatory red flags warrant a deep dive, carrying the
/// accumulated flags as task input.
pub struct RedFlagRule;

impl TriggerRule for RedFlagRule {
    fn name(&self) -> &'static str {
        "legal_red_flags"
    }

    fn evaluate(
        &self,
        request: &RequestInput,
        _evidence: &[Evidence],
        signals: &Signals,
    ) -> Option<TaskSpec> {
        if signals.red_flags.is_empty() {
            return None;
        }

        Some(TaskSpec {
            id: Uuid::new_v4(),
            name: "legal_analysis".to_string(),
            description: "Deep dive into identified legal risks.".to_string(),
            crew: CrewKind::RegulationLegal,
            inputs: json!({
                "ticker": request.ticker,
                "issues": signals.red_flags,
            }),
            depends_on: vec![],
            parallelizable: false,
        })
    }
}

/// Rule 3: too little evidence to judge; widen the news lookback window.
pub struct EvidenceFloorRule;

impl TriggerRule for EvidenceFloorRule {
    fn name(&self) -> &'static str {
        "evidence_floor"
    }

    fn evaluate(
        &self,
        request: &RequestInput,
        evidence: &[Evidence],
        _signals: &Signals,
    ) -> Option<TaskSpec> {
        if evidence.len() >= MIN_EVIDENCE_COUNT {
            return None;
        }

        Some(TaskSpec {
            id: Uuid::new_v4(),
            name: "supplementary_research".to_string(),
            description: "Gather more evidence due to low count.".to_string(),
            crew: CrewKind::News,
            inputs: json!({
                "ticker": request.ticker,
                "days": 90,
            }),
            depends_on: vec![],
            parallelizable: true,
        })
    }
}

/// Default engine with the standard rule set.
pub fn create_default_trigger_engine() -> TriggerEngine {
    let mut engine = TriggerEngine::new();
    engine.add_rule(Box::new(VolatilitySpikeRule));
    engine.add_rule(Box::new(RedFlagRule));
    engine.add_rule(Box::new(EvidenceFloorRule));
    engine
}
