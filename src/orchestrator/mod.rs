//! Run controller
//!
//! Owns the pipeline sequence for a single run: plan, execute, synthesize,
//! evaluate triggers, optionally execute the triggered pass, re-synthesize,
//! score, and persist artifacts. Triggers are evaluated exactly once per
//! run, so the pipeline always terminates after at most two passes.

use crate::audit::{EventKind, EventLog};
use crate::crews::CrewRegistry;
use crate::execution::TaskExecutor;
use crate::models::{RequestInput, Verdict, VerdictReport};
use crate::planner::Planner;
use crate::report;
use crate::synthesis::Synthesizer;
use crate::triggers::{create_default_trigger_engine, TriggerEngine};
use crate::verdict::VerdictEngine;
use crate::Result;
use chrono::Utc;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// What a caller gets back from a completed run; the full report lives in
/// the run directory.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub verdict: Verdict,
    pub confidence: f64,
    pub evidence_count: usize,
    pub triggered_tasks: Vec<String>,
}

pub struct RunController {
    planner: Planner,
    executor: TaskExecutor,
    synthesizer: Synthesizer,
    triggers: TriggerEngine,
    verdicts: VerdictEngine,
    runs_root: PathBuf,
}

impl RunController {
    pub fn new(registry: CrewRegistry, runs_root: PathBuf) -> Self {
        Self {
            planner: Planner::new(),
            executor: TaskExecutor::new(registry),
            synthesizer: Synthesizer::new(),
            triggers: create_default_trigger_engine(),
            verdicts: VerdictEngine::new(),
            runs_root,
        }
    }

    /// Swap in a non-default rule set.
    pub fn with_trigger_engine(mut self, triggers: TriggerEngine) -> Self {
        self.triggers = triggers;
        self
    }

    pub async fn run(&self, request: RequestInput) -> Result<RunSummary> {
        let run_id = format!(
            "{}_{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            request.ticker
        );
        let run_dir = self.runs_root.join(&run_id);
        fs::create_dir_all(&run_dir)?;

        let events = EventLog::new(run_dir.join("events.jsonl"));
        info!(run_id = %run_id, ticker = %request.ticker, "Run started");
        events.emit(
            EventKind::RunStarted,
            json!({
                "ticker": request.ticker,
                "horizon": request.horizon.to_string(),
                "risk_profile": request.risk_profile,
            }),
        )?;

        // Pass 1: the static base plan.
        let plan = self.planner.create_base_plan(&request);
        events.emit(
            EventKind::PlanCreated,
            json!({"task_count": plan.tasks.len()}),
        )?;
        report::write_json(&run_dir.join("plan.json"), &plan)?;

        let mut evidence = self.executor.execute_tasks(&plan.tasks, &events).await?;
        let mut signals = self.synthesizer.build_signals(&evidence);

        // Pass 2, only if any rule fires. Evidence is appended, never
        // replaced, and signals are recomputed from the full collection.
        let triggered = self.triggers.evaluate(&request, &evidence, &signals);
        let triggered_tasks: Vec<String> = triggered.iter().map(|t| t.name.clone()).collect();

        if !triggered.is_empty() {
            info!(count = triggered.len(), "Triggers fired, running second pass");
            events.emit(
                EventKind::TriggersFired,
                json!({"new_tasks": triggered_tasks}),
            )?;

            let extra = self.executor.execute_tasks(&triggered, &events).await?;
            evidence.extend(extra);
            signals = self.synthesizer.build_signals(&evidence);
        }

        let (verdict, rationale, confidence) =
            self.verdicts.compute_verdict(&signals, &evidence);

        let risks = signals.red_flags.clone();
        let report = VerdictReport {
            request,
            signals,
            research_plan: plan,
            evidence,
            verdict,
            rationale,
            risks,
            next_actions: vec![
                "Monitor earnings".to_string(),
                "Check regulatory updates".to_string(),
            ],
        };

        report::write_run_artifacts(&run_dir, &report)?;
        events.emit(EventKind::RunComplete, json!({"verdict": verdict.to_string()}))?;
        info!(run_id = %run_id, verdict = %verdict, confidence, "Run complete");

        Ok(RunSummary {
            run_id,
            run_dir,
            verdict,
            confidence,
            evidence_count: report.evidence.len(),
            triggered_tasks,
        })
    }
}
