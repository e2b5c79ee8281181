//! Market research orchestrator
//!
//! An adaptive research pipeline for a single ticker: a planner emits a
//! base task plan, crews produce confidence-scored evidence, a synthesizer
//! folds the evidence into signals, a trigger engine may schedule one
//! follow-up pass, and a verdict engine scores the final signals into a
//! cited buy/hold/sell report. Every run leaves a JSONL audit trail and
//! its artifacts in a per-run directory.

pub mod audit;
pub mod classifier;
pub mod crews;
pub mod error;
pub mod execution;
pub mod llm;
pub mod market;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod report;
pub mod synthesis;
pub mod triggers;
pub mod verdict;

pub use error::{ResearchError, Result};
pub use models::{
    CrewKind, Evidence, Horizon, Rationale, RequestInput, ResearchPlan, RiskProfile, Signals,
    TaskSpec, Verdict, VerdictReport,
};
pub use orchestrator::{RunController, RunSummary};
