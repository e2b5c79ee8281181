//! Task executor
//!
//! Dispatches task specs to registered crews and flattens their output
//! into one evidence collection. Decoupled from how crews work: a missing
//! or failing crew means zero evidence for that task, never a dead run.

use crate::audit::{EventKind, EventLog};
use crate::crews::CrewRegistry;
use crate::models::{Evidence, TaskSpec};
use crate::Result;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, warn};

pub struct TaskExecutor {
    registry: CrewRegistry,
}

impl TaskExecutor {
    pub fn new(registry: CrewRegistry) -> Self {
        Self { registry }
    }

    /// Run every task in listed order and collect all evidence.
    ///
    /// The `parallelizable` flag on tasks is advisory metadata for a future
    /// scheduler; execution here is strictly sequential, which also keeps
    /// the evidence append order deterministic.
    pub async fn execute_tasks(
        &self,
        tasks: &[TaskSpec],
        events: &EventLog,
    ) -> Result<Vec<Evidence>> {
        let mut collected = Vec::new();

        for task in tasks {
            debug!(task = %task.name, crew = %task.crew, "Executing task");
            events.emit(EventKind::TaskStarted, json!({"task": task.name}))?;

            let crew = match self.registry.get(task.crew) {
                Some(crew) => crew,
                None => {
                    error!(task = %task.name, crew = %task.crew, "Crew not registered");
                    events.emit(
                        EventKind::TaskFinished,
                        json!({
                            "task": task.name,
                            "evidence_count": 0,
                            "error": format!("crew '{}' not registered", task.crew),
                        }),
                    )?;
                    continue;
                }
            };

            let start = Instant::now();
            match crew.execute(&task.inputs).await {
                Ok(evidence) => {
                    events.emit(
                        EventKind::TaskFinished,
                        json!({
                            "task": task.name,
                            "evidence_count": evidence.len(),
                            "execution_time_ms": start.elapsed().as_millis() as u64,
                        }),
                    )?;
                    collected.extend(evidence);
                }
                Err(e) => {
                    // Producer failure yields zero evidence for this task.
                    warn!(task = %task.name, error = %e, "Crew execution failed");
                    events.emit(
                        EventKind::TaskFinished,
                        json!({
                            "task": task.name,
                            "evidence_count": 0,
                            "error": e.to_string(),
                        }),
                    )?;
                }
            }
        }

        debug!(
            task_count = tasks.len(),
            evidence_count = collected.len(),
            "Task execution completed"
        );

        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crews::{create_default_registry, Crew};
    use crate::llm::TextGenerator;
    use crate::market::MarketDataCache;
    use crate::models::{CrewKind, RequestInput};
    use crate::planner::Planner;
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    fn default_executor() -> TaskExecutor {
        TaskExecutor::new(create_default_registry(
            Arc::new(TextGenerator::disabled()),
            Arc::new(MarketDataCache::new()),
        ))
    }

    fn task_for(crew: CrewKind) -> TaskSpec {
        TaskSpec {
            id: Uuid::new_v4(),
            name: format!("{}_task", crew),
            description: String::new(),
            crew,
            inputs: serde_json::json!({"ticker": "ACME"}),
            depends_on: vec![],
            parallelizable: false,
        }
    }

    #[tokio::test]
    async fn test_base_plan_execution_collects_evidence() {
        let executor = default_executor();
        let request = RequestInput::new("ACME", "1m", "normal").unwrap();
        let plan = Planner::new().create_base_plan(&request);
        let events = EventLog::in_memory();

        let evidence = executor.execute_tasks(&plan.tasks, &events).await.unwrap();

        // Price contributes 2 items, fundamentals 1, news at least 1.
        assert!(evidence.len() >= 4);

        let records = events.records();
        let started = records
            .iter()
            .filter(|r| r.kind == EventKind::TaskStarted)
            .count();
        let finished = records
            .iter()
            .filter(|r| r.kind == EventKind::TaskFinished)
            .count();
        assert_eq!(started, 3);
        assert_eq!(finished, 3);
    }

    #[tokio::test]
    async fn test_missing_crew_is_skipped_not_fatal() {
        // Registry with only the fundamentals crew registered.
        let mut registry = CrewRegistry::new();
        registry.register(Arc::new(crate::crews::FundamentalsCrew::new(Arc::new(
            TextGenerator::disabled(),
        ))));
        let executor = TaskExecutor::new(registry);

        let tasks = vec![task_for(CrewKind::Price), task_for(CrewKind::Fundamentals)];
        let events = EventLog::in_memory();

        let evidence = executor.execute_tasks(&tasks, &events).await.unwrap();
        assert_eq!(evidence.len(), 1);

        let records = events.records();
        let errored: Vec<_> = records
            .iter()
            .filter(|r| r.kind == EventKind::TaskFinished && r.data.get("error").is_some())
            .collect();
        assert_eq!(errored.len(), 1);
        assert_eq!(errored[0].data["evidence_count"], 0);
    }

    #[tokio::test]
    async fn test_failing_crew_yields_zero_evidence() {
        struct FailingCrew;

        #[async_trait::async_trait]
        impl Crew for FailingCrew {
            fn kind(&self) -> CrewKind {
                CrewKind::Debate
            }
            fn description(&self) -> &'static str {
                "always fails"
            }
            async fn execute(&self, _inputs: &Value) -> Result<Vec<Evidence>> {
                Err(crate::error::ResearchError::CrewError(
                    "feed unavailable".to_string(),
                ))
            }
        }

        let mut registry = CrewRegistry::new();
        registry.register(Arc::new(FailingCrew));
        let executor = TaskExecutor::new(registry);

        let tasks = vec![task_for(CrewKind::Debate)];
        let events = EventLog::in_memory();

        let evidence = executor.execute_tasks(&tasks, &events).await.unwrap();
        assert!(evidence.is_empty());

        let records = events.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].data["error"], "Crew error: feed unavailable");
    }

    #[tokio::test]
    async fn test_start_before_finish_per_task() {
        let executor = default_executor();
        let tasks = vec![task_for(CrewKind::Price), task_for(CrewKind::News)];
        let events = EventLog::in_memory();

        executor.execute_tasks(&tasks, &events).await.unwrap();

        let kinds: Vec<EventKind> = events.records().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::TaskStarted,
                EventKind::TaskFinished,
                EventKind::TaskStarted,
                EventKind::TaskFinished,
            ]
        );
    }
}
