//! Error types for the research orchestrator

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {

    // =============================
    // Core Pipeline Errors
    // =============================

    /// Malformed request fields; rejected before planning, fatal to the run.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A crew raised during execution. Treated as zero evidence for that
    /// task, never fatal to the run.
    #[error("Crew error: {0}")]
    CrewError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Audit error: {0}")]
    AuditError(String),

    /// A run artifact could not be written; fatal to the run.
    /// Carries the path so the operator knows which file failed.
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
