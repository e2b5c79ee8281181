//! Run artifacts
//!
//! JSON and Markdown sinks for a run's plan, evidence, and final report.
//! Failures here are the one I/O category that aborts a run.

use crate::error::ResearchError;
use crate::models::VerdictReport;
use crate::Result;
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;

fn artifact_error(path: &Path, err: impl Display) -> ResearchError {
    ResearchError::ArtifactError(format!("{}: {}", path.display(), err))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| artifact_error(path, e))?;
    }
    let data = serde_json::to_string_pretty(value).map_err(|e| artifact_error(path, e))?;
    fs::write(path, data).map_err(|e| artifact_error(path, e))?;
    Ok(())
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| artifact_error(path, e))?;
    }
    fs::write(path, content).map_err(|e| artifact_error(path, e))?;
    Ok(())
}

/// Human-readable rendering of the final report, with one citation tag
/// per evidence item.
pub fn render_markdown(report: &VerdictReport) -> String {
    let confidence = (1.0 - report.signals.uncertainty).max(0.0);
    let volatility = report
        .signals
        .volatility_20d
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "N/A".to_string());

    let mut md = format!(
        "# Market Research Report: {}\n\n\
         **Verdict**: {}  \n\
         **Confidence**: {:.2}  \n\
         **Date**: {}\n\n\
         ## Executive Summary\n\
         ### Bull case\n{}\n\n\
         ### Bear case\n{}\n\n\
         ## Signals\n\
         - Volatility (20d): {}\n\
         - Sentiment: {:.2}\n\
         - Momentum: {:.2}\n\
         - Event risk: {:.2}\n\
         - Red Flags: {}\n\n\
         ## Key Evidence\n",
        report.request.ticker,
        report.verdict,
        confidence,
        report.request.requested_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.rationale.bull_case,
        report.rationale.bear_case,
        volatility,
        report.signals.sentiment,
        report.signals.momentum,
        report.signals.event_risk,
        report.signals.red_flags.len(),
    );

    for item in &report.evidence {
        md.push_str(&format!(
            "- **{}** [{}] {} (Conf: {})\n",
            item.citation(),
            item.source_type,
            item.claim,
            item.confidence
        ));
    }

    md.push_str("\n## Risks\n");
    for risk in &report.risks {
        md.push_str(&format!("- {}\n", risk));
    }

    md.push_str("\n## Next Actions\n");
    for action in &report.next_actions {
        md.push_str(&format!("- {}\n", action));
    }

    md.push_str(
        "\n---\n**Disclaimer**: Not financial advice. This report is generated by an \
         automated research system for research purposes only.",
    );

    md
}

/// Write the evidence list, the structured report, and its narrative
/// rendering into the run directory.
pub fn write_run_artifacts(run_dir: &Path, report: &VerdictReport) -> Result<()> {
    write_json(&run_dir.join("evidence.json"), &report.evidence)?;
    write_json(&run_dir.join("final_report.json"), report)?;
    write_text(&run_dir.join("final_report.md"), &render_markdown(report))?;
    Ok(())
}
