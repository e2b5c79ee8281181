//! Core data models for the research pipeline

use crate::error::ResearchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Horizon {
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Normal,
    Aggressive,
}

/// Closed producer selector: a task can only reference a crew that exists
/// in the type system, so unknown selectors are rejected at plan
/// construction rather than at dispatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CrewKind {
    Price,
    News,
    Fundamentals,
    OptionsLiquidity,
    RegulationLegal,
    Debate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    /// Reserved label; never produced by the scoring function.
    DoNotTouch,
}

//
// ================= Request =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInput {
    pub ticker: String,
    pub horizon: Horizon,
    pub risk_profile: RiskProfile,
    pub portfolio_context: Option<String>,
    pub requested_at: DateTime<Utc>,
}

impl RequestInput {
    /// Validate and build a request. Malformed fields are fatal to the
    /// run attempt, before any planning happens.
    pub fn new(ticker: &str, horizon: &str, risk_profile: &str) -> crate::Result<Self> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(ResearchError::InvalidRequest(
                "ticker must not be empty".to_string(),
            ));
        }

        Ok(Self {
            ticker: ticker.to_uppercase(),
            horizon: horizon.parse()?,
            risk_profile: risk_profile.parse()?,
            portfolio_context: None,
            requested_at: Utc::now(),
        })
    }
}

//
// ================= Plan =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub crew: CrewKind,
    pub inputs: serde_json::Value,
    /// Currently always empty in generated plans; reserved for ordering.
    #[serde(default)]
    pub depends_on: Vec<Uuid>,
    /// Advisory only. A future scheduler may run independent tasks
    /// concurrently; the executor does not act on it today.
    #[serde(default)]
    pub parallelizable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchPlan {
    pub plan_id: Uuid,
    pub tasks: Vec<TaskSpec>,
    pub created_at: DateTime<Utc>,
}

impl ResearchPlan {
    pub fn new(tasks: Vec<TaskSpec>) -> Self {
        Self {
            plan_id: Uuid::new_v4(),
            tasks,
            created_at: Utc::now(),
        }
    }
}

//
// ================= Evidence =================
//

/// One atomic, confidence-scored claim with provenance.
/// Immutable once produced; the per-run collection only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub id: Uuid,
    pub source_type: String,
    pub source_ref: String,
    pub claim: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub raw_snippet: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Evidence {
    pub fn new(
        source_type: &str,
        source_ref: &str,
        claim: String,
        confidence: f64,
        tags: &[&str],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_type: source_type.to_string(),
            source_ref: source_ref.to_string(),
            claim,
            // Invariant: confidence stays inside [0, 1].
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
            raw_snippet: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    pub fn with_snippet(mut self, snippet: String) -> Self {
        self.raw_snippet = Some(snippet);
        self
    }

    /// Citation key used in rationale narratives: first 6 hex chars of the id.
    pub fn citation(&self) -> String {
        let hex = self.id.simple().to_string();
        format!("[{}]", &hex[..6])
    }
}

//
// ================= Signals =================
//

/// Derived, recomputable snapshot of the evidence collection.
/// Always rebuilt from the full evidence log, never patched in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signals {
    pub volatility_20d: Option<f64>,
    pub drawdown_20d: Option<f64>,
    pub red_flags: Vec<String>,
    /// -1.0 to 1.0
    pub momentum: f64,
    /// 0.0 to 1.0
    pub volatility_risk: f64,
    /// 0.0 to 1.0
    pub event_risk: f64,
    /// -1.0 to 1.0
    pub sentiment: f64,
    /// 0.0 to 1.0
    pub uncertainty: f64,
    pub conflict_score: f64,
}

//
// ================= Report =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rationale {
    pub bull_case: String,
    pub bear_case: String,
}

/// Terminal artifact of a run. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictReport {
    pub request: RequestInput,
    pub signals: Signals,
    pub research_plan: ResearchPlan,
    pub evidence: Vec<Evidence>,
    pub verdict: Verdict,
    pub rationale: Rationale,
    pub risks: Vec<String>,
    pub next_actions: Vec<String>,
}

//
// ================= Parsing / Display =================
//

impl FromStr for Horizon {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1w" => Ok(Horizon::OneWeek),
            "1m" => Ok(Horizon::OneMonth),
            "3m" => Ok(Horizon::ThreeMonths),
            "1y" => Ok(Horizon::OneYear),
            other => Err(ResearchError::InvalidRequest(format!(
                "unknown horizon '{}' (expected 1w, 1m, 3m or 1y)",
                other
            ))),
        }
    }
}

impl FromStr for RiskProfile {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(RiskProfile::Conservative),
            "normal" => Ok(RiskProfile::Normal),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(ResearchError::InvalidRequest(format!(
                "unknown risk profile '{}' (expected conservative, normal or aggressive)",
                other
            ))),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Horizon::OneWeek => "1w",
            Horizon::OneMonth => "1m",
            Horizon::ThreeMonths => "3m",
            Horizon::OneYear => "1y",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for CrewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrewKind::Price => "price",
            CrewKind::News => "news",
            CrewKind::Fundamentals => "fundamentals",
            CrewKind::OptionsLiquidity => "options_liquidity",
            CrewKind::RegulationLegal => "regulation_legal",
            CrewKind::Debate => "debate",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::StrongBuy => "STRONG_BUY",
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "SELL",
            Verdict::StrongSell => "STRONG_SELL",
            Verdict::DoNotTouch => "DO_NOT_TOUCH",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = RequestInput::new("acme", "1m", "normal").unwrap();
        assert_eq!(request.ticker, "ACME");
        assert_eq!(request.horizon, Horizon::OneMonth);
        assert_eq!(request.risk_profile, RiskProfile::Normal);
    }

    #[test]
    fn test_invalid_horizon_rejected() {
        let result = RequestInput::new("ACME", "6m", "normal");
        assert!(matches!(result, Err(ResearchError::InvalidRequest(_))));
    }

    #[test]
    fn test_invalid_risk_profile_rejected() {
        let result = RequestInput::new("ACME", "1m", "yolo");
        assert!(matches!(result, Err(ResearchError::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_ticker_rejected() {
        let result = RequestInput::new("  ", "1m", "normal");
        assert!(matches!(result, Err(ResearchError::InvalidRequest(_))));
    }

    #[test]
    fn test_evidence_confidence_clamped() {
        let evidence = Evidence::new("price", "feed", "claim".to_string(), 1.7, &[]);
        assert_eq!(evidence.confidence, 1.0);
    }

    #[test]
    fn test_citation_is_six_hex_chars() {
        let evidence = Evidence::new("price", "feed", "claim".to_string(), 0.5, &[]);
        let citation = evidence.citation();
        assert_eq!(citation.len(), 8); // brackets + 6 chars
        assert!(citation.starts_with('['));
        assert!(citation[1..7].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verdict_serializes_screaming_case() {
        let json = serde_json::to_string(&Verdict::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
    }
}
