//! Verdict engine
//!
//! Deterministic scalar scoring over signals, plus a citation pass that
//! assigns each evidence claim to the bull or bear narrative. The label is
//! a pure function of the score thresholds.

use crate::classifier::{self, Stance};
use crate::models::{Evidence, Rationale, Signals, Verdict};
use tracing::debug;

pub const NO_BULL_SIGNALS: &str = "No major bull signals.";
pub const NO_BEAR_SIGNALS: &str = "No major bear signals.";

pub struct VerdictEngine;

impl VerdictEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_verdict(
        &self,
        signals: &Signals,
        evidence: &[Evidence],
    ) -> (Verdict, Rationale, f64) {
        let mut score = 0.0;
        let mut bull_lines = Vec::new();
        let mut bear_lines = Vec::new();

        // Feature-based scoring.
        if signals.sentiment > 0.3 {
            score += 1.0;
            bull_lines.push(format!(
                "Strong positive sentiment ({:.2}).",
                signals.sentiment
            ));
        } else if signals.sentiment < -0.3 {
            score -= 1.0;
            bear_lines.push(format!("Negative sentiment ({:.2}).", signals.sentiment));
        }

        // Momentum counts on sign alone, without a rationale line.
        if signals.momentum > 0.0 {
            score += 1.0;
        } else if signals.momentum < 0.0 {
            score -= 1.0;
        }

        if signals.volatility_risk > 0.7 {
            score -= 0.5;
            bear_lines.push(format!(
                "High volatility risk ({:.1}).",
                signals.volatility_risk
            ));
        }

        if signals.event_risk > 0.5 {
            score -= 2.0;
            bear_lines.push("Significant event/regulatory risk detected.".to_string());
        }

        // Citation pass: every claim lands in one narrative or neither.
        for item in evidence {
            match classifier::narrative_stance(&item.claim) {
                Some(Stance::Bull) => bull_lines.push(format!("{} {}", item.claim, item.citation())),
                Some(Stance::Bear) => bear_lines.push(format!("{} {}", item.claim, item.citation())),
                None => {}
            }
        }

        let verdict = label_for_score(score);
        let confidence = (1.0 - signals.uncertainty).max(0.0);

        debug!(score, verdict = %verdict, confidence, "Verdict computed");

        let rationale = Rationale {
            bull_case: render_case(&bull_lines, NO_BULL_SIGNALS),
            bear_case: render_case(&bear_lines, NO_BEAR_SIGNALS),
        };

        (verdict, rationale, confidence)
    }
}

impl Default for VerdictEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn label_for_score(score: f64) -> Verdict {
    if score >= 1.5 {
        Verdict::StrongBuy
    } else if score >= 0.5 {
        Verdict::Buy
    } else if score <= -1.5 {
        Verdict::StrongSell
    } else if score <= -0.5 {
        Verdict::Sell
    } else {
        Verdict::Hold
    }
}

/// Bulleted narrative, or an explicit placeholder so downstream rendering
/// is never blank.
fn render_case(lines: &[String], placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_string()
    } else {
        format!("- {}", lines.join("\n- "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Evidence;

    fn evidence(claim: &str) -> Evidence {
        Evidence::new("news", "test", claim.to_string(), 0.8, &[])
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(label_for_score(1.5), Verdict::StrongBuy);
        assert_eq!(label_for_score(0.5), Verdict::Buy);
        assert_eq!(label_for_score(0.0), Verdict::Hold);
        assert_eq!(label_for_score(-0.5), Verdict::Sell);
        assert_eq!(label_for_score(-1.5), Verdict::StrongSell);
        assert_eq!(label_for_score(0.4), Verdict::Hold);
        assert_eq!(label_for_score(-0.4), Verdict::Hold);
    }

    #[test]
    fn test_positive_sentiment_and_momentum_score_strong_buy() {
        let signals = Signals {
            sentiment: 0.8,
            momentum: 0.5,
            uncertainty: 0.2,
            ..Signals::default()
        };

        let (verdict, rationale, confidence) =
            VerdictEngine::new().compute_verdict(&signals, &[]);
        assert_eq!(verdict, Verdict::StrongBuy);
        assert!(rationale.bull_case.contains("Strong positive sentiment"));
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_event_risk_dominates() {
        let signals = Signals {
            sentiment: 0.8,
            momentum: 0.5,
            event_risk: 0.9,
            ..Signals::default()
        };

        // +1 +1 -2 = 0.
        let (verdict, rationale, _) = VerdictEngine::new().compute_verdict(&signals, &[]);
        assert_eq!(verdict, Verdict::Hold);
        assert!(rationale
            .bear_case
            .contains("Significant event/regulatory risk detected."));
    }

    #[test]
    fn test_volatility_risk_penalty() {
        let signals = Signals {
            volatility_risk: 0.9,
            ..Signals::default()
        };

        let (verdict, rationale, _) = VerdictEngine::new().compute_verdict(&signals, &[]);
        assert_eq!(verdict, Verdict::Sell);
        assert!(rationale.bear_case.contains("High volatility risk (0.9)."));
    }

    #[test]
    fn test_confidence_clamped_at_zero() {
        let signals = Signals {
            uncertainty: 1.0,
            ..Signals::default()
        };
        let (_, _, confidence) = VerdictEngine::new().compute_verdict(&signals, &[]);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_empty_rationale_uses_placeholders() {
        let (verdict, rationale, _) =
            VerdictEngine::new().compute_verdict(&Signals::default(), &[]);
        assert_eq!(verdict, Verdict::Hold);
        assert_eq!(rationale.bull_case, NO_BULL_SIGNALS);
        assert_eq!(rationale.bear_case, NO_BEAR_SIGNALS);
    }

    #[test]
    fn test_citation_assignment() {
        let items = vec![
            evidence("ACME looks undervalued at these levels"),
            evidence("Identified potential red flags: lawsuit"),
            evidence("ACME unveils new product line"),
        ];

        let (_, rationale, _) = VerdictEngine::new().compute_verdict(&Signals::default(), &items);

        assert!(rationale.bull_case.contains("undervalued"));
        assert!(rationale.bull_case.contains(&items[0].citation()));
        assert!(rationale.bear_case.contains("red flags"));
        assert!(rationale.bear_case.contains(&items[1].citation()));
        // The neutral claim is cited nowhere.
        assert!(!rationale.bull_case.contains("product line"));
        assert!(!rationale.bear_case.contains("product line"));
    }
}
