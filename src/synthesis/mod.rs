//! Signal synthesis
//!
//! One left-to-right fold over the evidence collection, pure and
//! deterministic. Signals are always recomputed from the full log, so the
//! re-synthesis after a triggered pass reproduces base-pass values for any
//! unchanged evidence.

use crate::classifier::{self, Polarity};
use crate::models::{Evidence, Signals};
use tracing::debug;

/// Known simplification: the conflict score is not yet computed from
/// evidence. Kept as a fixed placeholder rather than a formula.
pub const CONFLICT_SCORE_PLACEHOLDER: f64 = 0.1;

/// Event risk assigned as soon as any red flag appears (monotonic max).
const RED_FLAG_EVENT_RISK: f64 = 0.9;

pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn build_signals(&self, evidence: &[Evidence]) -> Signals {
        let mut volatility = None;
        let mut drawdown = None;
        let mut red_flags = Vec::new();

        let mut sentiment_sum = 0.0;
        let mut sentiment_count = 0u32;
        let mut momentum_sum = 0.0;
        let mut momentum_count = 0u32;

        let mut event_risk: f64 = 0.0;
        let mut uncertainty_accum = 0.0;

        for item in evidence {
            // Each rule is independent; one item can feed several signals.

            // Volatility/drawdown: last parseable claim wins, no averaging.
            if has_tag(item, "volatility") && item.claim.contains("Volatility for") {
                if let Some(value) = parse_trailing_percent(&item.claim) {
                    volatility = Some(value);
                }
            }

            if has_tag(item, "drawdown") && item.claim.contains("drawdown for") {
                if let Some(value) = parse_trailing_percent(&item.claim) {
                    drawdown = Some(value);
                }
            }

            // Legal red flags, format "...: item1, item2".
            if has_tag(item, "legal") && item.claim.contains("red flags") {
                if let Some(list) = item.claim.rsplit(": ").next() {
                    red_flags.extend(list.split(", ").map(str::to_string));
                }
                event_risk = event_risk.max(RED_FLAG_EVENT_RISK);
            }

            // Sentiment from tagged evidence or anything news-sourced.
            if has_tag(item, "sentiment") || item.source_type.contains("news") {
                match classifier::sentiment_polarity(&item.claim) {
                    Some(Polarity::Positive) => {
                        sentiment_sum += 0.8;
                        sentiment_count += 1;
                    }
                    Some(Polarity::Negative) => {
                        sentiment_sum -= 0.8;
                        sentiment_count += 1;
                    }
                    None => {}
                }
            }

            // Momentum from valuation conclusions.
            if has_tag(item, "valuation") {
                match classifier::valuation_polarity(&item.claim) {
                    Some(Polarity::Positive) => {
                        momentum_sum += 0.5;
                        momentum_count += 1;
                    }
                    Some(Polarity::Negative) => {
                        momentum_sum -= 0.5;
                        momentum_count += 1;
                    }
                    None => {}
                }
            }

            uncertainty_accum += 1.0 - item.confidence;
        }

        let sentiment = if sentiment_count > 0 {
            sentiment_sum / f64::from(sentiment_count)
        } else {
            0.0
        };
        let momentum = if momentum_count > 0 {
            momentum_sum / f64::from(momentum_count)
        } else {
            0.0
        };

        let volatility_risk = match volatility {
            Some(v) if v > 0.40 => 0.9,
            Some(v) if v > 0.20 => 0.5,
            Some(_) => 0.1,
            None => 0.0,
        };

        // Maximal uncertainty when there is nothing to go on.
        let uncertainty = if evidence.is_empty() {
            1.0
        } else {
            uncertainty_accum / evidence.len() as f64
        };

        debug!(
            evidence_count = evidence.len(),
            ?volatility,
            sentiment,
            momentum,
            event_risk,
            "Signals synthesized"
        );

        Signals {
            volatility_20d: volatility,
            drawdown_20d: drawdown,
            red_flags,
            momentum,
            volatility_risk,
            event_risk,
            sentiment,
            uncertainty,
            conflict_score: CONFLICT_SCORE_PLACEHOLDER,
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn has_tag(item: &Evidence, tag: &str) -> bool {
    item.tags.iter().any(|t| t == tag)
}

/// Parse the "... is NN.NN%" pattern at the end of a claim into a fraction.
/// Failures are silent; the signal keeps its default.
fn parse_trailing_percent(claim: &str) -> Option<f64> {
    let (_, tail) = claim.rsplit_once(" is ")?;
    let cleaned = tail.trim().trim_end_matches(|c: char| c == '%' || c == '.');
    cleaned.parse::<f64>().ok().map(|v| v / 100.0)
}
