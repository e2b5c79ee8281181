//! Claim classifier
//!
//! All keyword matching against claim text lives here, behind one small
//! interface, so the Synthesizer and Verdict Engine never touch raw string
//! matching themselves. The lists can be swapped for a structured tagging
//! contract without changing either engine.

/// Static keyword lists — zero allocation
const POSITIVE_MARKERS: &[&str] = &["record breaking", "positive", "Buy"];
const NEGATIVE_MARKERS: &[&str] = &["lawsuit", "negative"];

const UNDERVALUED_MARKER: &str = "undervalued";
const OVERVALUED_MARKER: &str = "overvalued";

// Citation assignment uses its own marker sets: any risk-flavored claim
// belongs in the bear narrative even when sentiment-neutral.
const BULL_MARKERS: &[&str] = &["undervalued", "positive", "Buy"];
const BEAR_MARKERS: &[&str] = &["overvalued", "negative", "risk", "red flags"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Bull,
    Bear,
}

/// Sentiment polarity of a claim, if any marker matches.
/// Positive markers win over negative ones, matching the original ordering.
pub fn sentiment_polarity(claim: &str) -> Option<Polarity> {
    if POSITIVE_MARKERS.iter().any(|m| claim.contains(m)) {
        Some(Polarity::Positive)
    } else if NEGATIVE_MARKERS.iter().any(|m| claim.contains(m)) {
        Some(Polarity::Negative)
    } else {
        None
    }
}

/// Valuation polarity: undervalued reads as positive momentum,
/// overvalued as negative.
pub fn valuation_polarity(claim: &str) -> Option<Polarity> {
    if claim.contains(UNDERVALUED_MARKER) {
        Some(Polarity::Positive)
    } else if claim.contains(OVERVALUED_MARKER) {
        Some(Polarity::Negative)
    } else {
        None
    }
}

/// Assign a claim to the bull or bear narrative for citation purposes.
/// Claims matching neither set are omitted from the narrative entirely.
pub fn narrative_stance(claim: &str) -> Option<Stance> {
    if BULL_MARKERS.iter().any(|m| claim.contains(m)) {
        Some(Stance::Bull)
    } else if BEAR_MARKERS.iter().any(|m| claim.contains(m)) {
        Some(Stance::Bear)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_sentiment() {
        let cases = vec![
            "ACME announces record breaking quarterly results",
            "Analyst upgrades ACME to Buy",
            "Coverage is broadly positive",
        ];
        for c in cases {
            assert_eq!(sentiment_polarity(c), Some(Polarity::Positive));
        }
    }

    #[test]
    fn test_negative_sentiment() {
        assert_eq!(
            sentiment_polarity("ACME CEO faces lawsuit over tweets"),
            Some(Polarity::Negative)
        );
    }

    #[test]
    fn test_unclassifiable_sentiment() {
        assert_eq!(sentiment_polarity("ACME unveils new product line"), None);
    }

    #[test]
    fn test_valuation_polarity() {
        assert_eq!(
            valuation_polarity("ACME looks undervalued at these levels"),
            Some(Polarity::Positive)
        );
        assert_eq!(
            valuation_polarity("ACME is overvalued versus peers"),
            Some(Polarity::Negative)
        );
        assert_eq!(valuation_polarity("fairly priced"), None);
    }

    #[test]
    fn test_narrative_stance() {
        assert_eq!(narrative_stance("undervalued name"), Some(Stance::Bull));
        assert_eq!(
            narrative_stance("Identified potential red flags: lawsuit"),
            Some(Stance::Bear)
        );
        assert_eq!(
            narrative_stance("elevated volatility risk"),
            Some(Stance::Bear)
        );
        assert_eq!(narrative_stance("ACME unveils new product line"), None);
        // A lawsuit mention alone is a sentiment marker, not a citation marker.
        assert_eq!(narrative_stance("ACME CEO faces lawsuit over tweets"), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        // "Buy" is an analyst rating token, not the common verb.
        assert_eq!(sentiment_polarity("investors buy the dip"), None);
        assert_eq!(
            sentiment_polarity("Analyst upgrades to Buy"),
            Some(Polarity::Positive)
        );
    }
}
