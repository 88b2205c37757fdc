//! Accept or reject an intent proposal on its confidence score
//!
//! The extractor is probabilistic; a below-threshold proposal is more
//! likely a misinterpretation than a correct-but-uncertain one, so the
//! interpreter asks for a rephrase instead of risking a wrong mutation.

use crate::core::config::DEFAULT_MIN_CONFIDENCE;
use crate::llm::extractor::IntentProposal;

/// Pure accept/reject decision on proposal confidence
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceGate {
    min_confidence: f32,
}

impl ConfidenceGate {
    /// Build a gate with the given threshold, clamped to [0, 1]
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }

    /// Whether the proposal is trustworthy enough to act on
    pub fn accept(&self, proposal: &IntentProposal) -> bool {
        proposal.confidence >= self.min_confidence
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::extractor::ContactAction;
    use proptest::prelude::*;

    fn proposal(confidence: f32) -> IntentProposal {
        IntentProposal {
            action: ContactAction::List,
            name: None,
            phone: None,
            confidence,
        }
    }

    #[test]
    fn test_threshold_boundary_accepted() {
        let gate = ConfidenceGate::default();
        assert!(gate.accept(&proposal(0.7)));
        assert!(gate.accept(&proposal(1.0)));
        assert!(!gate.accept(&proposal(0.699)));
    }

    #[test]
    fn test_custom_threshold() {
        let gate = ConfidenceGate::new(0.5);
        assert!(gate.accept(&proposal(0.5)));
        assert!(!gate.accept(&proposal(0.4)));
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ConfidenceGate::new(2.0).min_confidence(), 1.0);
        assert_eq!(ConfidenceGate::new(-1.0).min_confidence(), 0.0);
        // A zero threshold accepts everything
        assert!(ConfidenceGate::new(-1.0).accept(&proposal(0.0)));
    }

    proptest! {
        #[test]
        fn below_default_threshold_always_rejected(confidence in 0.0f32..0.7) {
            prop_assert!(!ConfidenceGate::default().accept(&proposal(confidence)));
        }

        #[test]
        fn at_or_above_default_threshold_always_accepted(confidence in 0.7f32..=1.0) {
            prop_assert!(ConfidenceGate::default().accept(&proposal(confidence)));
        }
    }
}
