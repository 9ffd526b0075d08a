//! Lifecycle of a single webhook turn.

use crate::domain::foundation::StateMachine;

/// Phase of the adapter handling one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Request is being parsed and the session-start hook evaluated.
    Initializing,
    /// Ready for the application's callback to ask or tell.
    AwaitingCallback,
    /// A response has been handed to the transport.
    Responded,
    /// Construction failed; no response can be produced.
    Failed,
}

impl StateMachine for TurnPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TurnPhase::*;
        matches!(
            (self, target),
            (Initializing, AwaitingCallback) | (Initializing, Failed) | (AwaitingCallback, Responded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TurnPhase::*;
        match self {
            Initializing => vec![AwaitingCallback, Failed],
            AwaitingCallback => vec![Responded],
            Responded | Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let phase = TurnPhase::Initializing
            .transition_to(TurnPhase::AwaitingCallback)
            .unwrap();
        assert_eq!(phase.transition_to(TurnPhase::Responded), Ok(TurnPhase::Responded));
    }

    #[test]
    fn responded_and_failed_are_terminal() {
        assert!(TurnPhase::Responded.is_terminal());
        assert!(TurnPhase::Failed.is_terminal());
        assert!(!TurnPhase::AwaitingCallback.is_terminal());
    }

    #[test]
    fn cannot_respond_twice_or_after_failure() {
        assert!(TurnPhase::Responded.transition_to(TurnPhase::Responded).is_err());
        assert!(TurnPhase::Failed.transition_to(TurnPhase::Responded).is_err());
    }

    #[test]
    fn transitions_are_consistent() {
        for phase in [
            TurnPhase::Initializing,
            TurnPhase::AwaitingCallback,
            TurnPhase::Responded,
            TurnPhase::Failed,
        ] {
            for target in phase.valid_transitions() {
                assert!(phase.can_transition_to(&target), "{phase:?} -> {target:?}");
            }
        }
    }
}
