use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a hackathon.
///
/// Phases only move forward:
/// `RegistrationOpen -> SubmissionsOpen -> Judging -> Completed`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "PascalCase")]
pub enum Phase {
    /// Created, nobody registered yet.
    #[default]
    RegistrationOpen,
    /// At least one participant registered; submissions are accepted.
    SubmissionsOpen,
    /// The organizer granted judge access; judges are scoring.
    Judging,
    /// Aggregate scores published for public decryption.
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegistrationOpen => "RegistrationOpen",
            Self::SubmissionsOpen => "SubmissionsOpen",
            Self::Judging => "Judging",
            Self::Completed => "Completed",
        }
    }

    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Self::RegistrationOpen => Some(Self::SubmissionsOpen),
            Self::SubmissionsOpen => Some(Self::Judging),
            Self::Judging => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Move to `target`, which must be the immediate successor.
    pub fn advance_to(&mut self, target: Phase) -> Result<(), PhaseTransitionError> {
        if self.next() != Some(target) {
            return Err(PhaseTransitionError {
                from: *self,
                to: target,
            });
        }
        *self = target;
        Ok(())
    }

    /// Whether registrations are still structurally possible.
    pub fn accepts_registrations(&self) -> bool {
        matches!(self, Self::RegistrationOpen | Self::SubmissionsOpen)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Illegal phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal phase transition {from} -> {to}")]
pub struct PhaseTransitionError {
    pub from: Phase,
    pub to: Phase,
}
