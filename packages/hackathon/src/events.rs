use chrono::{DateTime, Utc};
use common::Address;
use common::event::Event;
use fhe::Handle;
use serde::{Deserialize, Serialize};

use crate::model::{HackathonId, SubmissionId};

/// One event per state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum HackathonEvent {
    HackathonCreated {
        hackathon_id: HackathonId,
        organizer: Address,
        name: String,
        submission_deadline: DateTime<Utc>,
        judging_deadline: DateTime<Utc>,
        judge_count: u32,
    },
    ParticipantRegistered {
        hackathon_id: HackathonId,
        participant: Address,
        team_name: String,
    },
    ProjectSubmitted {
        hackathon_id: HackathonId,
        submission_id: SubmissionId,
        participant: Address,
    },
    JudgeAccessGranted {
        hackathon_id: HackathonId,
        submission_count: u32,
    },
    ScoreSubmitted {
        hackathon_id: HackathonId,
        submission_id: SubmissionId,
        judge: Address,
    },
    /// Aggregates are computed and marked publicly decryptable; ranking is still pending.
    WinnersCalculated {
        hackathon_id: HackathonId,
        aggregates: Vec<Handle>,
    },
    ScoreDecrypted {
        hackathon_id: HackathonId,
        submission_id: SubmissionId,
        score: u32,
    },
    /// Unfilled ranks carry the zero address.
    WinnersAnnounced {
        hackathon_id: HackathonId,
        first: Address,
        second: Address,
        third: Address,
    },
}

impl HackathonEvent {
    pub fn hackathon_id(&self) -> HackathonId {
        match self {
            Self::HackathonCreated { hackathon_id, .. }
            | Self::ParticipantRegistered { hackathon_id, .. }
            | Self::ProjectSubmitted { hackathon_id, .. }
            | Self::JudgeAccessGranted { hackathon_id, .. }
            | Self::ScoreSubmitted { hackathon_id, .. }
            | Self::WinnersCalculated { hackathon_id, .. }
            | Self::ScoreDecrypted { hackathon_id, .. }
            | Self::WinnersAnnounced { hackathon_id, .. } => *hackathon_id,
        }
    }
}

impl Event for HackathonEvent {
    fn topic(&self) -> &str {
        match self {
            Self::HackathonCreated { .. } => "hackathon_created",
            Self::ParticipantRegistered { .. } => "participant_registered",
            Self::ProjectSubmitted { .. } => "project_submitted",
            Self::JudgeAccessGranted { .. } => "judge_access_granted",
            Self::ScoreSubmitted { .. } => "score_submitted",
            Self::WinnersCalculated { .. } => "winners_calculated",
            Self::ScoreDecrypted { .. } => "score_decrypted",
            Self::WinnersAnnounced { .. } => "winners_announced",
        }
    }
}
