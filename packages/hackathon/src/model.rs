use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{Address, Phase, SubmissionStatus};
use fhe::{Handle, Width};
use serde::{Deserialize, Serialize};

pub type HackathonId = u64;
pub type SubmissionId = u32;

/// Width judges encrypt their rubric total at.
pub const SCORE_WIDTH: Width = Width::U8;
/// Width judge scores are summed at.
pub const ACCUMULATOR_WIDTH: Width = Width::U16;
/// Width aggregates are published at for public decryption.
pub const DECRYPTION_WIDTH: Width = Width::U32;
/// Width of the encrypted off-chain content reference.
pub const REFERENCE_WIDTH: Width = Width::U128;

/// Hard cap on the judge set so a full U8 score from every judge fits the accumulator.
pub const MAX_JUDGES: usize = 256;

const _: () = assert!(MAX_JUDGES as u32 * u8::MAX as u32 <= u16::MAX as u32);

/// Organizer-supplied configuration for a new hackathon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackathonConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prize: String,
    pub submission_deadline: DateTime<Utc>,
    pub judging_deadline: DateTime<Utc>,
    pub judges: Vec<Address>,
    /// 0 means unlimited.
    #[serde(default)]
    pub max_participants: u32,
}

/// Contact and team details supplied at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub team_name: String,
    /// Informational only; members are not checked for registration.
    #[serde(default)]
    pub team_members: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub address: Address,
    pub email: String,
    pub handle: String,
    pub team_name: String,
    pub team_members: Vec<Address>,
    pub registered_at: DateTime<Utc>,
    pub has_submitted: bool,
}

/// One judge's encrypted score for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub judge: Address,
    pub handle: Handle,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub(crate) id: SubmissionId,
    pub(crate) participant: Address,
    pub(crate) encrypted_reference: Handle,
    pub(crate) submitted_at: DateTime<Utc>,
    pub(crate) status: SubmissionStatus,
    pub(crate) judge_count: u32,
    /// Indexed by the judge's position in the hackathon's judge list.
    pub(crate) scores: Vec<Option<Score>>,
}

/// Public fields of a submission. The encrypted reference is never exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInfo {
    pub id: SubmissionId,
    pub participant: Address,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    pub judge_count: u32,
}

impl From<&Submission> for SubmissionInfo {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id,
            participant: s.participant,
            submitted_at: s.submitted_at,
            status: s.status,
            judge_count: s.judge_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedScore {
    pub score: u32,
    pub is_decrypted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub participant: Address,
    /// 1, 2 or 3.
    pub ranking: u8,
    pub final_score: u32,
    pub submission_id: SubmissionId,
}

/// Full record of one hackathon. Participant, submission and score data are
/// owned here and never removed.
#[derive(Debug, Clone)]
pub(crate) struct Hackathon {
    pub(crate) id: HackathonId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) prize: String,
    pub(crate) organizer: Address,
    pub(crate) submission_deadline: DateTime<Utc>,
    pub(crate) judging_deadline: DateTime<Utc>,
    pub(crate) judges: Vec<Address>,
    pub(crate) max_participants: u32,
    pub(crate) created_at: DateTime<Utc>,

    pub(crate) phase: Phase,
    pub(crate) participant_count: u32,
    pub(crate) submission_count: u32,
    pub(crate) judge_access_granted: bool,
    pub(crate) winners_finalized: bool,

    pub(crate) participants: Vec<Participant>,
    pub(crate) participant_index: HashMap<Address, usize>,
    pub(crate) submissions: Vec<Submission>,
    pub(crate) aggregates: Vec<Handle>,
    pub(crate) decrypted: Vec<DecryptedScore>,
    pub(crate) winners: Vec<Winner>,
}

impl Hackathon {
    pub(crate) fn new(
        id: HackathonId,
        organizer: Address,
        config: HackathonConfig,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: config.name.trim().to_string(),
            description: config.description,
            prize: config.prize,
            organizer,
            submission_deadline: config.submission_deadline,
            judging_deadline: config.judging_deadline,
            judges: config.judges,
            max_participants: config.max_participants,
            created_at,
            phase: Phase::RegistrationOpen,
            participant_count: 0,
            submission_count: 0,
            judge_access_granted: false,
            winners_finalized: false,
            participants: Vec::new(),
            participant_index: HashMap::new(),
            submissions: Vec::new(),
            aggregates: Vec::new(),
            decrypted: Vec::new(),
            winners: Vec::new(),
        }
    }

    pub(crate) fn judge_position(&self, account: Address) -> Option<usize> {
        self.judges.iter().position(|j| *j == account)
    }

    pub(crate) fn is_judge(&self, account: Address) -> bool {
        self.judge_position(account).is_some()
    }

    pub(crate) fn participant(&self, account: Address) -> Option<&Participant> {
        self.participant_index
            .get(&account)
            .map(|&idx| &self.participants[idx])
    }

    pub(crate) fn submission(&self, id: SubmissionId) -> Option<&Submission> {
        self.submissions.get(id as usize)
    }

    pub(crate) fn details(&self) -> HackathonDetails {
        HackathonDetails {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            prize: self.prize.clone(),
            organizer: self.organizer,
            submission_deadline: self.submission_deadline,
            judging_deadline: self.judging_deadline,
            judges: self.judges.clone(),
            max_participants: self.max_participants,
            created_at: self.created_at,
            phase: self.phase,
            participant_count: self.participant_count,
            submission_count: self.submission_count,
            judge_access_granted: self.judge_access_granted,
            winners_finalized: self.winners_finalized,
        }
    }
}

/// Snapshot of a hackathon's configuration and phase state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackathonDetails {
    pub id: HackathonId,
    pub name: String,
    pub description: String,
    pub prize: String,
    pub organizer: Address,
    pub submission_deadline: DateTime<Utc>,
    pub judging_deadline: DateTime<Utc>,
    pub judges: Vec<Address>,
    pub max_participants: u32,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub participant_count: u32,
    pub submission_count: u32,
    pub judge_access_granted: bool,
    pub winners_finalized: bool,
}
