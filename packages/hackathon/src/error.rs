use common::{Address, Phase};
use fhe::FheError;
use thiserror::Error;

use crate::model::{HackathonId, SubmissionId};

/// Failure class of a rejected operation. Every failure leaves state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; retry with corrected input.
    Validation,
    /// Unknown hackathon or submission.
    NotFound,
    /// Wrong caller role.
    Authorization,
    /// Outside the operation's deadline window.
    Timing,
    /// Phase or counter precondition not met.
    State,
    /// Encryption or decryption proof rejected.
    Proof,
    /// The encryption service failed for a reason unrelated to the caller's input.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HackathonError {
    #[error("Invalid hackathon configuration: {0}")]
    InvalidConfig(String),

    #[error("Email must not be empty")]
    MissingEmail,

    #[error("Expected {expected} clear scores, got {actual}")]
    ScoreCountMismatch { expected: u32, actual: usize },

    #[error("Hackathon {0} not found")]
    HackathonNotFound(HackathonId),

    #[error("Submission {0} not found")]
    InvalidSubmission(SubmissionId),

    #[error("Only the organizer can perform this action")]
    NotOrganizer,

    #[error("{0} is not a judge of this hackathon")]
    NotJudge(Address),

    #[error("Judges cannot register as participants")]
    JudgeCannotParticipate,

    #[error("The submission deadline has passed")]
    DeadlinePassed,

    #[error("The submission deadline has not been reached yet")]
    SubmissionDeadlineNotReached,

    #[error("The judging deadline has not been reached yet")]
    JudgingDeadlineNotReached,

    #[error("Scores are only accepted between the submission and judging deadlines")]
    OutOfWindow,

    #[error("{0} is already registered")]
    AlreadyRegistered(Address),

    #[error("Participant capacity of {0} reached")]
    CapacityReached(u32),

    #[error("{0} is not registered for this hackathon")]
    NotRegistered(Address),

    #[error("{0} has already submitted a project")]
    AlreadySubmitted(Address),

    #[error("Judge access has already been granted")]
    AccessAlreadyGranted,

    #[error("Judge access has not been granted yet")]
    AccessNotGranted,

    #[error("The hackathon has no submissions")]
    NoSubmissions,

    #[error("Judge {judge} already scored submission {submission}")]
    AlreadyScored {
        submission: SubmissionId,
        judge: Address,
    },

    #[error("Judge {judge} has not scored submission {submission}")]
    IncompleteScoring {
        submission: SubmissionId,
        judge: Address,
    },

    #[error("Expected phase {expected}, hackathon is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Winners have not been calculated yet")]
    WinnersNotCalculated,

    #[error("Winners have already been finalized")]
    WinnersAlreadyFinalized,

    #[error("Encrypted input proof rejected")]
    InvalidProof,

    #[error("Decryption proof rejected")]
    InvalidDecryptionProof,

    #[error("Encryption service error: {0}")]
    Service(FheError),
}

impl HackathonError {
    pub fn kind(&self) -> ErrorKind {
        use HackathonError::*;
        match self {
            InvalidConfig(_) | MissingEmail | ScoreCountMismatch { .. } => ErrorKind::Validation,
            HackathonNotFound(_) | InvalidSubmission(_) => ErrorKind::NotFound,
            NotOrganizer | NotJudge(_) | JudgeCannotParticipate => ErrorKind::Authorization,
            DeadlinePassed
            | SubmissionDeadlineNotReached
            | JudgingDeadlineNotReached
            | OutOfWindow => ErrorKind::Timing,
            AlreadyRegistered(_)
            | CapacityReached(_)
            | NotRegistered(_)
            | AlreadySubmitted(_)
            | AccessAlreadyGranted
            | AccessNotGranted
            | NoSubmissions
            | AlreadyScored { .. }
            | IncompleteScoring { .. }
            | WrongPhase { .. }
            | WinnersNotCalculated
            | WinnersAlreadyFinalized => ErrorKind::State,
            InvalidProof | InvalidDecryptionProof => ErrorKind::Proof,
            Service(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        use HackathonError::*;
        match self {
            InvalidConfig(_) => "INVALID_CONFIG",
            MissingEmail => "MISSING_EMAIL",
            ScoreCountMismatch { .. } => "SCORE_COUNT_MISMATCH",
            HackathonNotFound(_) => "HACKATHON_NOT_FOUND",
            InvalidSubmission(_) => "INVALID_SUBMISSION",
            NotOrganizer => "NOT_ORGANIZER",
            NotJudge(_) => "NOT_JUDGE",
            JudgeCannotParticipate => "JUDGE_CANNOT_PARTICIPATE",
            DeadlinePassed => "DEADLINE_PASSED",
            SubmissionDeadlineNotReached => "SUBMISSION_DEADLINE_NOT_REACHED",
            JudgingDeadlineNotReached => "JUDGING_DEADLINE_NOT_REACHED",
            OutOfWindow => "OUT_OF_WINDOW",
            AlreadyRegistered(_) => "ALREADY_REGISTERED",
            CapacityReached(_) => "CAPACITY_REACHED",
            NotRegistered(_) => "NOT_REGISTERED",
            AlreadySubmitted(_) => "ALREADY_SUBMITTED",
            AccessAlreadyGranted => "ACCESS_ALREADY_GRANTED",
            AccessNotGranted => "ACCESS_NOT_GRANTED",
            NoSubmissions => "NO_SUBMISSIONS",
            AlreadyScored { .. } => "ALREADY_SCORED",
            IncompleteScoring { .. } => "INCOMPLETE_SCORING",
            WrongPhase { .. } => "WRONG_PHASE",
            WinnersNotCalculated => "WINNERS_NOT_CALCULATED",
            WinnersAlreadyFinalized => "WINNERS_ALREADY_FINALIZED",
            InvalidProof => "INVALID_PROOF",
            InvalidDecryptionProof => "INVALID_DECRYPTION_PROOF",
            Service(_) => "ENCRYPTION_SERVICE_ERROR",
        }
    }

    /// Map a failure importing a caller-supplied ciphertext.
    pub(crate) fn from_input(err: FheError) -> Self {
        match err {
            FheError::InvalidInputProof(_)
            | FheError::UnknownHandle(_)
            | FheError::WidthMismatch { .. } => HackathonError::InvalidProof,
            other => HackathonError::Service(other),
        }
    }

    /// Map a failure verifying a public decryption.
    pub(crate) fn from_decryption(err: FheError) -> Self {
        match err {
            FheError::InvalidDecryptionProof
            | FheError::MalformedEncoding(_)
            | FheError::NotPubliclyDecryptable(_) => HackathonError::InvalidDecryptionProof,
            other => HackathonError::Service(other),
        }
    }
}

impl From<FheError> for HackathonError {
    fn from(err: FheError) -> Self {
        HackathonError::Service(err)
    }
}
