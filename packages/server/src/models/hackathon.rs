use chrono::{DateTime, Utc};
use common::Address;
use hackathon::{HackathonConfig, Registration};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize)]
pub struct CreateHackathonRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prize: String,
    pub submission_deadline: DateTime<Utc>,
    pub judging_deadline: DateTime<Utc>,
    pub judges: Vec<Address>,
    /// Omitted or 0 means unlimited.
    pub max_participants: Option<u32>,
}

impl From<CreateHackathonRequest> for HackathonConfig {
    fn from(req: CreateHackathonRequest) -> Self {
        HackathonConfig {
            name: req.name,
            description: req.description,
            prize: req.prize,
            submission_deadline: req.submission_deadline,
            judging_deadline: req.judging_deadline,
            judges: req.judges,
            max_participants: req.max_participants.unwrap_or(0),
        }
    }
}

/// Validate free-text fields the contract stores verbatim.
pub fn validate_create_hackathon(req: &CreateHackathonRequest) -> Result<(), AppError> {
    if req.name.trim().chars().count() > 256 {
        return Err(AppError::Validation("Name must be at most 256 characters".into()));
    }
    if req.description.len() > 64 * 1024 {
        return Err(AppError::Validation("Description is too long".into()));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_members: Vec<Address>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            email: req.email.trim().to_string(),
            handle: req.handle,
            team_name: req.team_name,
            team_members: req.team_members,
        }
    }
}

#[derive(Serialize)]
pub struct IsJudgeResponse {
    pub is_judge: bool,
}
