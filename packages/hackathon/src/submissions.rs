use common::SubmissionStatus;
use fhe::{EncryptedValueService, ExternalInput, Handle};
use tracing::{debug, info};

use crate::context::Context;
use crate::contract::Contract;
use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{HackathonId, REFERENCE_WIDTH, Submission, SubmissionId};

impl<S: EncryptedValueService> Contract<S> {
    /// Submit the caller's project as an encrypted content reference.
    pub fn submit_project(
        &mut self,
        ctx: &Context,
        id: HackathonId,
        reference: ExternalInput,
    ) -> Result<SubmissionId, HackathonError> {
        let hackathon = self.hackathon(id)?;
        if ctx.now >= hackathon.submission_deadline {
            return Err(HackathonError::DeadlinePassed);
        }
        let participant = hackathon
            .participant(ctx.caller)
            .ok_or(HackathonError::NotRegistered(ctx.caller))?;
        if participant.has_submitted {
            return Err(HackathonError::AlreadySubmitted(ctx.caller));
        }

        let handle = self
            .fhe
            .verify_and_import(&reference, REFERENCE_WIDTH, self.address, ctx.caller)
            .map_err(|e| {
                debug!(hackathon_id = id, caller = %ctx.caller, error = %e, "submission proof rejected");
                HackathonError::from_input(e)
            })?;
        self.fhe
            .allow_all(&[(handle, ctx.caller), (handle, self.address)])?;

        let hackathon = self.hackathon_mut(id)?;
        let submission_id = hackathon.submissions.len() as SubmissionId;
        let judge_count = hackathon.judges.len();
        hackathon.submissions.push(Submission {
            id: submission_id,
            participant: ctx.caller,
            encrypted_reference: handle,
            submitted_at: ctx.now,
            status: SubmissionStatus::Pending,
            judge_count: 0,
            scores: vec![None; judge_count],
        });
        if let Some(&idx) = hackathon.participant_index.get(&ctx.caller) {
            hackathon.participants[idx].has_submitted = true;
        }
        hackathon.submission_count += 1;

        info!(
            hackathon_id = id,
            submission_id,
            participant = %ctx.caller,
            "Project submitted"
        );
        self.emit(HackathonEvent::ProjectSubmitted {
            hackathon_id: id,
            submission_id,
            participant: ctx.caller,
        });
        Ok(submission_id)
    }

    /// Handle of a submission's encrypted reference. Judges only, after access is granted.
    pub fn encrypted_reference(
        &self,
        ctx: &Context,
        id: HackathonId,
        submission_id: SubmissionId,
    ) -> Result<Handle, HackathonError> {
        let hackathon = self.hackathon(id)?;
        if !hackathon.is_judge(ctx.caller) {
            return Err(HackathonError::NotJudge(ctx.caller));
        }
        if !hackathon.judge_access_granted {
            return Err(HackathonError::AccessNotGranted);
        }
        hackathon
            .submission(submission_id)
            .map(|s| s.encrypted_reference)
            .ok_or(HackathonError::InvalidSubmission(submission_id))
    }
}
