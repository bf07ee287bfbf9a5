use common::{Address, SubmissionStatus};
use fhe::{EncryptedValueService, ExternalInput, Handle};
use tracing::{debug, info};

use crate::context::Context;
use crate::contract::Contract;
use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{
    ACCUMULATOR_WIDTH, DECRYPTION_WIDTH, Hackathon, HackathonId, SCORE_WIDTH, Score, Submission,
    SubmissionId,
};

impl<S: EncryptedValueService> Contract<S> {
    /// Record the calling judge's encrypted score for a submission.
    pub fn submit_score(
        &mut self,
        ctx: &Context,
        id: HackathonId,
        submission_id: SubmissionId,
        score: ExternalInput,
    ) -> Result<(), HackathonError> {
        let hackathon = self.hackathon(id)?;
        let position = hackathon
            .judge_position(ctx.caller)
            .ok_or(HackathonError::NotJudge(ctx.caller))?;
        if !hackathon.judge_access_granted {
            return Err(HackathonError::AccessNotGranted);
        }
        if ctx.now < hackathon.submission_deadline || ctx.now >= hackathon.judging_deadline {
            return Err(HackathonError::OutOfWindow);
        }
        let submission = hackathon
            .submission(submission_id)
            .ok_or(HackathonError::InvalidSubmission(submission_id))?;
        if submission.scores[position].is_some() {
            return Err(HackathonError::AlreadyScored {
                submission: submission_id,
                judge: ctx.caller,
            });
        }

        let handle = self
            .fhe
            .verify_and_import(&score, SCORE_WIDTH, self.address, ctx.caller)
            .map_err(|e| {
                debug!(hackathon_id = id, submission_id, judge = %ctx.caller, error = %e, "score proof rejected");
                HackathonError::from_input(e)
            })?;
        self.fhe
            .allow_all(&[(handle, self.address), (handle, ctx.caller)])?;

        let hackathon = self.hackathon_mut(id)?;
        let submission = &mut hackathon.submissions[submission_id as usize];
        submission.scores[position] = Some(Score {
            judge: ctx.caller,
            handle,
            submitted_at: ctx.now,
        });
        submission.judge_count += 1;
        submission.status = SubmissionStatus::Judged;
        let judge_count = submission.judge_count;

        info!(
            hackathon_id = id,
            submission_id,
            judge = %ctx.caller,
            judge_count,
            "Score submitted"
        );
        self.emit(HackathonEvent::ScoreSubmitted {
            hackathon_id: id,
            submission_id,
            judge: ctx.caller,
        });
        Ok(())
    }

    /// First missing `(submission, judge)` pair, scanning submissions in order
    /// and judges in list order. `O(submissions × judges)`.
    pub(crate) fn check_scoring_complete(hackathon: &Hackathon) -> Result<(), HackathonError> {
        for submission in &hackathon.submissions {
            if let Some(position) = submission.scores.iter().position(Option::is_none) {
                return Err(HackathonError::IncompleteScoring {
                    submission: submission.id,
                    judge: hackathon.judges[position],
                });
            }
        }
        Ok(())
    }

    /// Homomorphic sum of a fully scored submission, widened for public decryption.
    ///
    /// Scores are widened to the accumulator and added in judge-list order.
    pub(crate) fn aggregate_submission(
        &self,
        judges: &[Address],
        submission: &Submission,
    ) -> Result<Handle, HackathonError> {
        let mut total: Option<Handle> = None;
        for (judge, score) in judges.iter().zip(&submission.scores) {
            let score = score.as_ref().ok_or(HackathonError::IncompleteScoring {
                submission: submission.id,
                judge: *judge,
            })?;
            let widened = self.fhe.widen(self.address, &score.handle, ACCUMULATOR_WIDTH)?;
            total = Some(match total {
                None => widened,
                Some(acc) => self.fhe.add(self.address, &acc, &widened)?,
            });
        }

        let Some(total) = total else {
            return Err(HackathonError::InvalidConfig(
                "hackathon has no judges".to_string(),
            ));
        };
        Ok(self.fhe.widen(self.address, &total, DECRYPTION_WIDTH)?)
    }
}
