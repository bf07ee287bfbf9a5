use std::collections::HashSet;

use common::Phase;
use fhe::EncryptedValueService;
use tracing::{debug, info};

use crate::context::Context;
use crate::contract::Contract;
use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{Hackathon, HackathonConfig, HackathonId};

impl<S: EncryptedValueService> Contract<S> {
    /// Create a hackathon organized by the caller. Returns its id.
    pub fn create_hackathon(
        &mut self,
        ctx: &Context,
        config: HackathonConfig,
    ) -> Result<HackathonId, HackathonError> {
        if let Err(e) = self.validate_config(ctx, &config) {
            debug!(caller = %ctx.caller, error = %e, "create_hackathon rejected");
            return Err(e);
        }

        let id = self.hackathons.len() as HackathonId;
        let hackathon = Hackathon::new(id, ctx.caller, config, ctx.now);

        info!(
            hackathon_id = id,
            organizer = %ctx.caller,
            judges = hackathon.judges.len(),
            "Hackathon created"
        );
        let event = HackathonEvent::HackathonCreated {
            hackathon_id: id,
            organizer: ctx.caller,
            name: hackathon.name.clone(),
            submission_deadline: hackathon.submission_deadline,
            judging_deadline: hackathon.judging_deadline,
            judge_count: hackathon.judges.len() as u32,
        };
        self.hackathons.push(hackathon);
        self.emit(event);
        Ok(id)
    }

    fn validate_config(
        &self,
        ctx: &Context,
        config: &HackathonConfig,
    ) -> Result<(), HackathonError> {
        let invalid = |msg: &str| Err(HackathonError::InvalidConfig(msg.to_string()));

        if config.name.trim().is_empty() {
            return invalid("name must not be empty");
        }
        if config.submission_deadline <= ctx.now {
            return invalid("submission deadline must be in the future");
        }
        if config.judging_deadline <= config.submission_deadline {
            return invalid("judging deadline must be after the submission deadline");
        }
        if config.judges.is_empty() {
            return invalid("at least one judge is required");
        }
        if config.judges.len() > self.limits.max_judges {
            return Err(HackathonError::InvalidConfig(format!(
                "at most {} judges are allowed",
                self.limits.max_judges
            )));
        }

        let mut seen = HashSet::with_capacity(config.judges.len());
        for judge in &config.judges {
            if *judge == ctx.caller {
                return invalid("the organizer cannot be a judge");
            }
            if !seen.insert(*judge) {
                return Err(HackathonError::InvalidConfig(format!(
                    "duplicate judge {judge}"
                )));
            }
        }
        Ok(())
    }

    /// Reveal every submission's encrypted reference to every judge and open judging.
    ///
    /// Issues `submissions × (judges + 1)` access grants.
    pub fn grant_judge_access(
        &mut self,
        ctx: &Context,
        id: HackathonId,
    ) -> Result<(), HackathonError> {
        let hackathon = self.hackathon(id)?;
        if ctx.caller != hackathon.organizer {
            return Err(HackathonError::NotOrganizer);
        }
        if ctx.now < hackathon.submission_deadline {
            return Err(HackathonError::SubmissionDeadlineNotReached);
        }
        if hackathon.judge_access_granted {
            return Err(HackathonError::AccessAlreadyGranted);
        }
        if hackathon.submission_count == 0 {
            return Err(HackathonError::NoSubmissions);
        }
        if hackathon.phase != Phase::SubmissionsOpen {
            return Err(HackathonError::WrongPhase {
                expected: Phase::SubmissionsOpen,
                actual: hackathon.phase,
            });
        }

        let contract = self.address;
        let judges = &hackathon.judges;
        let grants: Vec<_> = hackathon
            .submissions
            .iter()
            .flat_map(move |submission| {
                judges
                    .iter()
                    .copied()
                    .chain([contract])
                    .map(move |grantee| (submission.encrypted_reference, grantee))
            })
            .collect();
        self.fhe.allow_all(&grants)?;

        let hackathon = self.hackathon_mut(id)?;
        hackathon
            .phase
            .advance_to(Phase::Judging)
            .map_err(|e| HackathonError::WrongPhase {
                expected: Phase::SubmissionsOpen,
                actual: e.from,
            })?;
        hackathon.judge_access_granted = true;
        let submission_count = hackathon.submission_count;

        info!(hackathon_id = id, submission_count, "Judge access granted");
        self.emit(HackathonEvent::JudgeAccessGranted {
            hackathon_id: id,
            submission_count,
        });
        Ok(())
    }

    /// Sum every submission's judge scores homomorphically and publish the sums
    /// for public decryption.
    ///
    /// The completeness scan and aggregation are both `O(submissions × judges)`.
    pub fn calculate_winners(
        &mut self,
        ctx: &Context,
        id: HackathonId,
    ) -> Result<(), HackathonError> {
        let hackathon = self.hackathon(id)?;
        if ctx.caller != hackathon.organizer {
            return Err(HackathonError::NotOrganizer);
        }
        if hackathon.submission_count == 0 {
            return Err(HackathonError::NoSubmissions);
        }
        if hackathon.phase != Phase::Judging {
            return Err(HackathonError::WrongPhase {
                expected: Phase::Judging,
                actual: hackathon.phase,
            });
        }
        if ctx.now < hackathon.judging_deadline {
            return Err(HackathonError::JudgingDeadlineNotReached);
        }
        if let Err(e) = Self::check_scoring_complete(hackathon) {
            debug!(hackathon_id = id, error = %e, "calculate_winners rejected");
            return Err(e);
        }

        let aggregates = hackathon
            .submissions
            .iter()
            .map(|submission| self.aggregate_submission(&hackathon.judges, submission))
            .collect::<Result<Vec<_>, _>>()?;
        self.fhe
            .make_all_publicly_decryptable(self.address, &aggregates)?;

        let hackathon = self.hackathon_mut(id)?;
        hackathon
            .phase
            .advance_to(Phase::Completed)
            .map_err(|e| HackathonError::WrongPhase {
                expected: Phase::Judging,
                actual: e.from,
            })?;
        hackathon.aggregates = aggregates.clone();

        info!(
            hackathon_id = id,
            submissions = aggregates.len(),
            "Aggregate scores published for decryption"
        );
        self.emit(HackathonEvent::WinnersCalculated {
            hackathon_id: id,
            aggregates,
        });
        Ok(())
    }
}
