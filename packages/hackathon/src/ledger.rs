use common::Phase;
use fhe::EncryptedValueService;
use tracing::{debug, info};

use crate::context::Context;
use crate::contract::Contract;
use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{Hackathon, HackathonId, Participant, Registration};

impl<S: EncryptedValueService> Contract<S> {
    /// Register the caller as a participant. The first registration opens submissions.
    pub fn register(
        &mut self,
        ctx: &Context,
        id: HackathonId,
        registration: Registration,
    ) -> Result<(), HackathonError> {
        if let Err(e) = Self::check_registration(self.hackathon(id)?, ctx, &registration) {
            debug!(hackathon_id = id, caller = %ctx.caller, error = %e, "register rejected");
            return Err(e);
        }

        let hackathon = self.hackathon_mut(id)?;
        if hackathon.phase == Phase::RegistrationOpen {
            hackathon
                .phase
                .advance_to(Phase::SubmissionsOpen)
                .map_err(|e| HackathonError::WrongPhase {
                    expected: Phase::RegistrationOpen,
                    actual: e.from,
                })?;
        }

        let team_name = registration.team_name.clone();
        hackathon
            .participant_index
            .insert(ctx.caller, hackathon.participants.len());
        hackathon.participants.push(Participant {
            address: ctx.caller,
            email: registration.email,
            handle: registration.handle,
            team_name: registration.team_name,
            team_members: registration.team_members,
            registered_at: ctx.now,
            has_submitted: false,
        });
        hackathon.participant_count += 1;

        info!(
            hackathon_id = id,
            participant = %ctx.caller,
            participant_count = hackathon.participant_count,
            "Participant registered"
        );
        self.emit(HackathonEvent::ParticipantRegistered {
            hackathon_id: id,
            participant: ctx.caller,
            team_name,
        });
        Ok(())
    }

    fn check_registration(
        hackathon: &Hackathon,
        ctx: &Context,
        registration: &Registration,
    ) -> Result<(), HackathonError> {
        if ctx.now >= hackathon.submission_deadline {
            return Err(HackathonError::DeadlinePassed);
        }
        if !hackathon.phase.accepts_registrations() {
            return Err(HackathonError::WrongPhase {
                expected: Phase::SubmissionsOpen,
                actual: hackathon.phase,
            });
        }
        if hackathon.participant(ctx.caller).is_some() {
            return Err(HackathonError::AlreadyRegistered(ctx.caller));
        }
        if hackathon.is_judge(ctx.caller) {
            return Err(HackathonError::JudgeCannotParticipate);
        }
        if registration.email.trim().is_empty() {
            return Err(HackathonError::MissingEmail);
        }
        if hackathon.max_participants > 0 && hackathon.participant_count >= hackathon.max_participants
        {
            return Err(HackathonError::CapacityReached(hackathon.max_participants));
        }
        Ok(())
    }
}
