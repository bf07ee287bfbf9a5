use common::Address;
use common::event::Event;
use fhe::{EncryptedValueService, Handle};
use tracing::debug;

use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{
    DecryptedScore, Hackathon, HackathonDetails, HackathonId, MAX_JUDGES, Participant,
    SubmissionId, SubmissionInfo, Winner,
};

/// Tunables fixed at deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Upper bound on judges per hackathon. Never above [`MAX_JUDGES`].
    pub max_judges: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_judges: MAX_JUDGES,
        }
    }
}

/// The hackathon contract: an arena of hackathon records indexed by id.
///
/// Every state-changing operation takes `&mut self`, so operations are applied
/// one at a time. Each one validates everything and performs every fallible
/// call to the encryption service before touching contract state.
pub struct Contract<S> {
    pub(crate) address: Address,
    pub(crate) limits: Limits,
    pub(crate) fhe: S,
    pub(crate) hackathons: Vec<Hackathon>,
    events: Vec<HackathonEvent>,
}

impl<S: EncryptedValueService> Contract<S> {
    pub fn new(address: Address, fhe: S) -> Self {
        Self::with_limits(address, fhe, Limits::default())
    }

    pub fn with_limits(address: Address, fhe: S, limits: Limits) -> Self {
        Self {
            address,
            limits: Limits {
                max_judges: limits.max_judges.clamp(1, MAX_JUDGES),
            },
            fhe,
            hackathons: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn service(&self) -> &S {
        &self.fhe
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<HackathonEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: HackathonEvent) {
        debug!(topic = event.topic(), hackathon_id = event.hackathon_id(), "Event emitted");
        self.events.push(event);
    }

    pub(crate) fn hackathon(&self, id: HackathonId) -> Result<&Hackathon, HackathonError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.hackathons.get(idx))
            .ok_or(HackathonError::HackathonNotFound(id))
    }

    pub(crate) fn hackathon_mut(
        &mut self,
        id: HackathonId,
    ) -> Result<&mut Hackathon, HackathonError> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.hackathons.get_mut(idx))
            .ok_or(HackathonError::HackathonNotFound(id))
    }

    // -----------------------------------------------------------------------
    // Public reads
    // -----------------------------------------------------------------------

    pub fn hackathon_count(&self) -> u64 {
        self.hackathons.len() as u64
    }

    pub fn hackathon_details(&self, id: HackathonId) -> Result<HackathonDetails, HackathonError> {
        Ok(self.hackathon(id)?.details())
    }

    pub fn participant(
        &self,
        id: HackathonId,
        account: Address,
    ) -> Result<Option<&Participant>, HackathonError> {
        Ok(self.hackathon(id)?.participant(account))
    }

    /// Participants in registration order.
    pub fn participants(&self, id: HackathonId) -> Result<&[Participant], HackathonError> {
        Ok(&self.hackathon(id)?.participants)
    }

    pub fn submission_count(&self, id: HackathonId) -> Result<u32, HackathonError> {
        Ok(self.hackathon(id)?.submission_count)
    }

    pub fn submission(
        &self,
        id: HackathonId,
        submission_id: SubmissionId,
    ) -> Result<SubmissionInfo, HackathonError> {
        self.hackathon(id)?
            .submission(submission_id)
            .map(SubmissionInfo::from)
            .ok_or(HackathonError::InvalidSubmission(submission_id))
    }

    pub fn winners(&self, id: HackathonId) -> Result<&[Winner], HackathonError> {
        Ok(&self.hackathon(id)?.winners)
    }

    /// Decrypted aggregate of a submission; `is_decrypted` is false until published.
    pub fn decrypted_score(
        &self,
        id: HackathonId,
        submission_id: SubmissionId,
    ) -> Result<DecryptedScore, HackathonError> {
        let hackathon = self.hackathon(id)?;
        hackathon
            .submission(submission_id)
            .ok_or(HackathonError::InvalidSubmission(submission_id))?;
        Ok(hackathon
            .decrypted
            .get(submission_id as usize)
            .copied()
            .unwrap_or_default())
    }

    pub fn is_judge(&self, id: HackathonId, account: Address) -> Result<bool, HackathonError> {
        Ok(self.hackathon(id)?.is_judge(account))
    }

    /// Aggregate score handles in submission order, once winners are calculated.
    pub fn aggregate_handles(&self, id: HackathonId) -> Result<&[Handle], HackathonError> {
        let hackathon = self.hackathon(id)?;
        if hackathon.aggregates.is_empty() {
            return Err(HackathonError::WinnersNotCalculated);
        }
        Ok(&hackathon.aggregates)
    }
}
