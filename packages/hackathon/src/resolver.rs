use common::{Address, Phase};
use fhe::{EncryptedValueService, Proof, abi};
use tracing::{debug, info};

use crate::context::Context;
use crate::contract::Contract;
use crate::error::HackathonError;
use crate::events::HackathonEvent;
use crate::model::{DecryptedScore, Hackathon, HackathonId, SubmissionId, Winner};

/// Top three `(submission, score)` pairs, best first.
///
/// Single left-to-right scan with cascading slots. Comparisons are strict, so
/// among equal scores the earlier submission keeps the higher rank.
pub fn rank_top_three(scores: &[u32]) -> Vec<(SubmissionId, u32)> {
    let mut slots: [Option<(SubmissionId, u32)>; 3] = [None; 3];
    let beats = |slot: Option<(SubmissionId, u32)>, score: u32| match slot {
        None => true,
        Some((_, best)) => score > best,
    };

    for (idx, &score) in scores.iter().enumerate() {
        let entry = Some((idx as SubmissionId, score));
        if beats(slots[0], score) {
            slots[2] = slots[1];
            slots[1] = slots[0];
            slots[0] = entry;
        } else if beats(slots[1], score) {
            slots[2] = slots[1];
            slots[1] = entry;
        } else if beats(slots[2], score) {
            slots[2] = entry;
        }
    }
    slots.into_iter().flatten().collect()
}

impl<S: EncryptedValueService> Contract<S> {
    /// Publish the decrypted aggregates, verify them against the decryption
    /// proof and announce the winners. Callable once per hackathon.
    pub fn submit_decrypted_scores(
        &mut self,
        ctx: &Context,
        id: HackathonId,
        clear_scores: Vec<u32>,
        proof: Proof,
    ) -> Result<(), HackathonError> {
        let hackathon = self.hackathon(id)?;
        if let Err(e) = Self::check_resolvable(hackathon, ctx, &clear_scores) {
            debug!(hackathon_id = id, caller = %ctx.caller, error = %e, "submit_decrypted_scores rejected");
            return Err(e);
        }

        let words: Vec<u128> = clear_scores.iter().map(|&s| u128::from(s)).collect();
        self.fhe
            .verify_signatures(&hackathon.aggregates, &abi::encode_words(&words), &proof)
            .map_err(|e| {
                debug!(hackathon_id = id, error = %e, "decryption proof rejected");
                HackathonError::from_decryption(e)
            })?;

        let ranked = rank_top_three(&clear_scores);
        let winners: Vec<Winner> = ranked
            .iter()
            .enumerate()
            .map(|(rank, &(submission_id, final_score))| Winner {
                participant: hackathon.submissions[submission_id as usize].participant,
                ranking: rank as u8 + 1,
                final_score,
                submission_id,
            })
            .collect();
        let podium = |rank: usize| winners.get(rank).map_or(Address::ZERO, |w| w.participant);
        let announced = HackathonEvent::WinnersAnnounced {
            hackathon_id: id,
            first: podium(0),
            second: podium(1),
            third: podium(2),
        };

        let hackathon = self.hackathon_mut(id)?;
        hackathon.decrypted = clear_scores
            .iter()
            .map(|&score| DecryptedScore {
                score,
                is_decrypted: true,
            })
            .collect();
        hackathon.winners = winners;
        hackathon.winners_finalized = true;

        info!(
            hackathon_id = id,
            winners = hackathon.winners.len(),
            "Winners announced"
        );
        for (idx, &score) in clear_scores.iter().enumerate() {
            self.emit(HackathonEvent::ScoreDecrypted {
                hackathon_id: id,
                submission_id: idx as SubmissionId,
                score,
            });
        }
        self.emit(announced);
        Ok(())
    }

    fn check_resolvable(
        hackathon: &Hackathon,
        ctx: &Context,
        clear_scores: &[u32],
    ) -> Result<(), HackathonError> {
        if ctx.caller != hackathon.organizer {
            return Err(HackathonError::NotOrganizer);
        }
        if hackathon.phase != Phase::Completed {
            return Err(HackathonError::WinnersNotCalculated);
        }
        if hackathon.winners_finalized {
            return Err(HackathonError::WinnersAlreadyFinalized);
        }
        if clear_scores.len() != hackathon.submission_count as usize {
            return Err(HackathonError::ScoreCountMismatch {
                expected: hackathon.submission_count,
                actual: clear_scores.len(),
            });
        }
        Ok(())
    }
}
