//! Hackathon lifecycle contract with encrypted judging.
//!
//! A [`Contract`] owns every hackathon record. Organizers create hackathons,
//! participants register and submit encrypted content references, judges
//! submit encrypted scores, and the organizer publishes the homomorphically
//! summed results together with a decryption proof to announce the winners.

mod context;
mod contract;
mod error;
mod events;
mod ledger;
mod model;
mod registry;
mod resolver;
mod scoring;
mod submissions;


pub use context::Context;
pub use contract::{Contract, Limits};
pub use error::{ErrorKind, HackathonError};
pub use events::HackathonEvent;
pub use model::{
    ACCUMULATOR_WIDTH, DECRYPTION_WIDTH, DecryptedScore, HackathonConfig, HackathonDetails,
    HackathonId, MAX_JUDGES, Participant, REFERENCE_WIDTH, Registration, SCORE_WIDTH,
    SubmissionId, SubmissionInfo, Winner,
};
pub use resolver::rank_top_three;
