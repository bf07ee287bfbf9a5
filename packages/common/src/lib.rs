pub mod address;
pub mod clock;
pub mod config;
pub mod event;
pub mod phase;
pub mod retry;
pub mod submission_status;

pub use address::{Address, ParseAddressError};
pub use phase::{Phase, PhaseTransitionError};
pub use submission_status::SubmissionStatus;
