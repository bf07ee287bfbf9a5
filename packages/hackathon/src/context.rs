use chrono::{DateTime, Utc};
use common::Address;

/// Sender and timestamp of the operation being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub caller: Address,
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn new(caller: Address, now: DateTime<Utc>) -> Self {
        Self { caller, now }
    }
}
