use std::time::Duration;

use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Settings for the off-chain decryption relay.
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    /// Public-decryption attempts before giving up. Default: 5.
    #[serde(default = "default_relay_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds. Default: 2000.
    #[serde(default = "default_relay_delay_ms")]
    pub delay_ms: u64,
    /// Deadline for a single attempt in milliseconds. Default: 10000.
    #[serde(default = "default_relay_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
}

fn default_relay_max_attempts() -> u32 {
    5
}
fn default_relay_delay_ms() -> u64 {
    2000
}
fn default_relay_attempt_timeout_ms() -> u64 {
    10_000
}

impl RelayConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_attempts, Duration::from_millis(self.delay_ms))
            .with_attempt_timeout(Duration::from_millis(self.attempt_timeout_ms))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_relay_max_attempts(),
            delay_ms: default_relay_delay_ms(),
            attempt_timeout_ms: default_relay_attempt_timeout_ms(),
        }
    }
}

/// Settings for the encryption backend.
#[derive(Debug, Deserialize, Clone)]
pub struct FheConfig {
    /// Seed for the proof signer of the local backend. Default: "local-dev-signer".
    #[serde(default = "default_signer_key")]
    pub signer_key: String,
}

fn default_signer_key() -> String {
    "local-dev-signer".into()
}

impl Default for FheConfig {
    fn default() -> Self {
        Self {
            signer_key: default_signer_key(),
        }
    }
}
