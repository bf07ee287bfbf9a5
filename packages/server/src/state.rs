use std::sync::Arc;

use common::Address;
use common::clock::Clock;
use fhe::{LocalFhe, Relayer};
use hackathon::{Context, Contract, Limits};
use tokio::sync::Mutex;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub contract: Arc<Mutex<Contract<LocalFhe>>>,
    /// Client-side SDK of the encryption service.
    pub relayer: Arc<dyn Relayer>,
    pub clock: Arc<dyn Clock>,
    pub config: AppConfig,
}

impl AppState {
    /// Deploy a fresh contract backed by the local encryption service.
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let fhe = LocalFhe::new(config.fhe.signer_key.as_bytes());
        let contract = Contract::with_limits(
            config.contract.address,
            fhe.clone(),
            Limits {
                max_judges: config.contract.max_judges,
            },
        );
        Self {
            contract: Arc::new(Mutex::new(contract)),
            relayer: Arc::new(fhe),
            clock,
            config,
        }
    }

    /// Transaction context for `caller` at the current clock time.
    pub fn context(&self, caller: Address) -> Context {
        Context::new(caller, self.clock.now())
    }
}
