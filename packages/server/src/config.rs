use common::Address;
use common::config::{FheConfig, RelayConfig};
use config::{Config, ConfigError, Environment, File};
use hackathon::MAX_JUDGES;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContractConfig {
    /// Address the contract is deployed at. Ciphertext proofs are bound to it.
    pub address: Address,
    /// Per-hackathon judge cap. Clamped to [`MAX_JUDGES`].
    #[serde(default = "default_max_judges")]
    pub max_judges: usize,
}

fn default_max_judges() -> usize {
    MAX_JUDGES
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub contract: ContractConfig,
    #[serde(default)]
    pub fhe: FheConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default(
                "contract.address",
                "0x00000000000000000000000000000000000000c0",
            )?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., HACKATHON__FHE__SIGNER_KEY)
            .add_source(Environment::with_prefix("HACKATHON").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
