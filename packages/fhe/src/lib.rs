pub mod abi;
mod error;
mod handle;
pub mod local;
mod service;

pub use error::FheError;
pub use handle::{ExternalInput, Handle, Proof, Width};
pub use local::LocalFhe;
pub use service::{EncryptedValueService, PublicDecryption, Relayer};
