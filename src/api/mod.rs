pub mod checks;
pub mod client;
pub mod configuration;
pub mod documents;
pub mod tenancies;

pub use checks::{fetch_all_checks, CheckGateway};
pub use client::{PlatformClient, PlatformConfig};
pub use documents::DocumentGateway;
