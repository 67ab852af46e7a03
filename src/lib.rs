pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{HttpTransport, DEFAULT_ENDPOINT};
pub use config::SubmitterConfig;
pub use crate::core::{rate_gate::RateGate, submitter::DocumentSubmitter};
pub use domain::model::{Description, Document, Product, SubmissionRequest};
pub use domain::ports::{DocumentTransport, TimeUnit, TransportResponse};
pub use utils::error::{CrptError, Result};
