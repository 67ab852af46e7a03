pub mod rate_gate;
pub mod submitter;

pub use crate::domain::model::{Description, Document, Product, SubmissionRequest};
pub use crate::domain::ports::{DocumentTransport, TimeUnit, TransportResponse};
pub use crate::utils::error::Result;
