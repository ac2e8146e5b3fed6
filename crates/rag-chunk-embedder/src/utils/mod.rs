pub mod error;
pub mod histogram;
pub mod logger;
pub mod metrics;

pub use error::{PipelineError, Result};
pub use histogram::TokenHistogram;
pub use metrics::{Metrics, Timer};
