pub mod error;
pub mod record;
pub mod service;

pub use error::{ImportError, RecordError};
pub use service::{load_data, ImportReport, RecordOutcome, RecordStatus};
