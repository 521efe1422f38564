//! Student marks kept in a flat, comma separated file.
pub mod error;
pub mod record;
pub mod store;

pub use error::{RecordError, StoreError};
pub use record::{Grade, StudentForm, StudentRecord};
pub use store::{SortOrder, StudentStore};
