//! Domain types shared by resolution, configuration, and reporting.

pub mod error;
pub mod test_info;

pub use error::{MappingError, Result};
pub use test_info::TestInfo;
