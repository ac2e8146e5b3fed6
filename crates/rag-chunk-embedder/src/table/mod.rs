pub mod models;
pub mod reader;
pub mod writer;

pub use models::*;
pub use reader::{SourceRows, TableReader};
pub use writer::TableWriter;
