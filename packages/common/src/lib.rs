pub mod error;
pub mod source_file;
pub mod visitor;

pub use error::*;
pub use source_file::*;
pub use visitor::*;
