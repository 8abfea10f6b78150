pub mod init;
pub mod lint;

pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};
