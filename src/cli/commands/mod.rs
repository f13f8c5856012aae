//! CLI command implementations
//!
//! Every command returns a process exit code:
//! 0 success, 1 completed with issues, 2 configuration error,
//! 5 fatal error, 130 interrupted.

pub mod init;
pub mod inspect;
pub mod run;
pub mod validate;
