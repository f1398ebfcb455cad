//! CLI command implementations.

pub mod add;
pub mod compose;
pub mod init;
pub mod run;
pub mod show;
pub mod tools;
