//! Command handlers, one module per command group.

pub mod documents;
pub mod init;
pub mod login;
pub mod misc;
pub mod register;
