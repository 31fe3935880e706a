//! Core types for the toolup toolchain provisioner.
//!
//! This crate provides:
//! - The shared error taxonomy ([`Error`], [`Result`])
//! - Host platform identification ([`HostEnv`], [`Platform`], [`Os`], [`Arch`])
//! - The download retry policy ([`RetryPolicy`])

mod errors;
mod platform;
mod retry;

pub use errors::{Error, Result};
pub use platform::{Arch, HostEnv, Os, Platform};
pub use retry::RetryPolicy;
