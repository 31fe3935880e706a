//! Acquisition pipeline for the toolup distribution channels.
//!
//! This crate turns an asset descriptor into an installed tool root:
//! cache check, retrying download, format-aware extraction, nested-root
//! discovery, and cache registration.
//!
//! # Example
//!
//! ```ignore
//! use toolup_assets::AssetDescriptor;
//! use toolup_core::{HostEnv, Platform};
//! use toolup_fetch::{Acquirer, install_toolchain};
//!
//! let platform = Platform::from_env(&HostEnv::current())?;
//! let acquirer = Acquirer::new(work_dir);
//!
//! // One asset:
//! let root = acquirer.acquire(&AssetDescriptor::runtime("2.4.0", platform)).await?;
//!
//! // Or the whole toolchain (runtime first, then the compiler):
//! let toolchain = install_toolchain(&acquirer, "4.0.5", false, platform).await?;
//! ```

mod acquire;
mod cache;
mod download;
mod extract;
mod locate;
mod setup;

pub use acquire::Acquirer;
pub use cache::ToolCache;
pub use download::{DEFAULT_DOWNLOAD_TIMEOUT, Downloader};
pub use extract::unpack;
pub use locate::find_tool_root;
pub use setup::{Toolchain, install_toolchain};
