//! Whole-toolchain installation.

use std::path::PathBuf;

use toolup_assets::{AssetDescriptor, runtime_version_for};
use toolup_core::{Platform, Result};
use tracing::info;

use crate::acquire::Acquirer;

/// Installed roots for one toolchain request.
#[derive(Debug)]
pub struct Toolchain {
    /// Root of the compiler install.
    pub compiler_root: PathBuf,
    /// Root of the runtime install.
    pub runtime_root: PathBuf,
}

/// Install the compiler at `version` along with the runtime it requires.
///
/// The runtime version is derived from the compiler version
/// ([`runtime_version_for`]) and installed first. The nightly flag applies
/// to the compiler only; nightly compilers pair with the newest release
/// runtime.
pub async fn install_toolchain(
    acquirer: &Acquirer,
    version: &str,
    nightly: bool,
    platform: Platform,
) -> Result<Toolchain> {
    let runtime_version = runtime_version_for(version);
    info!(version, runtime_version, nightly, "installing toolchain");

    let runtime = AssetDescriptor::runtime(runtime_version, platform);
    let runtime_root = acquirer.acquire(&runtime).await?;

    let compiler = AssetDescriptor::compiler(version, nightly, platform);
    let compiler_root = acquirer.acquire(&compiler).await?;

    info!(
        compiler_root = %compiler_root.display(),
        runtime_root = %runtime_root.display(),
        "toolchain installed"
    );

    Ok(Toolchain {
        compiler_root,
        runtime_root,
    })
}
