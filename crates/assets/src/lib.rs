//! Asset descriptors for the toolup distribution channels.
//!
//! An [`AssetDescriptor`] identifies one downloadable tool archive by
//! family, version, and platform, and derives every naming quirk the
//! distribution channels have accumulated: download URL, file name, archive
//! extension, and the nested-root flag. [`resolve`] and [`is_nightly`]
//! validate requested version strings and detect nightly tags.

mod descriptor;
mod version;

pub use descriptor::{AssetDescriptor, AssetKind, DistHosts, runtime_version_for};
pub use version::{ResolvedVersion, is_nightly, resolve};
