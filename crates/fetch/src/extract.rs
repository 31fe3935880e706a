//! Format-aware archive extraction.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use toolup_core::{Error, Result};
use tracing::debug;

/// Unpack `archive` into `dest`, dispatching on `ext`.
///
/// Any existing file or directory at `dest` is removed first, so a rerun
/// against the same destination starts clean. `ext` outside the closed
/// {".tar.gz", ".zip"} set fails with [`Error::UnsupportedFormat`] rather
/// than silently doing nothing.
pub fn unpack(archive: &Path, dest: &Path, ext: &str) -> Result<PathBuf> {
    if dest.exists() {
        if dest.is_dir() {
            std::fs::remove_dir_all(dest)?;
        } else {
            std::fs::remove_file(dest)?;
        }
    }

    debug!(archive = %archive.display(), dest = %dest.display(), ext, "unpacking archive");
    match ext {
        ".tar.gz" => unpack_tar_gz(archive, dest),
        ".zip" => unpack_zip(archive, dest),
        other => Err(Error::unsupported_format(other)),
    }
}

fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tar = Archive::new(decoder);
    std::fs::create_dir_all(dest)?;
    tar.unpack(dest)?;
    Ok(dest.to_path_buf())
}

fn unpack_zip(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| Error::extraction(e.to_string()))?;
    std::fs::create_dir_all(dest)?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| Error::extraction(e.to_string()))?;

        // Skip entries whose paths would escape the destination.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            std::fs::write(&out_path, &content)?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(dest.to_path_buf())
}
