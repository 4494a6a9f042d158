//! Archive extraction and payload discovery

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::Result;
use crate::error::fs::failure;
use crate::error::package::archive_failed;

/// Extract every entry of the zip archive at `archive_path` into `dest`.
///
/// Nested folders are created as needed and existing files are
/// overwritten. Entries whose path would leave `dest` are rejected.
///
/// Returns the number of files written.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file =
        File::open(archive_path).map_err(|e| failure("Failed to open", archive_path, &e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| archive_failed(archive_path, e.to_string()))?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_failed(archive_path, e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(archive_failed(
                archive_path,
                format!("entry '{}' points outside the archive root", entry.name()),
            ));
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .map_err(|e| failure("Failed to create directory", &out_path, &e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| failure("Failed to create directory", parent, &e))?;
        }
        let mut out =
            File::create(&out_path).map_err(|e| failure("Failed to write", &out_path, &e))?;
        io::copy(&mut entry, &mut out).map_err(|e| failure("Failed to write", &out_path, &e))?;
        written += 1;
    }

    log::debug!(
        "extracted {written} files from {} into {}",
        archive_path.display(),
        dest.display()
    );
    Ok(written)
}

/// Find the first file named `manifest_file` under `root`.
///
/// Depth-first, one branch at a time, siblings in file name order. Entries
/// that cannot be read are skipped and the search continues with their
/// siblings.
pub fn find_manifest(root: &Path, manifest_file: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name() == manifest_file)
        .map(walkdir::DirEntry::into_path)
}
