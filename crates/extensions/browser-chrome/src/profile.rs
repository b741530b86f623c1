//! Best-effort copy of a signed-in Chrome profile.
//!
//! Only the pieces that carry authentication state are copied, so a wall
//! window can reuse a login without sharing (and locking) the source profile.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Single files copied when present.
const PROFILE_FILES: &[&str] = &[
    "Local State",
    "Default/Cookies",
    "Default/Network/Cookies",
    "Default/Preferences",
];

/// Directories copied recursively when present.
const PROFILE_DIRS: &[&str] = &["Default/Local Storage", "Default/IndexedDB"];

/// Copies authentication state between Chrome user-data directories.
pub struct ProfileCloner;

impl ProfileCloner {
    /// Copy the supported subset of `source` into `dest`.
    ///
    /// Files that cannot be read or written are skipped. Returns the number
    /// of files copied; fails only when `dest` itself cannot be created.
    pub fn prepare(source: &Path, dest: &Path) -> io::Result<usize> {
        fs::create_dir_all(dest)?;
        let mut copied = 0;

        for rel in PROFILE_FILES {
            let from = source.join(rel);
            if from.is_file() && copy_file(&from, &dest.join(rel)) {
                copied += 1;
            }
        }

        for rel in PROFILE_DIRS {
            let root = source.join(rel);
            if !root.is_dir() {
                continue;
            }

            for entry in WalkDir::new(&root) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Skipping unreadable profile entry: {}", e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(suffix) = entry.path().strip_prefix(source) else {
                    continue;
                };
                if copy_file(entry.path(), &dest.join(suffix)) {
                    copied += 1;
                }
            }
        }

        debug!(
            "Copied {} profile files from {} to {}",
            copied,
            source.display(),
            dest.display()
        );
        Ok(copied)
    }
}

fn copy_file(from: &Path, to: &Path) -> bool {
    let result = match to.parent() {
        Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::copy(from, to)),
        None => fs::copy(from, to),
    };

    match result {
        Ok(_) => true,
        Err(e) => {
            debug!("Skipping {}: {}", from.display(), e);
            false
        }
    }
}
