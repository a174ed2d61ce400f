//! Scan location enumeration and selection.
//!
//! The core only needs one resolved, existing directory; this module is the
//! collaborator that produces it. Candidates are the home directory plus
//! every mounted volume reported by the OS, with manual entry as the final
//! option. Nothing here is platform special-cased in the core: callers get
//! back a plain path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use sysinfo::Disks;

use crate::duplicates::FinderError;

/// One candidate scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Display label, e.g. `Home directory` or `Mount: /media/usb`
    pub label: String,
    /// Directory path
    pub path: PathBuf,
}

impl Location {
    /// Create a location.
    #[must_use]
    pub fn new(label: impl Into<String>, path: PathBuf) -> Self {
        Self {
            label: label.into(),
            path,
        }
    }
}

/// Enumerate candidate scan roots: home directory first, then mounted
/// volumes. Deduplicated by path; only existing directories are returned.
#[must_use]
pub fn system_locations() -> Vec<Location> {
    let mut locations = Vec::new();

    if let Some(user_dirs) = directories::UserDirs::new() {
        locations.push(Location::new(
            "Home directory",
            user_dirs.home_dir().to_path_buf(),
        ));
    }

    let disks = Disks::new_with_refreshed_list();
    for disk in disks.list() {
        let mount = disk.mount_point().to_path_buf();
        locations.push(Location::new(format!("Mount: {}", mount.display()), mount));
    }

    dedup_existing(locations)
}

fn dedup_existing(locations: Vec<Location>) -> Vec<Location> {
    let mut seen = Vec::new();
    locations
        .into_iter()
        .filter(|loc| {
            if !loc.path.is_dir() || seen.contains(&loc.path) {
                return false;
            }
            seen.push(loc.path.clone());
            true
        })
        .collect()
}

/// Validate that a path exists and is a directory.
///
/// # Errors
///
/// Returns the finder's fatal path errors, so callers report invalid roots
/// consistently no matter where the path came from.
pub fn validate_root(path: &Path) -> Result<PathBuf, FinderError> {
    if !path.exists() {
        return Err(FinderError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(FinderError::NotADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

/// Prompt the operator to pick a scan root.
///
/// Presents [`system_locations`] plus a manual-entry option; manual input is
/// validated before being accepted.
///
/// # Errors
///
/// Fails if the terminal interaction fails or a manually entered path is
/// invalid.
pub fn choose_location() -> Result<PathBuf> {
    let locations = system_locations();

    let mut items: Vec<String> = locations
        .iter()
        .map(|loc| format!("{} ({})", loc.label, loc.path.display()))
        .collect();
    items.push("Enter a path manually".to_string());

    let selection = Select::new()
        .with_prompt("Where should dupesweep look for duplicates?")
        .items(&items)
        .default(0)
        .interact()
        .context("location selection failed")?;

    if selection < locations.len() {
        return Ok(locations[selection].path.clone());
    }

    let manual: String = Input::new()
        .with_prompt("Absolute path to scan")
        .interact_text()
        .context("path entry failed")?;

    Ok(validate_root(Path::new(manual.trim()))?)
}
