//! Capability-based file helpers for catalog, conversion and event-log files.
//!
//! Every helper resolves the parent directory with ambient authority and
//! then works relative to that [`fs_utf8::Dir`], so callers only ever hand
//! out access to the directory that holds the file they asked for.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{
    ambient_authority,
    fs::OpenOptions,
    fs_utf8::{self, Dir, File},
};
use std::io;
use std::path::Component;

/// Open an existing UTF-8 path for reading.
///
/// # Errors
/// Propagates the I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<File> {
    File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) a file for writing, creating missing parent
/// directories first.
///
/// # Errors
/// Propagates I/O errors from directory creation or opening the file.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.create(name)
}

/// Open a file in append mode, creating it and its parents when missing.
///
/// Writes always land at the end of the file, which suits line-oriented
/// audit logs.
///
/// # Errors
/// Propagates I/O errors from directory creation or opening the file.
pub fn open_append_file(path: &Utf8Path) -> io::Result<File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    dir.open_with(name, &options)
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the I/O error raised while inspecting the path, including
/// [`io::ErrorKind::NotFound`] when nothing exists there.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Ensure the parent directory of `path` exists.
///
/// # Errors
/// Propagates I/O errors from opening the base directory or creating the
/// missing components.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Open the directory holding `path` and return it with the file name.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `parent` into an ambient base directory and the path below it.
///
/// Absolute paths are anchored at their root (or Windows prefix); relative
/// paths at the current directory.
fn split_base(parent: &Utf8Path) -> io::Result<(Dir, Utf8PathBuf)> {
    let base = match parent.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(format!("{prefix}{}", std::path::MAIN_SEPARATOR))
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = parent
        .strip_prefix(&base)
        .map_or_else(|_| parent.to_path_buf(), Utf8Path::to_path_buf);
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}
