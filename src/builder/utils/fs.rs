//! File system utilities for the build drivers.
//!
//! Recursive copy and scan helpers. Both skip an optional excluded subtree,
//! which keeps the `Builds/` directory out of the walk when it lives inside
//! the source directory.

use crate::builder::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::{DirEntry, WalkDir};

fn walk<'a>(
    root: &'a Path,
    exclude: Option<&'a Path>,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| exclude.is_none_or(|ex| !entry.path().starts_with(ex)))
}

/// Recursively copies the contents of `from` into `to`.
///
/// Existing directories at the destination are reused and existing files are
/// overwritten. Symlinks are followed: the destination receives the contents
/// they point to, never a link. Entries under `exclude` are skipped.
pub async fn copy_dir_contents(from: &Path, to: &Path, exclude: Option<&Path>) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }
    fs::create_dir_all(to)
        .await
        .fs_context("creating copy destination", to)?;

    for entry in walk(from, exclude) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        if rel_path.as_os_str().is_empty() {
            continue;
        }
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)
                .await
                .fs_context("copying file", &dest_path)?;
        }
    }

    Ok(())
}

/// Collects every file under `root` with extension `ext`, recursively.
///
/// The result is sorted by path relative to `root` so repeated runs see the
/// same order regardless of directory listing order.
pub fn find_files_with_extension(root: &Path, ext: &str, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walk(root, exclude) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|e| e == ext) {
            files.push(entry.into_path());
        }
    }
    files.sort_by(|a, b| {
        let a = a.strip_prefix(root).unwrap_or(a);
        let b = b.strip_prefix(root).unwrap_or(b);
        a.cmp(b)
    });
    Ok(files)
}

/// Makes `path` absolute against the current directory.
///
/// `.` and `..` components are resolved lexically, so `.` yields the current
/// directory's own name as the last component. When the path exists, symlinks
/// are resolved too, so a linked source directory is named after its target.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned();
    if !absolute.exists() {
        return Ok(absolute);
    }
    std::fs::canonicalize(&absolute).fs_context("resolving symlinks", &absolute)
}

/// Creates every directory in `dirs`, parents included.
pub async fn create_dirs(dirs: &[&Path]) -> Result<()> {
    for dir in dirs {
        fs::create_dir_all(dir)
            .await
            .fs_context("creating directory", *dir)?;
    }
    Ok(())
}

/// Removes the directory and its contents. Returns `false` if it did not exist.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }
    fs::remove_dir_all(path)
        .await
        .fs_context("removing directory", path)?;
    Ok(true)
}
