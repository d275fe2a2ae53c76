//! Archive Extraction
//!
//! Unpacks `.tar.xz` streams with a fixed safety filter: entries may not
//! leave the destination, links may not point outside it, device nodes are
//! refused, and setuid/setgid/sticky plus group/other write bits are dropped.

use std::fs;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Mode bits kept on extracted files and directories
pub const SAFE_MODE_MASK: u32 = 0o755;

/// Symlink hops followed before giving up, as with `ELOOP`
const MAX_LINK_HOPS: usize = 40;

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("refusing to extract {}: {reason}", .path.display())]
    UnsafeEntry { path: PathBuf, reason: &'static str },
}

/// Unpack an xz-compressed tar stream into `dest`, returning the number of
/// entries written.
pub fn unpack_tar_xz<R: Read>(reader: R, dest: &Path) -> Result<usize, ExtractError> {
    unpack_tar(xz2::read::XzDecoder::new_multi_decoder(reader), dest)
}

/// Unpack an uncompressed tar stream into `dest`
pub fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<usize, ExtractError> {
    fs::create_dir_all(dest)?;
    let root = dest.canonicalize()?;

    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(false);
    archive.set_unpack_xattrs(false);
    archive.set_overwrite(true);

    // Directory modes are applied last so read-only directories do not
    // block the entries beneath them.
    let mut directories = Vec::new();
    let mut count = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let kind = entry.header().entry_type();

        check_entry_path(&path)?;

        if kind.is_character_special() || kind.is_block_special() || kind.is_fifo() {
            return Err(unsafe_entry(path, "special files are not allowed"));
        }

        if kind.is_symlink() {
            let target = link_target(&entry, &path)?;
            let link_dir = resolve(&root, path.parent().unwrap_or(Path::new("")), 0)?;
            if !resolve(&link_dir, &target, 0)?.starts_with(&root) {
                return Err(unsafe_entry(path, "symlink points outside the destination"));
            }
        } else if kind.is_hard_link() {
            let target = link_target(&entry, &path)?;
            check_entry_path(&target)?;
            if !resolve(&root, &target, 0)?.starts_with(&root) {
                return Err(unsafe_entry(path, "hard link points outside the destination"));
            }
        }

        let mode = entry.header().mode().ok();
        trace!("Unpacking {:?}", path);

        if kind.is_dir() {
            let dir = resolve(&root, &path, 0)?;
            if !dir.starts_with(&root) {
                return Err(unsafe_entry(path, "entry resolves outside the destination"));
            }
            fs::create_dir_all(&dir)?;
            if let Some(mode) = mode {
                directories.push((dir, mode));
            }
        } else {
            if !entry.unpack_in(dest)? {
                return Err(unsafe_entry(path, "entry resolves outside the destination"));
            }
            if kind.is_file() {
                if let Some(mode) = mode {
                    restrict_mode(&dest.join(&path), mode)?;
                }
            }
        }

        count += 1;
    }

    for (dir, mode) in directories.iter().rev() {
        restrict_mode(dir, *mode)?;
    }

    debug!("Extracted {} entries into {:?}", count, dest);
    Ok(count)
}

fn unsafe_entry(path: PathBuf, reason: &'static str) -> ExtractError {
    ExtractError::UnsafeEntry { path, reason }
}

fn link_target<R: Read>(entry: &tar::Entry<'_, R>, path: &Path) -> Result<PathBuf, ExtractError> {
    entry
        .link_name()?
        .map(|target| target.into_owned())
        .ok_or_else(|| unsafe_entry(path.to_path_buf(), "link without a target"))
}

/// Archive paths must be relative and free of `..`
fn check_entry_path(path: &Path) -> Result<(), ExtractError> {
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(unsafe_entry(path.to_path_buf(), "absolute path"));
            }
            Component::ParentDir => {
                return Err(unsafe_entry(path.to_path_buf(), "path contains `..`"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Walk `target` from `base` the way the OS would, following symlinks that
/// already exist on disk. `base` must be free of symlinks.
fn resolve(base: &Path, target: &Path, hops: usize) -> io::Result<PathBuf> {
    if hops > MAX_LINK_HOPS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "too many levels of symbolic links",
        ));
    }

    let mut current = base.to_path_buf();
    for component in target.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => current.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                current.pop();
            }
            Component::Normal(name) => {
                current.push(name);
                let is_link = fs::symlink_metadata(&current)
                    .map(|meta| meta.file_type().is_symlink())
                    .unwrap_or(false);
                if is_link {
                    let link = fs::read_link(&current)?;
                    current.pop();
                    current = resolve(&current, &link, hops + 1)?;
                }
            }
        }
    }

    Ok(current)
}

#[cfg(unix)]
fn restrict_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & SAFE_MODE_MASK))
}

#[cfg(not(unix))]
fn restrict_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
