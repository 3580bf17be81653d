//! Output writer.
//! Mirrors a discovered template's relative path under the output root and
//! writes the rendered bytes with the template's permission bits.

use crate::discovery::FileEntry;
use crate::error::{Error, Result};
use std::fs::{self, DirBuilder};
use std::path::{Path, PathBuf};

/// Mode of directories created under the output root.
pub const DIR_MODE: u32 = 0o755;

/// Destination of `entry` under `output_root`.
pub fn resolve_target_path<P: AsRef<Path>>(entry: &FileEntry, output_root: P) -> PathBuf {
    entry
        .relative_path
        .split('/')
        .fold(output_root.as_ref().to_path_buf(), |path, part| path.join(part))
}

/// Creates `path` and its missing parents. Existing directories are fine,
/// including ones created concurrently.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(|source| Error::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `content` for `entry` below `output_root`.
///
/// # Returns
/// * `Result<PathBuf>` - The destination path
///
/// # Errors
/// * `Error::WriteError` if a directory or the file cannot be written; files
///   written earlier in the run are left in place
pub fn write_rendered<P: AsRef<Path>>(
    content: &[u8],
    entry: &FileEntry,
    output_root: P,
) -> Result<PathBuf> {
    let target = resolve_target_path(entry, output_root);
    let write_error = |source| Error::WriteError {
        path: target.clone(),
        source,
    };

    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }

    // A previous run may have left a read-only copy behind
    if let Ok(metadata) = fs::metadata(&target) {
        let mut permissions = metadata.permissions();
        if permissions.readonly() {
            make_writable(&mut permissions);
            fs::set_permissions(&target, permissions).map_err(write_error)?;
        }
    }

    fs::write(&target, content).map_err(write_error)?;
    apply_permissions(&target, entry.permission_bits).map_err(write_error)?;

    Ok(target)
}

#[cfg(unix)]
fn make_writable(permissions: &mut fs::Permissions) {
    use std::os::unix::fs::PermissionsExt;
    permissions.set_mode(permissions.mode() | 0o200);
}

#[cfg(not(unix))]
fn make_writable(permissions: &mut fs::Permissions) {
    permissions.set_readonly(false);
}

#[cfg(unix)]
fn apply_permissions(path: &Path, bits: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(bits))
}

#[cfg(not(unix))]
fn apply_permissions(path: &Path, bits: u32) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(bits & 0o222 == 0);
    fs::set_permissions(path, permissions)
}
