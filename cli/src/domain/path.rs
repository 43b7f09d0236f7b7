//! Directory-string normalization for remote and local paths.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

/// Separator used on the SFTP server side.
pub const REMOTE_SEPARATOR: char = '/';

/// Separator used for the local destination directory.
pub const LOCAL_SEPARATOR: char = std::path::MAIN_SEPARATOR;

/// Ensure `path` ends with `separator`.
///
/// Interior characters are left alone and repeated separators are not
/// collapsed. An empty string becomes just the separator.
#[must_use]
pub fn normalize(path: &str, separator: char) -> String {
    if path.ends_with(separator) {
        return path.to_owned();
    }
    let mut normalized = String::with_capacity(path.len() + separator.len_utf8());
    normalized.push_str(path);
    normalized.push(separator);
    normalized
}

/// Normalize a remote source directory with [`REMOTE_SEPARATOR`].
#[must_use]
pub fn normalize_remote_dir(path: &str) -> String {
    normalize(path, REMOTE_SEPARATOR)
}

/// Normalize a local destination directory with [`LOCAL_SEPARATOR`].
#[must_use]
pub fn normalize_local_dir(path: &str) -> String {
    normalize(path, LOCAL_SEPARATOR)
}

/// Base name of a remote path: everything after the last `/`.
#[must_use]
pub fn remote_file_name(remote_path: &str) -> &str {
    remote_path
        .rsplit_once(REMOTE_SEPARATOR)
        .map_or(remote_path, |(_, name)| name)
}

/// Where a fetched `remote_path` lands inside the normalized `local_dir`.
///
/// The remote base name is kept. `None` when `remote_path` ends in `/`
/// and so names no file.
#[must_use]
pub fn local_target(local_dir: &str, remote_path: &str) -> Option<String> {
    let name = remote_file_name(remote_path);
    (!name.is_empty()).then(|| format!("{local_dir}{name}"))
}
