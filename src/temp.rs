//! Temporary files and directories that outlive their creator.
//!
//! A pattern names the entry: the random part replaces the last `*`, or is
//! appended when there is none.

use std::env;
use std::fs::File;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tempfile::Builder;

pub(crate) fn dir_or_default(dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => dir.to_path_buf(),
        None => env::temp_dir(),
    }
}

fn split(pattern: &str) -> Result<(&str, &str)> {
    if pattern.contains('/') || pattern.contains(MAIN_SEPARATOR) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("pattern '{}' contains a path separator", pattern),
        ));
    }
    Ok(match pattern.rfind('*') {
        Some(pos) => (&pattern[..pos], &pattern[pos + 1..]),
        None => (pattern, ""),
    })
}

/// Created exclusively, mode `0600` on unix.
pub(crate) fn file(dir: &Path, pattern: &str) -> Result<(PathBuf, File)> {
    let (prefix, suffix) = split(pattern)?;
    let named = Builder::new().prefix(prefix).suffix(suffix).tempfile_in(dir)?;
    let (file, path) = named.keep()?;
    Ok((path, file))
}

/// Mode `0700` on unix.
pub(crate) fn dir(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let (prefix, suffix) = split(pattern)?;
    let created = Builder::new().prefix(prefix).suffix(suffix).tempdir_in(dir)?;
    Ok(created.keep())
}

#[cfg(test)]
mod test {
    use crate::temp::{dir, file, split};

    #[test]
    fn test_split() {
        assert_eq!(("log-", ".txt"), split("log-*.txt").unwrap());
        assert_eq!(("a*b-", ""), split("a*b-*").unwrap());
        assert_eq!(("plain", ""), split("plain").unwrap());
        assert!(split("a/b").is_err());
    }

    #[test]
    fn test_entries_are_kept() {
        let root = tempfile::tempdir().unwrap();
        let (path, f) = file(root.path(), "keep-*.log").unwrap();
        drop(f);
        assert!(path.is_file());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("keep-") && name.ends_with(".log"));

        let sub = dir(root.path(), "d").unwrap();
        assert!(sub.is_dir());
        assert_eq!(Some(root.path()), sub.parent());
    }

    #[cfg(unix)]
    #[test]
    fn test_modes() {
        use std::os::unix::fs::PermissionsExt;
        let root = tempfile::tempdir().unwrap();
        let path = dir(root.path(), "m").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(0o700, mode & 0o777);
        let (path, _) = file(root.path(), "f").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(0o600, mode & 0o777);
    }
}
