use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use walkdir::WalkDir;

use super::file_info::FileCandidate;

/// Everything one walk produced: the candidates in discovery order and the
/// entries that could not be read.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<FileCandidate>,
    pub errors: Vec<walkdir::Error>,
}

/// Walks every root in lexical order and reports each candidate through `cb`
/// as it is found. Directories, symlinks, empty files and anything `ignore`
/// accepts are skipped. Unreadable entries are recorded and the walk goes on.
/// A file reached through more than one root is reported once.
pub fn scan<S, I, F>(roots: &[S], ignore: I, mut cb: F) -> ScanResult
where
    S: AsRef<Path>,
    I: Fn(&Path) -> bool,
    F: FnMut(&FileCandidate),
{
    let mut result = ScanResult::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        let root = root.as_ref();
        info!("Starting scanning folder: {}", root.display());

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("Skipping entry: {}", error);
                    result.errors.push(error);
                    continue;
                }
            };
            // symlinks are not followed, so they never report as files
            if !entry.file_type().is_file() {
                continue;
            }
            if ignore(entry.path()) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(error) => {
                    warn!("Skipping {}: {}", entry.path().display(), error);
                    result.errors.push(error);
                    continue;
                }
            };
            if metadata.len() == 0 {
                debug!("Skipping empty file {}", entry.path().display());
                continue;
            }

            let identity =
                fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
            if !seen.insert(identity) {
                debug!("Already seen {}", entry.path().display());
                continue;
            }

            let candidate = FileCandidate::new(entry.path(), metadata.len());
            cb(&candidate);
            result.files.push(candidate);
        }
    }

    info!(
        "Scanning finished: {} candidates, {} errors",
        result.files.len(),
        result.errors.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_lexical_order_and_exclusions() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("b")).unwrap();
        fs::write(root.join("b").join("inner.txt"), b"inner").unwrap();
        fs::write(root.join("c.txt"), b"ccc").unwrap();
        fs::write(root.join("a.txt"), b"aaa").unwrap();
        fs::write(root.join("empty.txt"), b"").unwrap();
        fs::write(root.join(".DS_Store"), b"meta").unwrap();

        let ignore = |path: &Path| path.file_name().map_or(false, |n| n == ".DS_Store");
        let result = scan(&[root], ignore, |_| ());

        let names: Vec<_> = result
            .files
            .iter()
            .map(|f| f.file.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                Path::new("a.txt").to_path_buf(),
                Path::new("b").join("inner.txt"),
                Path::new("c.txt").to_path_buf(),
            ]
        );
        assert_eq!(result.files[0].size, 3);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_scan_multiple_roots_and_callback() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("one"), b"1").unwrap();
        fs::write(second.path().join("two"), b"22").unwrap();

        let mut seen = 0;
        let result = scan(&[first.path(), second.path()], |_: &Path| false, |_| seen += 1);

        assert_eq!(seen, 2);
        assert!(result.files[0].file.ends_with("one"));
        assert!(result.files[1].file.ends_with("two"));
    }

    #[test]
    fn test_missing_root_is_recorded_not_fatal() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("file"), b"data").unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = scan(&[missing.as_path(), temp_dir.path()], |_: &Path| false, |_| ());

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_nested_root_reports_file_once() {
        let temp_dir = tempdir().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("only.txt"), b"one of a kind").unwrap();

        let result = scan(&[temp_dir.path(), sub.as_path()], |_: &Path| false, |_| ());

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].file, sub.join("only.txt"));
    }

    #[test]
    fn test_repeated_root_reports_file_once() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a"), b"content").unwrap();

        let mut seen = 0;
        let result = scan(&[temp_dir.path(), temp_dir.path()], |_: &Path| false, |_| seen += 1);

        assert_eq!(seen, 1);
        assert_eq!(result.files.len(), 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_kept_intact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempdir().unwrap();
        let bad = temp_dir.path().join(OsStr::from_bytes(b"bad\xff"));
        fs::write(&bad, b"identical").unwrap();

        let result = scan(&[temp_dir.path()], |_: &Path| false, |_| ());

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].file, bad);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("target");
        fs::write(&target, b"content").unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link")).unwrap();

        let result = scan(&[temp_dir.path()], |_: &Path| false, |_| ());

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].file.ends_with("target"));
    }
}
