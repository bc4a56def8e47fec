use std::path::Path;

use glob::Pattern;
use log::debug;

use super::error::{Error, Result};

/// OS metadata files that are never worth reporting.
pub const BLOCKLIST: [&str; 3] = [".DS_Store", "Thumbs.db", "desktop.ini"];

/// Glob masks a file is checked against before it becomes a candidate.
#[derive(Debug, Default)]
pub struct IgnoreList {
    masks: Vec<Pattern>,
    match_path: bool,
}

impl IgnoreList {
    /// Compiles every mask up front so a bad one is reported before any walk.
    /// With `match_path` the masks see the whole path, otherwise the base name.
    pub fn new<S: AsRef<str>>(masks: &[S], match_path: bool) -> Result<Self> {
        let masks = masks
            .iter()
            .map(|mask| {
                Pattern::new(mask.as_ref()).map_err(|source| Error::InvalidMask {
                    mask: mask.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(IgnoreList { masks, match_path })
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if BLOCKLIST.iter().any(|blocked| name == *blocked) {
            return true;
        }
        let subject = if self.match_path {
            path.to_string_lossy()
        } else {
            name
        };
        match self.masks.iter().find(|mask| mask.matches(&subject)) {
            Some(mask) => {
                debug!("Ignoring {} (mask {})", path.display(), mask.as_str());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_base_name() {
        let ignore = IgnoreList::new(&["*.tmp", "cache?"], false).unwrap();
        assert!(ignore.is_ignored(Path::new("/data/a/file.tmp")));
        assert!(ignore.is_ignored(Path::new("/data/cache1")));
        assert!(!ignore.is_ignored(Path::new("/data/file.txt")));
        assert!(!ignore.is_ignored(Path::new("/data/cache12")));
    }

    #[test]
    fn test_matches_whole_path() {
        let ignore = IgnoreList::new(&["/data/skip/*"], true).unwrap();
        assert!(ignore.is_ignored(Path::new("/data/skip/file.txt")));
        assert!(!ignore.is_ignored(Path::new("/data/keep/file.txt")));

        let by_name = IgnoreList::new(&["/data/skip/*"], false).unwrap();
        assert!(!by_name.is_ignored(Path::new("/data/skip/file.txt")));
    }

    #[test]
    fn test_blocklist_always_applies() {
        let ignore = IgnoreList::default();
        assert!(ignore.is_ignored(Path::new("/photos/.DS_Store")));
        assert!(ignore.is_ignored(Path::new("Thumbs.db")));
        assert!(!ignore.is_ignored(Path::new("/photos/a.jpg")));
    }

    #[test]
    fn test_invalid_mask_is_rejected() {
        match IgnoreList::new(&["ok*", "[unclosed"], false) {
            Err(Error::InvalidMask { mask, .. }) => assert_eq!(mask, "[unclosed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
