use std::{
    collections::HashSet,
    io::{self, Write},
    path::{Path, PathBuf},
};

use bytesize::ByteSize;

/// Files confirmed to share size and full-content digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicatesGroup {
    hash: String,
    size: u64,
    paths: Vec<PathBuf>,
}

impl DuplicatesGroup {
    /// Repeated paths are collapsed to their first occurrence. Returns `None`
    /// when fewer than two distinct paths remain, which is not a duplicate.
    pub fn new(hash: String, size: u64, paths: Vec<PathBuf>) -> Option<Self> {
        let mut seen = HashSet::new();
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| seen.insert(path.clone()))
            .collect();
        if paths.len() < 2 {
            return None;
        }
        Some(DuplicatesGroup { hash, size, paths })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn wasted_space(&self) -> u64 {
        self.size * (self.paths.len() as u64 - 1)
    }

    /// Index of the copy to keep: the shortest path, earliest one on ties.
    pub fn survivor_index(&self) -> usize {
        let len = |path: &PathBuf| path.as_os_str().len();
        let mut shortest = 0;
        for (i, path) in self.paths.iter().enumerate().skip(1) {
            if len(path) < len(&self.paths[shortest]) {
                shortest = i;
            }
        }
        shortest
    }

    pub fn survivor(&self) -> &Path {
        &self.paths[self.survivor_index()]
    }

    /// Every member except the survivor, in group order.
    pub fn redundant(&self) -> impl Iterator<Item = &Path> {
        let survivor = self.survivor_index();
        self.paths
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != survivor)
            .map(|(_, path)| path.as_path())
    }

    pub fn report<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "[{}] {}", self.hash, ByteSize::b(self.size))?;
        for (i, path) in self.paths.iter().enumerate() {
            writeln!(w, "[{}] {}", i + 1, path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn group(members: &[&str]) -> DuplicatesGroup {
        DuplicatesGroup::new("abc".to_string(), 100, paths(members)).unwrap()
    }

    #[test]
    fn test_rejects_single_member() {
        assert!(DuplicatesGroup::new("h".to_string(), 1, paths(&["/a"])).is_none());
        assert!(DuplicatesGroup::new("h".to_string(), 1, Vec::new()).is_none());
    }

    #[test]
    fn test_same_path_twice_is_not_a_duplicate() {
        assert!(DuplicatesGroup::new("h".to_string(), 13, paths(&["/only", "/only"])).is_none());

        let g = group(&["/b/x", "/a", "/b/x"]);
        assert_eq!(g.paths(), paths(&["/b/x", "/a"]).as_slice());
        assert_eq!(g.wasted_space(), 100);
        assert_eq!(g.redundant().collect::<Vec<_>>(), vec![Path::new("/b/x")]);
    }

    #[test]
    fn test_wasted_space() {
        assert_eq!(group(&["/a", "/b", "/c"]).wasted_space(), 200);
        assert_eq!(group(&["/a", "/b"]).wasted_space(), 100);
    }

    #[test]
    fn test_survivor_is_shortest_path() {
        let g = group(&["/photos/2020/img.jpg", "/img.jpg", "/backup/img.jpg"]);
        assert_eq!(g.survivor(), Path::new("/img.jpg"));
        assert_eq!(
            g.redundant().collect::<Vec<_>>(),
            vec![Path::new("/photos/2020/img.jpg"), Path::new("/backup/img.jpg")]
        );
    }

    #[test]
    fn test_survivor_tie_keeps_earliest() {
        let g = group(&["/long/path/x", "/b/x", "/a/x", "/c/x"]);
        assert_eq!(g.survivor_index(), 1);
        assert_eq!(g.survivor(), Path::new("/b/x"));
        assert_eq!(g.survivor(), g.clone().survivor());
    }

    #[test]
    fn test_survivor_first_when_all_equal() {
        let g = group(&["/a", "/b", "/c"]);
        assert_eq!(g.survivor(), Path::new("/a"));
        assert_eq!(
            g.redundant().collect::<Vec<_>>(),
            vec![Path::new("/b"), Path::new("/c")]
        );
    }

    #[test]
    fn test_report_layout() {
        let g = group(&["/x/one", "/y/two"]);
        let mut out = Vec::new();
        g.report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[abc] "));
        assert_eq!(lines[1], "[1] /x/one");
        assert_eq!(lines[2], "[2] /y/two");
    }
}
