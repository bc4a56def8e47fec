use std::path::PathBuf;

use grouping_by::GroupingBy;
use log::{debug, warn};

use super::hasher::{DigestFactory, HashStrategy};

/// Paths that produced the same digest, in the order they were given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestGroup {
    pub digest: String,
    pub paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashStats {
    pub files: usize,
    pub failed: usize,
    pub groups: usize,
    pub groups_kept: usize,
    pub files_kept: usize,
}

impl HashStats {
    pub fn add(&mut self, other: HashStats) {
        self.files += other.files;
        self.failed += other.failed;
        self.groups += other.groups;
        self.groups_kept += other.groups_kept;
        self.files_kept += other.files_kept;
    }
}

/// Hashes every path with `strategy` and keeps the digests shared by at least
/// two paths. Unreadable files are logged and left out. Groups come back in
/// the discovery order of their first member; `cb` runs after each file.
pub fn filter_by_hash<F>(
    paths: &[PathBuf],
    strategy: HashStrategy,
    factory: &dyn DigestFactory,
    mut cb: F,
) -> (Vec<DigestGroup>, HashStats)
where
    F: FnMut(),
{
    let mut stats = HashStats {
        files: paths.len(),
        ..HashStats::default()
    };

    let hashed = paths
        .iter()
        .enumerate()
        .filter_map(|(position, path)| {
            let hash = strategy.hash_file(path, factory);
            cb();
            match hash {
                Ok(digest) => {
                    debug!("{:?} digest of {}: {}", strategy, path.display(), digest);
                    Some((position, path, digest))
                }
                Err(error) => {
                    warn!("Failed hashing {}: {}", path.display(), error);
                    stats.failed += 1;
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    let grouped = hashed.into_iter().grouping_by(|(_, _, digest)| digest.clone());
    stats.groups = grouped.len();

    let mut groups = grouped
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(digest, members)| {
            let first = members[0].0;
            let paths = members.into_iter().map(|(_, path, _)| path.clone()).collect();
            (first, DigestGroup { digest, paths })
        })
        .collect::<Vec<_>>();
    groups.sort_by_key(|(first, _)| *first);

    stats.groups_kept = groups.len();
    stats.files_kept = groups.iter().map(|(_, group)| group.paths.len()).sum();

    (groups.into_iter().map(|(_, group)| group).collect(), stats)
}
