use std::{collections::BTreeMap, path::PathBuf};

use log::info;

use super::file_info::FileCandidate;

/// Size buckets that can still hold duplicates, keyed and iterated by
/// ascending size. Paths keep their discovery order.
pub struct CollectorResult {
    pub buckets: BTreeMap<u64, Vec<PathBuf>>,
    pub stats: SizeStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeStats {
    pub files: usize,
    pub groups: usize,
    pub groups_kept: usize,
    pub files_kept: usize,
}

impl CollectorResult {
    pub fn sizes(&self) -> Vec<u64> {
        self.buckets.keys().copied().collect()
    }
}

pub fn collect(files: Vec<FileCandidate>) -> CollectorResult {
    let mut buckets: BTreeMap<u64, Vec<PathBuf>> = BTreeMap::new();
    let counter = files.len();
    for file_info in files {
        bucket_file_by_size(&mut buckets, file_info);
    }
    let groups = buckets.len();

    info!("Consumed {} files. Filtering...", counter);
    let filtered = filter_potential_duplicates(buckets);
    let stats = SizeStats {
        files: counter,
        groups,
        groups_kept: filtered.len(),
        files_kept: filtered.values().map(Vec::len).sum(),
    };
    info!(
        "Found {} sizes shared by {} files",
        stats.groups_kept, stats.files_kept
    );
    CollectorResult {
        buckets: filtered,
        stats,
    }
}

fn filter_potential_duplicates(
    mut buckets: BTreeMap<u64, Vec<PathBuf>>,
) -> BTreeMap<u64, Vec<PathBuf>> {
    buckets.retain(|_, paths| paths.len() > 1);
    buckets
}

fn bucket_file_by_size(buckets: &mut BTreeMap<u64, Vec<PathBuf>>, file_info: FileCandidate) {
    buckets.entry(file_info.size).or_default().push(file_info.file);
}
