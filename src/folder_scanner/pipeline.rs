use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, info};

use super::{
    collector::{self, SizeStats},
    deduplicator::{filter_by_hash, DigestGroup, HashStats},
    duplicate_set::DuplicateSet,
    duplicates_group::DuplicatesGroup,
    hasher::{DigestFactory, HashStrategy},
    ignore_list::IgnoreList,
    progress::{NoProgress, Progress, ProgressObserver},
    scanner,
};

/// Counters collected over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub walk_errors: usize,
    pub size: SizeStats,
    pub partial: HashStats,
    pub full: HashStats,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files seen: {}", self.size.files)?;
        writeln!(f, "Walk errors: {}", self.walk_errors)?;
        writeln!(f, "Size groups: {}", self.size.groups)?;
        writeln!(f, "Size groups with more than one file: {}", self.size.groups_kept)?;
        writeln!(f, "Files in those groups: {}", self.size.files_kept)?;
        for (phase, stats) in [("Partial hash", &self.partial), ("Full hash", &self.full)] {
            writeln!(f, "{} files: {}", phase, stats.files)?;
            writeln!(f, "{} read failures: {}", phase, stats.failed)?;
            writeln!(f, "{} groups: {}", phase, stats.groups)?;
            writeln!(f, "{} groups with more than one file: {}", phase, stats.groups_kept)?;
            writeln!(f, "{} files in those groups: {}", phase, stats.files_kept)?;
        }
        Ok(())
    }
}

/// Size, then partial hash, then full hash, one size bucket at a time.
pub struct Pipeline<'a> {
    factory: &'a dyn DigestFactory,
    ignore: &'a IgnoreList,
    observer: Box<dyn ProgressObserver + 'a>,
    progress: Progress,
    diagnostics: Diagnostics,
}

impl<'a> Pipeline<'a> {
    pub fn new(factory: &'a dyn DigestFactory, ignore: &'a IgnoreList) -> Self {
        Pipeline {
            factory,
            ignore,
            observer: Box::new(NoProgress),
            progress: Progress::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver + 'a>) -> Self {
        self.observer = observer;
        self
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn run<S: AsRef<Path>>(&mut self, roots: &[S]) -> DuplicateSet {
        self.progress = Progress::default();
        self.diagnostics = Diagnostics::default();

        let ignore = self.ignore;
        let progress = &mut self.progress;
        let observer = &mut self.observer;
        let scanned = scanner::scan(
            roots,
            |path| ignore.is_ignored(path),
            |_| {
                progress.scanned += 1;
                observer.update(progress);
            },
        );
        self.diagnostics.walk_errors = scanned.errors.len();

        let mut collected = collector::collect(scanned.files);
        self.diagnostics.size = collected.stats;

        let mut duplicates = DuplicateSet::new();
        for size in collected.sizes() {
            let Some(paths) = collected.buckets.remove(&size) else {
                continue;
            };
            debug!("Processing {} files of {} bytes", paths.len(), size);
            for partial in self.filter(&paths, HashStrategy::Partial) {
                for full in self.filter(&partial.paths, HashStrategy::Full) {
                    if let Some(group) = DuplicatesGroup::new(full.digest, size, full.paths) {
                        duplicates.add(group);
                    }
                }
            }
        }

        self.observer.finish(&self.progress);
        info!(
            "Found {} duplicate groups, {} bytes wasted",
            duplicates.len(),
            duplicates.wasted_space()
        );
        duplicates
    }

    fn filter(&mut self, paths: &[PathBuf], strategy: HashStrategy) -> Vec<DigestGroup> {
        let factory = self.factory;
        let progress = &mut self.progress;
        let observer = &mut self.observer;
        let (groups, stats) = filter_by_hash(paths, strategy, factory, || {
            match strategy {
                HashStrategy::Partial => progress.partial_hashed += 1,
                HashStrategy::Full => progress.full_hashed += 1,
            }
            observer.update(progress);
        });
        match strategy {
            HashStrategy::Partial => self.diagnostics.partial.add(stats),
            HashStrategy::Full => self.diagnostics.full.add(stats),
        }
        groups
    }
}
