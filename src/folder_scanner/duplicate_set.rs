use std::io::{self, Write};

use log::debug;

use super::{duplicates_group::DuplicatesGroup, fixup::FixupPlan};

/// All duplicate groups found by one run, in the order they were confirmed.
#[derive(Clone, Debug, Default)]
pub struct DuplicateSet {
    pub duplicates: Vec<DuplicatesGroup>,
}

impl DuplicateSet {
    pub fn new() -> Self {
        DuplicateSet::default()
    }

    pub fn add(&mut self, group: DuplicatesGroup) {
        debug!(
            "Found {} copies of {} ({} bytes)",
            group.paths().len(),
            group.hash(),
            group.size()
        );
        self.duplicates.push(group);
    }

    pub fn len(&self) -> usize {
        self.duplicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    pub fn wasted_space(&self) -> u64 {
        self.duplicates.iter().map(DuplicatesGroup::wasted_space).sum()
    }

    pub fn report<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for group in &self.duplicates {
            group.report(w)?;
        }
        w.flush()
    }

    /// Every non-survivor path, group by group.
    pub fn fixup(&self) -> FixupPlan {
        let mut plan = FixupPlan::new();
        for group in &self.duplicates {
            debug!("Keeping {}", group.survivor().display());
            group.redundant().for_each(|path| plan.add(path));
        }
        plan
    }
}
