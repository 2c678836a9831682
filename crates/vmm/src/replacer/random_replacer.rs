use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::replacer::EvictionPolicy;
use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// Evicts a uniformly random resident page, drawn by rejection sampling over all page indices.
#[derive(Debug)]
pub(crate) struct RandomReplacer {
    rng: StdRng,
}

impl RandomReplacer {
    /// Creates a replacer seeded with `seed`, or from OS entropy when no seed is given.
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomReplacer { rng }
    }
}

impl EvictionPolicy for RandomReplacer {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        _last_page: Option<PageId>,
        _oldest_frame: FrameId,
        _num_frames: usize,
        _clock_tick: bool,
    ) -> Option<PageId> {
        // Rejection sampling would never terminate on an empty table.
        if page_table.mapped_count() == 0 {
            return None;
        }
        loop {
            let page = self.rng.random_range(0..page_table.len());
            if page_table.entry(page).is_mapped() {
                return Some(page);
            }
        }
    }
}
