use super::replacer::EvictionPolicy;
use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// A simplified Not Frequently Used policy.
///
/// On a clock tick every resident page adds its reference bit onto its counter before the
/// victim is chosen. The victim is the resident page with the smallest counter; on ties the
/// lowest page index wins. Counters are never shifted, so this counts rather than ages.
#[derive(Debug, Default)]
pub(crate) struct AgingReplacer;

impl AgingReplacer {
    pub(crate) fn new() -> Self {
        AgingReplacer
    }
}

impl EvictionPolicy for AgingReplacer {
    fn name(&self) -> &'static str {
        "aging"
    }

    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        _last_page: Option<PageId>,
        _oldest_frame: FrameId,
        _num_frames: usize,
        clock_tick: bool,
    ) -> Option<PageId> {
        if clock_tick {
            page_table.age_mapped();
        }

        // Scan downwards with `<=` so the lowest index wins a tie.
        let mut lowest: Option<(PageId, u32)> = None;
        for (page, entry) in page_table.mapped().rev() {
            let counter = entry.aging_counter();
            match lowest {
                Some((_, best)) if counter > best => {}
                _ => lowest = Some((page, counter)),
            }
        }
        lowest.map(|(page, _)| page)
    }
}
