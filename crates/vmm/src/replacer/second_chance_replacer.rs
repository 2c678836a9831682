use super::replacer::EvictionPolicy;
use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// FIFO with a reprieve for referenced pages.
///
/// The resident pages are ordered oldest first by walking the frames circularly from the
/// oldest one. The first page with a clear reference bit is evicted; referenced pages seen on
/// the way lose their bit. If every page was referenced the oldest page is evicted.
#[derive(Debug, Default)]
pub(crate) struct SecondChanceReplacer;

impl SecondChanceReplacer {
    pub(crate) fn new() -> Self {
        SecondChanceReplacer
    }

    /// Resident pages in frame-circular order, starting at `oldest_frame`.
    fn queue(page_table: &PageTable, oldest_frame: FrameId, num_frames: usize) -> Vec<PageId> {
        (0..num_frames)
            .map(|offset| (oldest_frame + offset) % num_frames)
            .filter_map(|frame_id| page_table.page_in_frame(frame_id))
            .collect()
    }
}

impl EvictionPolicy for SecondChanceReplacer {
    fn name(&self) -> &'static str {
        "second_chance"
    }

    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        _last_page: Option<PageId>,
        oldest_frame: FrameId,
        num_frames: usize,
        _clock_tick: bool,
    ) -> Option<PageId> {
        let queue = Self::queue(page_table, oldest_frame, num_frames);

        for &page in &queue {
            let entry = page_table.entry_mut(page);
            if !entry.is_referenced() {
                return Some(page);
            }
            entry.clear_reference();
        }

        // Every page got its second chance; fall back to FIFO.
        queue.first().copied()
    }
}
