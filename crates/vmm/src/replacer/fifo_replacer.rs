use super::replacer::EvictionPolicy;
use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// Evicts the page that has been resident the longest, i.e. the one in the oldest frame.
#[derive(Debug, Default)]
pub(crate) struct FifoReplacer;

impl FifoReplacer {
    pub(crate) fn new() -> Self {
        FifoReplacer
    }
}

impl EvictionPolicy for FifoReplacer {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        _last_page: Option<PageId>,
        oldest_frame: FrameId,
        _num_frames: usize,
        _clock_tick: bool,
    ) -> Option<PageId> {
        page_table.page_in_frame(oldest_frame)
    }
}
