use super::replacer::EvictionPolicy;
use crate::page_entry::PageEntry;
use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// Direction in which a class of pages is searched.
#[derive(Debug, Clone, Copy)]
enum Scan {
    Forward,
    Backward,
}

/// NRU classes as `(referenced, modified)` in eviction priority order, each paired with the
/// direction it is scanned in. Ties within a class go to the first page met in that direction.
const CLASSES: [((bool, bool), Scan); 4] = [
    ((false, false), Scan::Forward),
    ((false, true), Scan::Backward),
    ((true, false), Scan::Forward),
    ((true, true), Scan::Backward),
];

/// Not Recently Used: evicts a page from the lowest non-empty `(referenced, modified)` class.
#[derive(Debug, Default)]
pub(crate) struct NruReplacer;

impl NruReplacer {
    pub(crate) fn new() -> Self {
        NruReplacer
    }

    fn find_in_class(
        page_table: &PageTable,
        (referenced, modified): (bool, bool),
        scan: Scan,
    ) -> Option<PageId> {
        let matches = |&(_, entry): &(PageId, &PageEntry)| {
            entry.is_referenced() == referenced && entry.is_dirty() == modified
        };
        let found = match scan {
            Scan::Forward => page_table.mapped().find(matches),
            Scan::Backward => page_table.mapped().rev().find(matches),
        };
        found.map(|(page, _)| page)
    }
}

impl EvictionPolicy for NruReplacer {
    fn name(&self) -> &'static str {
        "nru"
    }

    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        _last_page: Option<PageId>,
        _oldest_frame: FrameId,
        _num_frames: usize,
        _clock_tick: bool,
    ) -> Option<PageId> {
        let page_table: &PageTable = page_table;
        CLASSES
            .iter()
            .find_map(|&(class, scan)| Self::find_in_class(page_table, class, scan))
    }
}
