use pagesim_error::errrange;

use crate::page_entry::PageEntry;
use crate::typedef::{AccessType, FrameId, PageId};
use crate::Result;

/// The single-level page table of the simulated address space: one [`PageEntry`] per
/// virtual page, indexed by [`PageId`].
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageEntry>,
}

impl PageTable {
    /// Creates a table of `num_pages` unmapped entries.
    pub fn new(num_pages: usize) -> Self {
        let mut entries = Vec::with_capacity(num_pages);
        entries.resize_with(num_pages, PageEntry::new);
        Self { entries }
    }

    /// Returns the number of virtual pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounds-checked lookup of a page entry.
    pub fn lookup(&self, page: PageId) -> Result<&PageEntry> {
        match self.entries.get(page) {
            Some(entry) => Ok(entry),
            None => errrange!(page as i64, self.entries.len()),
        }
    }

    /// Returns the entry for `page`, panicking on an out-of-range index. Policies only call
    /// this with indices taken from the table itself.
    pub fn entry(&self, page: PageId) -> &PageEntry {
        &self.entries[page]
    }

    pub(crate) fn entry_mut(&mut self, page: PageId) -> &mut PageEntry {
        &mut self.entries[page]
    }

    /// Iterates over `(page, entry)` pairs in ascending page order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PageId, &PageEntry)> + '_ {
        self.entries.iter().enumerate()
    }

    /// Iterates over resident pages in ascending page order.
    pub fn mapped(&self) -> impl DoubleEndedIterator<Item = (PageId, &PageEntry)> + '_ {
        self.iter().filter(|(_, entry)| entry.is_mapped())
    }

    /// Returns the number of resident pages.
    pub fn mapped_count(&self) -> usize {
        self.mapped().count()
    }

    /// Finds the resident page backed by `frame_id`. Linear in the table size, which is fine
    /// for the small tables this simulator deals with.
    pub fn page_in_frame(&self, frame_id: FrameId) -> Option<PageId> {
        self.mapped()
            .find(|(_, entry)| entry.frame_id() == Some(frame_id))
            .map(|(page, _)| page)
    }

    /// Records a hit on a resident page.
    pub(crate) fn mark_hit(&mut self, page: PageId) {
        self.entries[page].touch();
    }

    /// Maps `page` into `frame_id` after a fault.
    pub(crate) fn map_page(&mut self, page: PageId, frame_id: FrameId, access_type: AccessType) {
        let entry = &mut self.entries[page];
        assert!(
            !entry.is_mapped(),
            "Page {} is already mapped to frame {:?}",
            page,
            entry.frame_id()
        );
        entry.map(frame_id, access_type);
    }

    /// Unmaps `page`, returning the frame it occupied.
    pub(crate) fn evict_page(&mut self, page: PageId) -> FrameId {
        let entry = &mut self.entries[page];
        let Some(frame_id) = entry.frame_id() else {
            panic!("Attempted to evict page {} which is not mapped", page);
        };
        entry.reset();
        frame_id
    }

    /// Clears every page's reference bit; the periodic clock sweep.
    pub(crate) fn clear_all_reference_bits(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.clear_reference();
        }
    }

    /// Adds each resident page's reference bit onto its aging counter.
    pub(crate) fn age_mapped(&mut self) {
        for entry in self.entries.iter_mut().filter(|entry| entry.is_mapped()) {
            entry.age();
        }
    }
}
