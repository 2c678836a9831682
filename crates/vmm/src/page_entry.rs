use core::fmt;

use crate::typedef::{AccessType, FrameId};

/// Per-virtual-page metadata kept by the page table.
///
/// A page is mapped exactly when it owns a frame; an unmapped entry is always clean, so the
/// only way to leave the mapped state is [`PageEntry::reset`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    frame_id: Option<FrameId>, // Physical frame backing this page, if resident
    dirty: bool,               // Written to since it was loaded
    reference_bit: bool,       // Accessed since the last clock sweep
    reference_mode: Option<AccessType>, // Kind of the access that loaded the page
    aging_counter: u32,                 // Sum of reference bits sampled at clock ticks
}

impl fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEntry")
            .field("frame_id", &self.frame_id)
            .field("dirty", &self.dirty)
            .field("referenced", &self.reference_bit)
            .field("reference_mode", &self.reference_mode)
            .field("aging_counter", &self.aging_counter)
            .finish()
    }
}

impl PageEntry {
    /// Creates an unmapped entry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the frame backing this page, or `None` if it is not resident.
    pub fn frame_id(&self) -> Option<FrameId> {
        self.frame_id
    }

    /// Checks if the page is resident.
    pub fn is_mapped(&self) -> bool {
        self.frame_id.is_some()
    }

    /// Checks if the page was written while resident.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Checks if the page was accessed since the last clock sweep.
    pub fn is_referenced(&self) -> bool {
        self.reference_bit
    }

    pub fn reference_mode(&self) -> Option<AccessType> {
        self.reference_mode
    }

    pub fn aging_counter(&self) -> u32 {
        self.aging_counter
    }

    /// Sets the reference bit.
    pub(crate) fn touch(&mut self) {
        self.reference_bit = true;
    }

    pub(crate) fn clear_reference(&mut self) {
        self.reference_bit = false;
    }

    /// Loads the page into `frame_id`. The dirty bit is sticky: a read never cleans a page.
    pub(crate) fn map(&mut self, frame_id: FrameId, access_type: AccessType) {
        self.frame_id = Some(frame_id);
        self.dirty |= access_type.is_write();
        self.reference_bit = true;
        self.reference_mode = Some(access_type);
    }

    /// Adds the current reference bit onto the aging counter.
    pub(crate) fn age(&mut self) {
        self.aging_counter = self.aging_counter.saturating_add(u32::from(self.reference_bit));
    }

    /// Resets the entry to its unmapped state.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    #[cfg(test)]
    pub(crate) fn set_aging_counter(&mut self, counter: u32) {
        self.aging_counter = counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unmapped_and_clean() {
        let entry = PageEntry::new();
        assert!(!entry.is_mapped());
        assert_eq!(None, entry.frame_id());
        assert!(!entry.is_dirty());
        assert!(!entry.is_referenced());
        assert_eq!(0, entry.aging_counter());
    }

    #[test]
    fn test_map_sets_reference_and_dirty_on_write() {
        let mut entry = PageEntry::new();
        entry.map(3, AccessType::Read);
        assert_eq!(Some(3), entry.frame_id());
        assert!(entry.is_referenced());
        assert!(!entry.is_dirty());
        assert_eq!(Some(AccessType::Read), entry.reference_mode());

        entry.reset();
        entry.map(1, AccessType::Write);
        assert!(entry.is_dirty());
        assert_eq!(Some(AccessType::Write), entry.reference_mode());
    }

    #[test]
    fn test_debug_shows_reference_mode() {
        let mut entry = PageEntry::new();
        entry.map(2, AccessType::Write);
        let debug = format!("{:?}", entry);
        assert!(debug.contains("frame_id: Some(2)"));
        assert!(debug.contains("reference_mode: Some(Write)"));
    }

    #[test]
    fn test_age_accumulates_reference_bit() {
        let mut entry = PageEntry::new();
        entry.map(0, AccessType::Read);
        entry.age();
        entry.age();
        assert_eq!(2, entry.aging_counter());

        entry.clear_reference();
        entry.age();
        assert_eq!(2, entry.aging_counter());
    }

    #[test]
    fn test_reset_restores_unmapped_defaults() {
        let mut entry = PageEntry::new();
        entry.map(2, AccessType::Write);
        entry.age();
        entry.reset();
        assert_eq!(PageEntry::new(), entry);
    }
}
