use std::fmt::Debug;

use crate::page_table::PageTable;
use crate::typedef::{FrameId, PageId};

/// A page replacement policy: picks the resident page to evict when every frame is in use.
///
/// Every policy receives the same arguments even if it ignores some of them, so that they can
/// be swapped behind a `Box<dyn EvictionPolicy>`.
pub trait EvictionPolicy: Send + Sync + Debug {
    /// The registry name of this policy.
    fn name(&self) -> &'static str;

    /// Chooses a victim among the mapped pages of `page_table`.
    ///
    /// * `last_page` - the page mapped by the previous fault, if any.
    /// * `oldest_frame` - the frame holding the earliest-mapped page, in frame-allocation order.
    /// * `num_frames` - the number of physical frames.
    /// * `clock_tick` - whether the access being resolved falls on a clock tick.
    ///
    /// Policies may update per-page bookkeeping (reference bits, aging counters) while
    /// searching. Returns `None` only if no page is mapped.
    fn select_victim(
        &mut self,
        page_table: &mut PageTable,
        last_page: Option<PageId>,
        oldest_frame: FrameId,
        num_frames: usize,
        clock_tick: bool,
    ) -> Option<PageId>;
}
