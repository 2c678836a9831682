use log::trace;

use crate::typedef::FrameId;

/// Tracks which physical frames are occupied and hands out free ones in circular order.
///
/// Besides occupancy the allocator owns the `oldest_frame` cursor: the frame holding the page
/// that was mapped earliest among the resident pages, assuming frames are recycled in
/// allocation order. It is set by the first allocation of a run and advanced by one on every
/// eviction, whichever policy chose the victim.
#[derive(Debug, Clone)]
pub struct FrameAllocator {
    occupied: Vec<bool>,
    free_count: usize,
    prev_free: Option<FrameId>, // Last frame handed out by the circular scan
    oldest_frame: Option<FrameId>,
}

impl FrameAllocator {
    pub fn new(num_frames: usize) -> Self {
        Self {
            occupied: vec![false; num_frames],
            free_count: num_frames,
            prev_free: None,
            oldest_frame: None,
        }
    }

    /// Returns the number of physical frames.
    pub fn capacity(&self) -> usize {
        self.occupied.len()
    }

    /// Returns the number of frames that were never handed out.
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn is_occupied(&self, frame_id: FrameId) -> bool {
        self.occupied.get(frame_id).copied().unwrap_or(false)
    }

    /// Returns the frame holding the earliest-mapped resident page, or `None` before the first
    /// allocation.
    pub fn oldest_frame(&self) -> Option<FrameId> {
        self.oldest_frame
    }

    /// Hands out a free frame, scanning circularly from just past the previously allocated one.
    /// Returns `None` once every frame is occupied.
    pub(crate) fn allocate_free(&mut self) -> Option<FrameId> {
        if self.free_count == 0 {
            trace!("No free frames");
            return None;
        }

        let num_frames = self.capacity();
        let mut frame_id = self.prev_free.map_or(0, |prev| (prev + 1) % num_frames);
        while self.occupied[frame_id] {
            frame_id = (frame_id + 1) % num_frames;
        }

        self.occupied[frame_id] = true;
        self.free_count -= 1;
        self.prev_free = Some(frame_id);
        if self.oldest_frame.is_none() {
            self.oldest_frame = Some(frame_id);
        }
        Some(frame_id)
    }

    /// Accounts for the eviction of the page held in `victim_frame`. The frame stays occupied
    /// (the faulting page reuses it) and the oldest-frame cursor moves one frame forward.
    pub(crate) fn reclaim(&mut self, victim_frame: FrameId) {
        assert!(
            self.is_occupied(victim_frame),
            "Reclaimed frame {} was never allocated",
            victim_frame
        );
        let num_frames = self.capacity();
        self.oldest_frame = self.oldest_frame.map(|oldest| (oldest + 1) % num_frames);
    }
}
