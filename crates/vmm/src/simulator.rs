use log::{debug, info, trace};

use crate::config::SimConfig;
use crate::frame_allocator::FrameAllocator;
use crate::page_table::PageTable;
use crate::replacer::replacer::EvictionPolicy;
use crate::trace::Access;
use crate::typedef::{AccessType, FrameId, PageId};
use crate::Result;

/// The result of resolving a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The page was resident.
    Hit,
    /// The page was loaded into `frame_id`, evicting `evicted` if no frame was free.
    Fault {
        frame_id: FrameId,
        evicted: Option<PageId>,
    },
}

impl AccessOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::Fault { .. })
    }
}

/// Counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimReport {
    pub accesses: usize,
    pub hits: usize,
    pub faults: usize,
    pub evictions: usize,
}

/// Demand-paging simulator: the page table, frame allocator and eviction policy of one run,
/// driven one access at a time.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    page_table: PageTable,           // One entry per virtual page
    frames: FrameAllocator,          // Occupancy and oldest-frame cursor
    policy: Box<dyn EvictionPolicy>, // Chooses victims once memory is full
    last_page: Option<PageId>,       // Page mapped by the most recent fault
    report: SimReport,
}

impl Simulator {
    /// Sets up an empty address space using the configured policy.
    pub fn new(config: SimConfig) -> Self {
        let policy = config.policy.build(config.seed);
        Self::with_policy(config, policy)
    }

    /// Sets up an empty address space that evicts with `policy` instead of `config.policy`.
    pub fn with_policy(config: SimConfig, policy: Box<dyn EvictionPolicy>) -> Self {
        Self {
            page_table: PageTable::new(config.num_pages),
            frames: FrameAllocator::new(config.num_frames),
            policy,
            last_page: None,
            report: SimReport::default(),
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frame_allocator(&self) -> &FrameAllocator {
        &self.frames
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn last_page(&self) -> Option<PageId> {
        self.last_page
    }

    /// Returns the counters accumulated so far.
    pub fn report(&self) -> SimReport {
        self.report
    }

    /// Resolves one access.
    ///
    /// A hit only sets the page's reference bit. A fault takes a free frame or evicts a victim,
    /// maps the page and, if `clock_tick` is set, clears every reference bit. The clock sweep
    /// is therefore only ever reached through a fault.
    pub fn access(
        &mut self,
        page: PageId,
        access_type: AccessType,
        clock_tick: bool,
    ) -> Result<AccessOutcome> {
        if self.page_table.lookup(page)?.is_mapped() {
            self.page_table.mark_hit(page);
            self.report.accesses += 1;
            self.report.hits += 1;
            trace!("Hit on page {} ({})", page, access_type);
            return Ok(AccessOutcome::Hit);
        }

        let (frame_id, evicted) = self.acquire_frame(clock_tick);
        self.page_table.map_page(page, frame_id, access_type);
        self.last_page = Some(page);

        if clock_tick {
            self.page_table.clear_all_reference_bits();
        }

        self.report.accesses += 1;
        self.report.faults += 1;
        debug!(
            "Fault on page {} ({}): mapped to frame {}, evicted {:?}",
            page, access_type, frame_id, evicted
        );

        if cfg!(debug_assertions) {
            self.assert_consistent();
        }
        Ok(AccessOutcome::Fault { frame_id, evicted })
    }

    /// Replays a trace, ticking the clock on every `clock_frequency`-th access counted over
    /// the whole run. Stops at the first error.
    pub fn run<I>(&mut self, accesses: I) -> Result<SimReport>
    where
        I: IntoIterator<Item = Result<Access>>,
    {
        info!(
            "Simulating {} with {} pages, {} frames, clock every {} accesses",
            self.policy.name(),
            self.config.num_pages,
            self.config.num_frames,
            self.config.clock_frequency
        );

        for access in accesses {
            let access = access?;
            let clock_tick = self.config.is_clock_tick(self.report.accesses);
            self.access(access.page, access.access_type, clock_tick)?;
        }

        info!(
            "{} accesses: {} hits, {} faults, {} evictions",
            self.report.accesses, self.report.hits, self.report.faults, self.report.evictions
        );
        Ok(self.report)
    }

    /// Returns a free frame, evicting a page chosen by the policy if necessary, together with
    /// the evicted page.
    fn acquire_frame(&mut self, clock_tick: bool) -> (FrameId, Option<PageId>) {
        if let Some(frame_id) = self.frames.allocate_free() {
            return (frame_id, None);
        }

        let Some(oldest_frame) = self.frames.oldest_frame() else {
            panic!("Memory is full but no frame was ever allocated");
        };
        let victim = self.policy.select_victim(
            &mut self.page_table,
            self.last_page,
            oldest_frame,
            self.frames.capacity(),
            clock_tick,
        );
        let Some(victim) = victim else {
            panic!(
                "Eviction policy '{}' found no victim with all {} frames in use",
                self.policy.name(),
                self.frames.capacity()
            );
        };
        assert!(
            victim < self.page_table.len() && self.page_table.entry(victim).is_mapped(),
            "Eviction policy '{}' chose page {}, which is not resident",
            self.policy.name(),
            victim
        );

        let frame_id = self.page_table.evict_page(victim);
        self.frames.reclaim(frame_id);
        self.report.evictions += 1;
        debug!("Evicted page {} from frame {}", victim, frame_id);
        (frame_id, Some(victim))
    }

    /// Panics unless the page table and frame allocator agree:
    /// - every mapped page owns a distinct, allocated frame,
    /// - the number of mapped pages is `num_frames - free_count`,
    /// - unmapped entries carry no dirty bit, reference bit or aging count,
    /// - every access was counted as either a hit or a fault.
    pub fn assert_consistent(&self) {
        let capacity = self.frames.capacity();
        let mut owners: Vec<Option<PageId>> = vec![None; capacity];
        let mut mapped = 0;

        for (page, entry) in self.page_table.iter() {
            match entry.frame_id() {
                Some(frame_id) => {
                    assert!(
                        frame_id < capacity && self.frames.is_occupied(frame_id),
                        "Page {} maps unallocated frame {}",
                        page,
                        frame_id
                    );
                    if let Some(other) = owners[frame_id] {
                        panic!("Pages {} and {} share frame {}", other, page, frame_id);
                    }
                    owners[frame_id] = Some(page);
                    mapped += 1;
                }
                None => assert!(
                    !entry.is_dirty() && !entry.is_referenced() && entry.aging_counter() == 0,
                    "Unmapped page {} is not clean: {:?}",
                    page,
                    entry
                ),
            }
        }

        assert!(mapped <= capacity);
        assert_eq!(
            capacity - self.frames.free_count(),
            mapped,
            "Mapped pages disagree with the frame allocator"
        );
        assert_eq!(
            self.report.accesses,
            self.report.hits + self.report.faults,
            "Every access is either a hit or a fault"
        );
    }
}
