//! The demand-paging core of Pagesim: a page table, a circular frame allocator, the
//! replaceable eviction policies and the simulator that drives them over a trace.
pub mod config;
pub mod frame_allocator;
pub mod page_entry;
pub mod page_table;
pub mod replacer;
pub mod simulator;
pub mod trace;
pub mod typedef;

pub use config::SimConfig;
pub use replacer::{PolicyKind, POLICIES};
pub use simulator::{AccessOutcome, SimReport, Simulator};
pub use trace::{Access, TraceHeader, TraceReader};
pub use typedef::{AccessType, FrameId, PageId};

pub(crate) type Result<T> = std::result::Result<T, pagesim_error::Error>;
