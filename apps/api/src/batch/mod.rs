// Batch processing: the bounded worker pool that drives candidates through
// acquisition, scoring, and matching, and the sink abstraction its progress
// events flow into.

pub mod orchestrator;
pub mod sink;

pub use orchestrator::{BatchError, BatchOrchestrator};
pub use sink::{ChannelSink, EventSink};
