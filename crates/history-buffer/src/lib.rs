//! Bounded History Buffers
//!
//! Fixed-capacity FIFO windows over per-frame signals. Pushing past
//! capacity evicts the oldest sample, so the buffer always holds the
//! most recent `capacity` values in push order.

mod buffer;

pub use buffer::HistoryBuffer;
