//! Job store and queue.
//!
//! Sole source of truth for job records and their lifecycle state. Records
//! live in memory; one rendered artifact per job id lives under the data
//! directory. The queue is in-process FIFO: jobs are handed to the worker
//! strictly in submission order.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{JobStore, StoreConfig};
