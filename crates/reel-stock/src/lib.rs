//! Stock footage selection.
//!
//! Resolves one background video asset per scene from a remote search
//! provider. Each provider query runs under a per-call deadline; queries
//! that fail with a timeout classification are retried up to a fixed cap
//! with no delay in between, while any other provider failure propagates
//! immediately. The query execution itself sits behind the [`SearchBackend`]
//! trait so the retry and filtering logic can be tested without touching the
//! network.

pub mod error;
pub mod pexels;
pub mod selector;

pub use error::{StockError, StockResult};
pub use pexels::{PexelsBackend, PexelsConfig};
pub use selector::{SearchBackend, StockSelector, DEFAULT_QUERY_TIMEOUT, MAX_QUERY_ATTEMPTS};
