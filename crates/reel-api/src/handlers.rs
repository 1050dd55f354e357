//! Request handlers.

pub mod catalog;
pub mod health;
pub mod videos;

pub use catalog::*;
pub use health::*;
pub use videos::*;
