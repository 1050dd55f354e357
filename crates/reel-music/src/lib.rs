//! Background music selection.
//!
//! The track library is a read-only index loaded once at startup from a
//! JSON manifest next to the audio files; selection is deterministic for
//! identical inputs.

pub mod error;
pub mod library;

pub use error::{MusicError, MusicResult};
pub use library::{MusicLibrary, MusicLibraryConfig};
