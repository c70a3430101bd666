// Domain types and value objects
pub mod display_mode;
pub mod index_input;
pub mod sequence_result;

// Re-export commonly used types
pub use display_mode::DisplayMode;
pub use index_input::{IndexInputError, parse_index};
pub use sequence_result::{HistoryEntry, SequenceResult};
