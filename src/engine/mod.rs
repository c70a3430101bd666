pub mod core;
pub mod generation;

// Re-export key components
pub use core::{EngineError, LabSeqEngine, PendingLookup};
pub use generation::RequestGeneration;
