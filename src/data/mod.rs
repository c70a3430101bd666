// Service access, local persistence and the result history
pub mod client;
pub mod history;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use client::{FetchError, FetchErrorKind, HealthStatus, LabSeqClient};
pub use history::HistoryCache;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpReply, ReqwestTransport, Transport, TransportError};
