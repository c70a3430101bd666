//! File persistence and serialization configuration

pub struct HistoryPersistence {
    /// Key under which the whole history blob is stored
    pub key: &'static str,
    /// Maximum number of entries kept
    pub capacity: usize,
}

pub struct StorePersistence {
    /// Default directory for the file-backed store
    pub directory: &'static str,
    /// Extension appended to every key on disk
    pub extension: &'static str,
}

pub struct PersistenceConfig {
    pub history: HistoryPersistence,
    pub store: StorePersistence,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    history: HistoryPersistence {
        key: "labseq-history",
        capacity: 10,
    },
    store: StorePersistence {
        directory: ".labseq",
        extension: "json",
    },
};

/// Generate the on-disk filename for a store key
/// Example: "labseq-history.json"
pub fn store_filename(key: &str) -> String {
    format!("{}.{}", key, PERSISTENCE.store.extension)
}

