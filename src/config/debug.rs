//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit each outbound request and its status code.
    pub print_requests: bool,
    /// Emit history serialization/deserialization details.
    pub print_history_serde: bool,
    /// Emit stale-response drops in the engine.
    pub print_generation_drops: bool,
    /// Emit chart projection summaries.
    pub print_chart_projection: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_requests: false,
    print_history_serde: false,
    print_generation_drops: true,
    print_chart_projection: false,
};
