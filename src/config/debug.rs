//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` by default.
//! Every flag is further gated by `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit cache hit / miss / stale decisions for the memoized fetchers.
    pub print_cache_events: bool,
    /// Emit elapsed time for every upstream request.
    pub print_fetch_timings: bool,
    /// Emit UI interaction logs (coin switching, slider changes, tab changes).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_cache_events: false,
    print_fetch_timings: true,
    print_ui_interactions: true,
    print_state_serde: false,
    print_shutdown: false,
};
