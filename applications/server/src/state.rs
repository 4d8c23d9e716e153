/// Shared application state
use lathe_mastering::MasteringParams;

/// Application state shared across all handlers
///
/// Holds the default mastering parameters resolved from configuration.
/// Requests are otherwise stateless; nothing mutable is shared between them,
/// so any number of uploads can master in parallel.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub defaults: MasteringParams,
}

impl AppState {
    pub fn new(defaults: MasteringParams) -> Self {
        Self { defaults }
    }
}
