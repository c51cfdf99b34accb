/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Upper bound for a single hook query, in milliseconds.
    /// A query that exceeds it counts as "not currently satisfiable".
    pub query_timeout_ms: u64,
    /// Capacity of the evaluation worker's command queue.
    pub command_buffer_size: usize,
    /// Capacity of each event topic.
    pub event_buffer_size: usize,
}

impl EngineConfig {
    pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 2_000;
    pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 32;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    pub fn new() -> Self {
        Self {
            query_timeout_ms: Self::DEFAULT_QUERY_TIMEOUT_MS,
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER_SIZE,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }

    pub fn with_query_timeout_ms(mut self, query_timeout_ms: u64) -> Self {
        self.query_timeout_ms = query_timeout_ms;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
