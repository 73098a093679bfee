/// Session configuration.
///
/// # Examples
///
/// ```
/// use circuit_rs::config::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_threads(4)
///     .with_max_conflicts(10_000);
/// assert_eq!(config.threads, 4);
/// assert_eq!(config.max_time, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Number of search threads requested from the engine (default: 1)
    pub threads: usize,
    /// Whether the engine may eliminate variables during search (default: true)
    pub elimination: bool,
    /// Wall-clock bound per solve call, in seconds (default: none)
    pub max_time: Option<f64>,
    /// Conflict bound per solve call (default: none)
    pub max_conflicts: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            elimination: true,
            max_time: None,
            max_conflicts: None,
        }
    }
}

impl SessionConfig {
    pub fn new(threads: usize, elimination: bool) -> Self {
        Self {
            threads,
            elimination,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_elimination(mut self, elimination: bool) -> Self {
        self.elimination = elimination;
        self
    }

    pub fn with_max_time(mut self, seconds: f64) -> Self {
        self.max_time = Some(seconds);
        self
    }

    pub fn with_max_conflicts(mut self, count: u64) -> Self {
        self.max_conflicts = Some(count);
        self
    }
}
