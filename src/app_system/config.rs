use tracing::{info, warn};

pub const DEFAULT_CHANNEL_BUFFER_SIZE: usize = 32;
/// Films returned by a popularity query when the caller gives no count.
pub const DEFAULT_POPULAR_COUNT: usize = 10;

/// Tunables for a [`FilmorateSystem`](super::FilmorateSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of each store's request channel
    pub channel_buffer_size: usize,
    pub default_popular_count: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: DEFAULT_CHANNEL_BUFFER_SIZE,
            default_popular_count: DEFAULT_POPULAR_COUNT,
        }
    }
}

impl SystemConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Supported environment variables:
    /// - FILMORATE_CHANNEL_BUFFER_SIZE: request channel capacity (at least 1)
    /// - FILMORATE_POPULAR_COUNT: default popularity query size
    ///
    /// Values that fail to parse or are out of range are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("FILMORATE_CHANNEL_BUFFER_SIZE") {
            match val.parse::<usize>() {
                Ok(size) if size >= 1 => {
                    config.channel_buffer_size = size;
                    info!(size, "Applied FILMORATE_CHANNEL_BUFFER_SIZE environment variable");
                }
                Ok(size) => warn!(size, "FILMORATE_CHANNEL_BUFFER_SIZE must be at least 1, ignoring"),
                Err(_) => warn!(val = %val, "FILMORATE_CHANNEL_BUFFER_SIZE is not a valid usize, ignoring"),
            }
        }

        if let Some(val) = lookup("FILMORATE_POPULAR_COUNT") {
            match val.parse::<usize>() {
                Ok(count) => {
                    config.default_popular_count = count;
                    info!(count, "Applied FILMORATE_POPULAR_COUNT environment variable");
                }
                Err(_) => warn!(val = %val, "FILMORATE_POPULAR_COUNT is not a valid usize, ignoring"),
            }
        }

        config
    }
}
