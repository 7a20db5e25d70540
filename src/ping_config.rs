use crate::{PingError, PingResult};
use std::time::{Duration, Instant};

/// Payload bytes sent when nothing else is configured.
pub const DEFAULT_PAYLOAD_SIZE: usize = 56;
/// Per-probe wait for a reply before it is counted as lost.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_COUNT: u64 = 4;
/// Largest payload one IPv4 datagram can carry after the IP and ICMP headers.
pub const MAX_PAYLOAD_SIZE: usize = 65_507;

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq)]
pub struct PingConfig {
    /// Number of probes to send, `None` for no limit.
    pub count: Option<u64>,
    pub interval: Duration,
    pub timeout: Duration,
    pub payload_size: usize,
    pub verbose: bool,
}

impl Default for PingConfig {
    fn default() -> Self {
        PingConfig {
            count: Some(DEFAULT_COUNT),
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            verbose: false,
        }
    }
}

impl PingConfig {
    pub fn validate(&self) -> PingResult<()> {
        if self.payload_size > MAX_PAYLOAD_SIZE {
            return Err(PingError::Encoding(format!(
                "payload size {} exceeds the maximum of {MAX_PAYLOAD_SIZE} bytes",
                self.payload_size
            )));
        }
        if self.timeout.is_zero() {
            return Err(PingError::Encoding("timeout must be greater than zero".to_owned()));
        }
        if Instant::now().checked_add(self.timeout).is_none() {
            return Err(PingError::Encoding(format!("timeout {:?} is out of range", self.timeout)));
        }
        Ok(())
    }
}

/// Converts a signed payload size, as given on a command line, into a byte count.
pub fn payload_size_from_signed(size: i64) -> PingResult<usize> {
    usize::try_from(size).map_err(|_| PingError::Encoding(format!("payload size {size} is negative")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PingConfig::default();
        assert_eq!(Some(4), config.count);
        assert_eq!(Duration::from_secs(1), config.interval);
        assert_eq!(Duration::from_secs(3), config.timeout);
        assert_eq!(56, config.payload_size);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_payload_is_encoding_error() {
        let config = PingConfig { payload_size: MAX_PAYLOAD_SIZE + 1, ..PingConfig::default() };
        assert!(matches!(config.validate(), Err(PingError::Encoding(_))));

        let config = PingConfig { payload_size: MAX_PAYLOAD_SIZE, ..PingConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = PingConfig { timeout: Duration::ZERO, ..PingConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unrepresentable_timeout_is_encoding_error() {
        let config = PingConfig { timeout: Duration::from_secs_f64(1e19), ..PingConfig::default() };
        assert!(matches!(config.validate(), Err(PingError::Encoding(_))));

        let config = PingConfig { timeout: Duration::MAX, ..PingConfig::default() };
        assert!(matches!(config.validate(), Err(PingError::Encoding(_))));
    }

    #[test]
    fn negative_payload_size_is_encoding_error() {
        assert!(matches!(payload_size_from_signed(-1), Err(PingError::Encoding(_))));
        assert_eq!(0, payload_size_from_signed(0).unwrap());
        assert_eq!(56, payload_size_from_signed(56).unwrap());
    }
}
