use std::path::PathBuf;
use std::time::Duration;

use crate::reservoir::DEFAULT_MAX_RESERVOIR;

/// Runtime configuration for a capture session.
///
/// Device paths, baud rates and file locations live here with the
/// session's lifetime instead of as module-level globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarConfig {
    /// Serial device for the sensor's command/control UART.
    pub command_port: PathBuf,
    /// Serial device for the sensor's binary data UART.
    pub data_port: PathBuf,
    /// Command UART baud rate.
    pub command_baud: u32,
    /// Data UART baud rate.
    pub data_baud: u32,
    /// Sensor command file replayed at startup.
    pub command_file: PathBuf,
    /// Named pipe the decoded target records are written to.
    pub sink_path: PathBuf,
    /// Sleep between poll passes when the data port is idle.
    pub poll_interval: Duration,
    /// Reservoir growth cap; overflow discards the buffered stream.
    pub max_reservoir_bytes: usize,
    /// Cap on sink records queued while the consumer is away.
    pub max_pending_records: usize,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            command_port: PathBuf::from("/dev/ttyUSB0"),
            data_port: PathBuf::from("/dev/ttyUSB1"),
            command_baud: 115_200,
            data_baud: 921_600,
            command_file: PathBuf::from("area_scanner.cfg"),
            sink_path: PathBuf::from("/tmp/radarcast.pipe"),
            poll_interval: Duration::from_millis(5),
            max_reservoir_bytes: DEFAULT_MAX_RESERVOIR,
            max_pending_records: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sensor_conventions() {
        let config = RadarConfig::default();
        assert_eq!(config.data_baud, 921_600);
        assert_eq!(config.command_baud, 115_200);
        assert!(config.max_reservoir_bytes >= 64 * 1024);
    }
}
