use std::path::Path;
use std::time::Duration;

use radarcast_transport::CommandPort;
use tracing::info;

use crate::error::{EngineError, Result};

/// Pause between replayed commands; the sensor firmware needs time to
/// apply each one before the next arrives.
pub const COMMAND_GAP: Duration = Duration::from_millis(100);

/// Load the sensor command file.
///
/// One command per line; blank lines and `%` comment lines are skipped.
/// A missing or effectively empty file is fatal: the sensor will not
/// stream without its configuration.
pub fn load_command_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            EngineError::EmptyCommandFile {
                path: path.to_path_buf(),
            }
        } else {
            // Permission problems and the like must report their real cause.
            EngineError::Io(err)
        }
    })?;

    let commands: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('%'))
        .map(str::to_string)
        .collect();

    if commands.is_empty() {
        return Err(EngineError::EmptyCommandFile {
            path: path.to_path_buf(),
        });
    }

    Ok(commands)
}

/// Replay commands to the sensor's control channel, line by line.
pub fn replay_commands<P: CommandPort>(
    port: &mut P,
    commands: &[String],
    gap: Duration,
) -> Result<()> {
    for command in commands {
        port.send_command(command)?;
        info!(%command, "sent sensor command");
        std::thread::sleep(gap);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radarcast_transport::TransportError;

    #[derive(Default)]
    struct RecordingPort {
        sent: Vec<String>,
        fail_after: Option<usize>,
    }

    impl CommandPort for RecordingPort {
        fn send_command(&mut self, command: &str) -> radarcast_transport::Result<()> {
            if let Some(limit) = self.fail_after {
                if self.sent.len() >= limit {
                    return Err(TransportError::Io(std::io::Error::from(
                        std::io::ErrorKind::BrokenPipe,
                    )));
                }
            }
            self.sent.push(command.to_string());
            Ok(())
        }
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("radarcast-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn skips_comments_and_blanks() {
        let path = temp_file(
            "cfg-ok",
            "% area scanner profile\n\nsensorStop\nflushCfg\n  \n% trailer\nsensorStart\n",
        );
        let commands = load_command_file(&path).unwrap();
        assert_eq!(commands, vec!["sensorStop", "flushCfg", "sensorStart"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn comment_only_file_is_rejected() {
        let path = temp_file("cfg-comments", "% nothing\n% here\n");
        let err = load_command_file(&path).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCommandFile { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = load_command_file("/nonexistent/radar.cfg").unwrap_err();
        assert!(matches!(err, EngineError::EmptyCommandFile { .. }));
    }

    #[test]
    fn unreadable_path_reports_io_cause() {
        // A directory is not a readable command file; the failure must not
        // masquerade as "missing or empty".
        let err = load_command_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn replays_in_order() {
        let mut port = RecordingPort::default();
        let commands = vec!["sensorStop".to_string(), "sensorStart".to_string()];
        replay_commands(&mut port, &commands, Duration::ZERO).unwrap();
        assert_eq!(port.sent, commands);
    }

    #[test]
    fn replay_stops_on_port_failure() {
        let mut port = RecordingPort {
            sent: Vec::new(),
            fail_after: Some(1),
        };
        let commands = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = replay_commands(&mut port, &commands, Duration::ZERO).unwrap_err();
        assert!(matches!(err, EngineError::Transport(_)));
        assert_eq!(port.sent, vec!["a"]);
    }
}
