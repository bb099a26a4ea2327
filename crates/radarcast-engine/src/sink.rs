use std::collections::VecDeque;

use radarcast_wire::TrackedTarget;
use tracing::{debug, warn};

/// Result of a single non-blocking push attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The record was written to the sink.
    Delivered,
    /// The sink exists but cannot accept data right now.
    Busy,
    /// No consumer is attached (or the connection just broke).
    Unavailable,
}

/// Downstream consumer of decoded targets.
///
/// Implementations must not block: the poll loop calls this between
/// reservoir passes and a stalled sink must never stall frame recovery.
pub trait TargetSink {
    fn try_push(&mut self, record: &str) -> PushOutcome;
}

/// Format one target as the downstream ASCII record.
///
/// `id|posX|posY|posZ|velX|velY|velZ|accX|accY|accZ`, every floating
/// field with exactly two decimal digits.
pub fn format_record(target: &TrackedTarget) -> String {
    let [px, py, pz] = target.position;
    let [vx, vy, vz] = target.velocity;
    let [ax, ay, az] = target.acceleration;
    format!(
        "{}|{px:.2}|{py:.2}|{pz:.2}|{vx:.2}|{vy:.2}|{vz:.2}|{ax:.2}|{ay:.2}|{az:.2}",
        target.id
    )
}

/// Retry-aware wrapper around a [`TargetSink`].
///
/// Records that could not be delivered are queued and retried, oldest
/// first, before anything newer is pushed: ordering is preserved and
/// nothing is dropped without at least one retry attempt. The queue is
/// bounded; when full the oldest record is dropped with a warning.
#[derive(Debug)]
pub struct Forwarder<S> {
    sink: S,
    pending: VecDeque<String>,
    max_pending: usize,
}

impl<S: TargetSink> Forwarder<S> {
    pub fn new(sink: S, max_pending: usize) -> Self {
        Self {
            sink,
            pending: VecDeque::new(),
            max_pending,
        }
    }

    /// Queue one target and attempt delivery of everything pending.
    pub fn forward(&mut self, target: &TrackedTarget) {
        if self.pending.len() >= self.max_pending {
            if let Some(dropped) = self.pending.pop_front() {
                warn!(record = %dropped, "sink backlog full, dropping oldest record");
            }
        }
        self.pending.push_back(format_record(target));
        self.flush();
    }

    /// Push queued records until the sink pushes back. Returns the number
    /// delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(front) = self.pending.front() {
            match self.sink.try_push(front) {
                PushOutcome::Delivered => {
                    self.pending.pop_front();
                    delivered += 1;
                }
                PushOutcome::Busy | PushOutcome::Unavailable => break,
            }
        }
        delivered
    }

    /// Records awaiting delivery.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Named-pipe sink (Unix FIFO), opened non-blocking.
///
/// The consumer process may come and go: open fails with `ENXIO` until a
/// reader attaches, and an attached reader that exits surfaces as a broken
/// pipe on write. Both map to [`PushOutcome::Unavailable`] and the pipe is
/// re-opened on a later push.
#[cfg(unix)]
pub struct PipeSink {
    path: std::path::PathBuf,
    writer: Option<std::fs::File>,
}

#[cfg(unix)]
impl PipeSink {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    fn ensure_open(&mut self) -> Option<&mut std::fs::File> {
        use std::os::unix::fs::OpenOptionsExt;

        if self.writer.is_none() {
            match std::fs::OpenOptions::new()
                .write(true)
                .custom_flags(libc::O_NONBLOCK)
                .open(&self.path)
            {
                Ok(file) => {
                    debug!(path = ?self.path, "sink pipe opened");
                    self.writer = Some(file);
                }
                Err(err) if err.raw_os_error() == Some(libc::ENXIO) => {
                    // No reader attached yet.
                    return None;
                }
                Err(err) => {
                    warn!(path = ?self.path, %err, "sink pipe open failed");
                    return None;
                }
            }
        }
        self.writer.as_mut()
    }
}

#[cfg(unix)]
impl TargetSink for PipeSink {
    fn try_push(&mut self, record: &str) -> PushOutcome {
        use std::io::Write;

        let Some(file) = self.ensure_open() else {
            return PushOutcome::Unavailable;
        };

        let mut line = Vec::with_capacity(record.len() + 1);
        line.extend_from_slice(record.as_bytes());
        line.push(b'\n');

        // Lines are far below PIPE_BUF, so a non-blocking FIFO write is
        // all-or-nothing.
        match file.write(&line) {
            Ok(_) => PushOutcome::Delivered,
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => PushOutcome::Busy,
            Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!(path = ?self.path, "sink reader went away");
                self.writer = None;
                PushOutcome::Unavailable
            }
            Err(err) => {
                warn!(path = ?self.path, %err, "sink write failed");
                self.writer = None;
                PushOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, pos: [f32; 3], vel: [f32; 3], acc: [f32; 3]) -> TrackedTarget {
        TrackedTarget {
            id,
            position: pos,
            velocity: vel,
            acceleration: acc,
        }
    }

    #[test]
    fn record_format_two_decimals() {
        let t = target(7, [1.0, 2.0, 3.0], [0.0; 3], [0.0; 3]);
        assert_eq!(
            format_record(&t),
            "7|1.00|2.00|3.00|0.00|0.00|0.00|0.00|0.00|0.00"
        );
    }

    #[test]
    fn record_format_rounds_to_two_decimals() {
        let t = target(12, [1.005, -0.125, 10.0], [0.333, 0.0, 0.0], [0.0; 3]);
        let record = format_record(&t);
        let fields: Vec<&str> = record.split('|').collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0], "12");
        assert_eq!(fields[2], "-0.12");
        assert_eq!(fields[4], "0.33");
    }

    #[derive(Default)]
    struct ScriptedSink {
        outcomes: Vec<PushOutcome>,
        delivered: Vec<String>,
    }

    impl TargetSink for ScriptedSink {
        fn try_push(&mut self, record: &str) -> PushOutcome {
            let outcome = if self.outcomes.is_empty() {
                PushOutcome::Delivered
            } else {
                self.outcomes.remove(0)
            };
            if outcome == PushOutcome::Delivered {
                self.delivered.push(record.to_string());
            }
            outcome
        }
    }

    #[test]
    fn forward_delivers_immediately_when_sink_is_ready() {
        let mut fwd = Forwarder::new(ScriptedSink::default(), 16);
        fwd.forward(&target(1, [0.0; 3], [0.0; 3], [0.0; 3]));
        assert_eq!(fwd.pending(), 0);
        assert_eq!(fwd.sink_mut().delivered.len(), 1);
    }

    #[test]
    fn unavailable_defers_then_retries_in_order() {
        let sink = ScriptedSink {
            outcomes: vec![PushOutcome::Unavailable, PushOutcome::Unavailable],
            delivered: Vec::new(),
        };
        let mut fwd = Forwarder::new(sink, 16);

        fwd.forward(&target(1, [1.0, 0.0, 0.0], [0.0; 3], [0.0; 3]));
        fwd.forward(&target(2, [2.0, 0.0, 0.0], [0.0; 3], [0.0; 3]));
        assert_eq!(fwd.pending(), 2);

        // Sink comes back; both go through, oldest first.
        assert_eq!(fwd.flush(), 2);
        let delivered = &fwd.sink_mut().delivered;
        assert!(delivered[0].starts_with("1|"));
        assert!(delivered[1].starts_with("2|"));
    }

    #[test]
    fn busy_sink_stops_flush_without_losing_records() {
        let sink = ScriptedSink {
            outcomes: vec![PushOutcome::Delivered, PushOutcome::Busy],
            delivered: Vec::new(),
        };
        let mut fwd = Forwarder::new(sink, 16);

        fwd.forward(&target(1, [0.0; 3], [0.0; 3], [0.0; 3]));
        fwd.forward(&target(2, [0.0; 3], [0.0; 3], [0.0; 3]));

        assert_eq!(fwd.pending(), 1);
        assert_eq!(fwd.flush(), 1);
        assert_eq!(fwd.pending(), 0);
    }

    #[test]
    fn backlog_cap_drops_oldest() {
        let sink = ScriptedSink {
            outcomes: vec![PushOutcome::Unavailable; 8],
            delivered: Vec::new(),
        };
        let mut fwd = Forwarder::new(sink, 2);

        for id in 1..=3 {
            fwd.forward(&target(id, [0.0; 3], [0.0; 3], [0.0; 3]));
        }

        assert_eq!(fwd.pending(), 2);
        assert_eq!(fwd.flush(), 2);
        let delivered = &fwd.sink_mut().delivered;
        assert!(delivered[0].starts_with("2|"));
        assert!(delivered[1].starts_with("3|"));
    }

    #[test]
    #[cfg(unix)]
    fn pipe_sink_unavailable_without_reader() {
        let dir = std::env::temp_dir().join(format!("radarcast-sink-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let fifo = dir.join("targets.pipe");

        let c_path = std::ffi::CString::new(fifo.to_string_lossy().as_bytes()).unwrap();
        // SAFETY: c_path is a valid NUL-terminated path for the duration of
        // the call.
        let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) };
        assert_eq!(rc, 0);

        let mut sink = PipeSink::new(&fifo);
        assert_eq!(sink.try_push("1|0.00"), PushOutcome::Unavailable);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[cfg(unix)]
    fn pipe_sink_delivers_once_reader_attached() {
        use std::io::Read;

        let dir = std::env::temp_dir().join(format!("radarcast-sink-rw-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let fifo = dir.join("targets.pipe");

        let c_path = std::ffi::CString::new(fifo.to_string_lossy().as_bytes()).unwrap();
        // SAFETY: c_path is a valid NUL-terminated path for the duration of
        // the call.
        let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) };
        assert_eq!(rc, 0);

        let reader_path = fifo.clone();
        let reader = std::thread::spawn(move || {
            let mut file = std::fs::File::open(reader_path).unwrap();
            let mut buf = String::new();
            file.read_to_string(&mut buf).unwrap();
            buf
        });

        let mut sink = PipeSink::new(&fifo);
        let record = "7|1.00|2.00|3.00|0.00|0.00|0.00|0.00|0.00|0.00";
        let mut outcome = sink.try_push(record);
        // The reader thread may not have the FIFO open yet.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while outcome != PushOutcome::Delivered && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(10));
            outcome = sink.try_push(record);
        }
        assert_eq!(outcome, PushOutcome::Delivered);
        drop(sink);

        let read_back = reader.join().unwrap();
        assert!(read_back.contains(record));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
