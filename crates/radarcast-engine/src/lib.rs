//! Frame assembly engine for the radar byte stream.
//!
//! Sits between the serial transport and the downstream consumer:
//! accumulates raw bytes in a [`Reservoir`], recovers frames with the
//! [`FrameAssembler`] (sentinel sync, header decode, bounded TLV walk),
//! and forwards decoded targets through a [`TargetSink`].

pub mod assembler;
pub mod config;
pub mod error;
pub mod replay;
pub mod reservoir;
pub mod sink;

pub use assembler::{DecodedFrame, FrameAssembler};
pub use config::RadarConfig;
pub use error::{EngineError, Result};
pub use replay::{load_command_file, replay_commands, COMMAND_GAP};
pub use reservoir::{Reservoir, DEFAULT_MAX_RESERVOIR};
pub use sink::{format_record, Forwarder, PushOutcome, TargetSink};

#[cfg(unix)]
pub use sink::PipeSink;
