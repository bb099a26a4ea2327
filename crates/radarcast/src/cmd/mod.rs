use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure the sensor and stream decoded targets to the sink.
    Run(RunArgs),
    /// Decode a captured raw byte stream and print its targets.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sensor command file to replay at startup.
    pub command_file: PathBuf,
    /// Serial device of the sensor's command UART.
    #[arg(long, value_name = "DEV", default_value = "/dev/ttyUSB0")]
    pub command_port: PathBuf,
    /// Serial device of the sensor's data UART.
    #[arg(long, value_name = "DEV", default_value = "/dev/ttyUSB1")]
    pub data_port: PathBuf,
    /// Command UART baud rate.
    #[arg(long, default_value_t = 115_200)]
    pub command_baud: u32,
    /// Data UART baud rate.
    #[arg(long, default_value_t = 921_600)]
    pub data_baud: u32,
    /// Named pipe to write target records to.
    #[arg(long, value_name = "PATH", default_value = "/tmp/radarcast.pipe")]
    pub sink: PathBuf,
    /// Idle sleep between polls, in milliseconds.
    #[arg(long, default_value_t = 5)]
    pub poll_ms: u64,
    /// Reservoir cap in bytes; overflow drops the buffered stream.
    #[arg(long, default_value_t = radarcast_engine::DEFAULT_MAX_RESERVOIR)]
    pub max_reservoir: usize,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Raw capture file of the sensor's data stream.
    pub file: PathBuf,
    /// Feed the capture in chunks of this size to exercise partial delivery.
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print extended build information.
    #[arg(long)]
    pub extended: bool,
}
