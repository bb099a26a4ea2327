use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use radarcast_engine::{
    load_command_file, replay_commands, Forwarder, FrameAssembler, PipeSink, RadarConfig,
    COMMAND_GAP,
};
use radarcast_transport::{ByteSource, SerialLink};
use tracing::{info, warn};

use crate::cmd::RunArgs;
use crate::exit::{engine_error, transport_error, CliError, CliResult, SUCCESS};

const READ_CHUNK_SIZE: usize = 4096;

pub fn run(args: RunArgs) -> CliResult<i32> {
    let config = RadarConfig {
        command_port: args.command_port,
        data_port: args.data_port,
        command_baud: args.command_baud,
        data_baud: args.data_baud,
        command_file: args.command_file,
        sink_path: args.sink,
        poll_interval: Duration::from_millis(args.poll_ms),
        max_reservoir_bytes: args.max_reservoir,
        ..RadarConfig::default()
    };

    // Collaborator setup is the only fatal phase: missing command file or
    // unopenable ports end the process before the capture loop starts.
    let commands = load_command_file(&config.command_file)
        .map_err(|err| engine_error("command file", err))?;

    let mut command_port = SerialLink::open(&config.command_port, config.command_baud)
        .map_err(|err| transport_error("command port", err))?;
    let mut data_port = SerialLink::open(&config.data_port, config.data_baud)
        .map_err(|err| transport_error("data port", err))?;

    info!(commands = commands.len(), "configuring sensor");
    replay_commands(&mut command_port, &commands, COMMAND_GAP)
        .map_err(|err| engine_error("sensor configuration", err))?;

    let mut assembler = FrameAssembler::new(config.max_reservoir_bytes);
    let mut forwarder = Forwarder::new(
        PipeSink::new(&config.sink_path),
        config.max_pending_records,
    );

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!(sink = ?config.sink_path, "capture loop started");
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    // Shutdown is checked only between passes so a pass never leaves a
    // frame half-consumed.
    while running.load(Ordering::SeqCst) {
        let available = data_port
            .bytes_available()
            .map_err(|err| transport_error("data port", err))?;

        if available == 0 {
            forwarder.flush();
            std::thread::sleep(config.poll_interval);
            continue;
        }

        let wanted = available.min(chunk.len());
        let read = data_port
            .read_available(&mut chunk[..wanted])
            .map_err(|err| transport_error("data port", err))?;
        if read == 0 {
            continue;
        }

        assembler.push_bytes(&chunk[..read]);
        for frame in assembler.poll() {
            for target in &frame.targets {
                forwarder.forward(target);
            }
        }
    }

    if forwarder.pending() > 0 {
        warn!(
            undelivered = forwarder.pending(),
            "exiting with records still queued for the sink"
        );
    }
    info!(
        frames = assembler.frames_decoded(),
        resyncs = assembler.resyncs(),
        "capture loop stopped"
    );
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
