use radarcast_engine::{FrameAssembler, DEFAULT_MAX_RESERVOIR};
use tracing::info;

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let capture = std::fs::read(&args.file).map_err(|err| io_error("reading capture", err))?;

    let mut assembler = FrameAssembler::new(DEFAULT_MAX_RESERVOIR.max(capture.len()));
    let chunk_size = args.chunk_size.unwrap_or(capture.len()).max(1);

    let mut frames = 0usize;
    let mut targets = 0usize;
    for chunk in capture.chunks(chunk_size) {
        assembler.push_bytes(chunk);
        for frame in assembler.poll() {
            frames += 1;
            targets += frame.targets.len();
            print_frame(&frame, format);
        }
    }

    info!(
        frames,
        targets,
        trailing = assembler.pending_bytes(),
        "capture decoded"
    );

    if frames == 0 {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}
