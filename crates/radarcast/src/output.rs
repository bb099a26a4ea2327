use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use radarcast_engine::{format_record, DecodedFrame};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct TargetOutput {
    frame: u32,
    subframe: u32,
    id: u32,
    position: [f32; 3],
    velocity: [f32; 3],
    acceleration: [f32; 3],
}

/// Print a decoded frame's targets in the selected format.
///
/// `Raw` prints exactly the records the sink would receive, one per line.
pub fn print_frame(frame: &DecodedFrame, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for target in &frame.targets {
                let out = TargetOutput {
                    frame: frame.header.frame_number,
                    subframe: frame.header.subframe_index,
                    id: target.id,
                    position: target.position,
                    velocity: target.velocity,
                    acceleration: target.acceleration,
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            if frame.targets.is_empty() {
                return;
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "ID", "POSITION", "VELOCITY", "ACCELERATION"]);
            for target in &frame.targets {
                table.add_row(vec![
                    frame.header.frame_number.to_string(),
                    target.id.to_string(),
                    vec3(target.position),
                    vec3(target.velocity),
                    vec3(target.acceleration),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Raw => {
            for target in &frame.targets {
                println!("{}", format_record(target));
            }
        }
    }
}

fn vec3(v: [f32; 3]) -> String {
    format!("({:.2}, {:.2}, {:.2})", v[0], v[1], v[2])
}
