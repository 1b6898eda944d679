//! Converts a Quake 3 .map into a Reflex .map

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::process;

use anyhow::{anyhow, Context, Result};
use log::info;
use q3reflex_levels::{convert, parse_map, reflex};

mod args;
use args::{parse_args, wants_verbose};

/// Which part of the run failed. Decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Usage,
    Input,
    Output,
    Dump,
}

impl Stage {
    fn exit_code(self) -> i32 {
        match self {
            Stage::Input => 1,
            Stage::Output => 2,
            Stage::Usage => 3,
            Stage::Dump => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Usage => "Invalid arguments",
            Stage::Input => "Error reading input map",
            Stage::Output => "Error writing output map",
            Stage::Dump => "Error writing JSON dump",
        })
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", full_error_display(&err));

        let code = err
            .downcast_ref::<Stage>()
            .map_or(1, |stage| stage.exit_code());
        process::exit(code);
    }
}

fn try_main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();

    // Initialise logger
    let level = if wants_verbose(&argv) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_max_level(level)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| anyhow!("Error initialising logger: {}", e))?;

    let args = parse_args(&argv).context(Stage::Usage)?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Couldn't read {}", args.input.display()))
        .context(Stage::Input)?;
    let map = parse_map(&text)
        .with_context(|| format!("Couldn't parse {}", args.input.display()))
        .context(Stage::Input)?;

    let level = convert(&map, &args.settings);

    let file = File::create(&args.output)
        .with_context(|| format!("Couldn't create {}", args.output.display()))
        .context(Stage::Output)?;
    let mut out = BufWriter::new(file);
    reflex::write_map(&mut out, &level).context(Stage::Output)?;
    out.flush().context(Stage::Output)?;
    info!("Wrote {}", args.output.display());

    if let Some(path) = &args.dump_json {
        let file = File::create(path)
            .with_context(|| format!("Couldn't create {}", path.display()))
            .context(Stage::Dump)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &level).context(Stage::Dump)?;
        out.flush().context(Stage::Dump)?;
        info!("Dumped converted geometry to {}", path.display());
    }

    Ok(())
}

/// Displays an error with its chain of causes
fn full_error_display(err: &anyhow::Error) -> String {
    let cont = err
        .chain()
        .skip(1)
        .map(|cause| format!("    caused by: {}", cause))
        .collect::<Vec<String>>()
        .join("\n");

    format!("Error: {}\n{}", err, cont)
}
