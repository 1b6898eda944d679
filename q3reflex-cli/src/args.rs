//! Command line handling

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::warn;
use q3reflex_levels::convert::DEFAULT_TESS_FACTOR;
use q3reflex_levels::geometry::{MAX_TESS_FACTOR, MIN_TESS_FACTOR};
use q3reflex_levels::{ConversionSettings, ConversionSettingsBuilder, ExportFlags};

pub const USAGE: &str = "usage: q3reflex <input.map> <output.map> [-nopatches] [-noclip] \
                         [-notrigger] [-allcaulk] [-tessfactor 1-7] [-dumpjson <file>] [-verbose]";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: ConversionSettings,
    pub dump_json: Option<PathBuf>,
}

/// Whether `-verbose` was given. Checked before the logger exists.
pub fn wants_verbose(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| a == "-verbose")
}

/// Parse the arguments, including the program name.
/// Unknown switches and out of range tessellation factors are ignored with a warning.
pub fn parse_args(args: &[String]) -> Result<Args> {
    let (input, output) = match args {
        [_, input, output, ..] => (PathBuf::from(input), PathBuf::from(output)),
        _ => return Err(anyhow!(USAGE)),
    };

    let mut flags = ExportFlags::empty();
    let mut tess_factor = DEFAULT_TESS_FACTOR;
    let mut dump_json = None;

    let mut rest = args[3..].iter().peekable();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-nopatches" => flags |= ExportFlags::NO_PATCHES,
            "-noclip" => flags |= ExportFlags::NO_CLIP,
            "-notrigger" => flags |= ExportFlags::NO_TRIGGER,
            "-allcaulk" => flags |= ExportFlags::ALL_CAULK,
            // already handled by `wants_verbose`
            "-verbose" => {}
            "-tessfactor" => {
                // only a number is taken as the value, anything else is the next switch
                let value = rest.peek().and_then(|n| n.parse::<u32>().ok());
                if value.is_some() {
                    rest.next();
                }

                match value {
                    Some(n) if (MIN_TESS_FACTOR..=MAX_TESS_FACTOR).contains(&n) => {
                        tess_factor = n
                    }
                    _ => warn!(
                        "-tessfactor needs a number from {} to {}, using {}",
                        MIN_TESS_FACTOR, MAX_TESS_FACTOR, tess_factor
                    ),
                }
            }
            "-dumpjson" => match rest.next() {
                Some(path) => dump_json = Some(PathBuf::from(path)),
                None => warn!("-dumpjson needs a file name"),
            },
            other => warn!("Ignoring unknown switch {}", other),
        }
    }

    let settings = ConversionSettingsBuilder::default()
        .tess_factor(tess_factor)
        .flags(flags)
        .build()
        .map_err(|e| anyhow!("{}", e))?;

    Ok(Args {
        input,
        output,
        settings,
        dump_json,
    })
}

#[cfg(test)]
fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn too_few_args() {
    assert!(parse_args(&args(&["q3reflex", "in.map"])).is_err());
}

#[test]
fn defaults() {
    let parsed = parse_args(&args(&["q3reflex", "in.map", "out.map"])).unwrap();

    assert_eq!(parsed.input, PathBuf::from("in.map"));
    assert_eq!(parsed.output, PathBuf::from("out.map"));
    assert_eq!(parsed.settings, ConversionSettings::default());
    assert_eq!(parsed.dump_json, None);
}

#[test]
fn switches() {
    let parsed = parse_args(&args(&[
        "q3reflex",
        "in.map",
        "out.map",
        "-noclip",
        "-allcaulk",
        "-tessfactor",
        "5",
        "-dumpjson",
        "out.json",
        "-verbose",
    ]))
    .unwrap();

    assert_eq!(
        parsed.settings.flags,
        ExportFlags::NO_CLIP | ExportFlags::ALL_CAULK
    );
    assert_eq!(parsed.settings.tess_factor, 5);
    assert_eq!(parsed.dump_json, Some(PathBuf::from("out.json")));
}

#[test]
fn out_of_range_tess_factor_ignored() {
    let parsed = parse_args(&args(&["q3reflex", "a", "b", "-tessfactor", "9", "-nopatches"]))
        .unwrap();

    assert_eq!(parsed.settings.tess_factor, DEFAULT_TESS_FACTOR);
    assert_eq!(parsed.settings.flags, ExportFlags::NO_PATCHES);
}

#[test]
fn tess_factor_without_value_keeps_next_switch() {
    let parsed = parse_args(&args(&["q3reflex", "a", "b", "-tessfactor", "-noclip"])).unwrap();

    assert_eq!(parsed.settings.tess_factor, DEFAULT_TESS_FACTOR);
    assert_eq!(parsed.settings.flags, ExportFlags::NO_CLIP);

    let parsed = parse_args(&args(&["q3reflex", "a", "b", "-tessfactor"])).unwrap();
    assert_eq!(parsed.settings.tess_factor, DEFAULT_TESS_FACTOR);
}

#[test]
fn verbose_is_seen_anywhere() {
    assert!(wants_verbose(&args(&["q3reflex", "a", "b", "-noclip", "-verbose"])));
    assert!(!wants_verbose(&args(&["q3reflex", "a", "b"])));
}
