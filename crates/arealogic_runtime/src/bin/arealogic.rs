//! arealogic CLI entry point.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use arealogic_debug::{Tracer, TracerConfig};
use arealogic_foundation::Error;
use arealogic_language::{
    AreaTable, CompileOptions, compile_with_sink, extract_events, extract_quests,
    extract_regions,
};
use arealogic_runtime::{LogicBundle, render_dump, render_names, save_to_file};

/// CLI configuration parsed from arguments.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    areas: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    // Debug flags
    trace: bool,
    json: bool,
    dump: bool,
    extract: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn path_value(args: &[String], i: usize, flag: &str) -> Result<PathBuf, String> {
    args.get(i)
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--trace" => config.trace = true,
            "--json" => config.json = true,
            "--dump" => config.dump = true,
            "--extract" => config.extract = true,
            "-o" | "--output" => {
                i += 1;
                config.output = Some(path_value(args, i, "--output")?);
            }
            "--areas" => {
                i += 1;
                config.areas = Some(path_value(args, i, "--areas")?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            path => {
                if config.input.is_some() {
                    return Err(format!("unexpected argument: {path}"));
                }
                config.input = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("arealogic {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(input) = &config.input else {
        return Err("no input file given (try --help)".into());
    };
    let source = read_text(input)?;
    let source_name = input.display().to_string();
    let in_input = |e: Error| e.in_source(&source_name);

    if config.extract {
        let events = extract_events(&source).map_err(in_input)?;
        let quests = extract_quests(&source).map_err(in_input)?;
        let regions = extract_regions(&source).map_err(in_input)?;
        print!("{}", render_names("Events", &events));
        print!("{}", render_names("Quests", &quests));
        print!("{}", render_names("Regions", &regions));
    }

    let areas = match &config.areas {
        Some(path) => AreaTable::parse(&read_text(path)?)
            .map_err(|e| e.in_source(path.display().to_string()))?,
        None => AreaTable::default(),
    };

    let mut tracer_config = TracerConfig::new();
    if config.trace {
        tracer_config = tracer_config.enabled().to_stderr();
    }
    if config.json {
        tracer_config = tracer_config.json();
    }
    let (logic, tracer) =
        compile_with_sink(&source, CompileOptions::default(), Tracer::new(tracer_config))
            .map_err(in_input)?;

    if config.trace {
        let stats = tracer.stats();
        eprintln!(
            "\x1b[33mTraced {} events ({} evicted)\x1b[0m",
            stats.record_count, stats.evicted
        );
    }

    let bundle = LogicBundle::new(logic, areas);

    if config.dump {
        print!("{}", render_dump(&bundle)?);
    }

    if let Some(output) = &config.output {
        save_to_file(&bundle, output)?;
        eprintln!(
            "Wrote {} rules to {}",
            bundle.logic.rules.len(),
            output.display()
        );
    }

    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1marealogic\x1b[0m - Area graph to access rule compiler

\x1b[1mUSAGE:\x1b[0m
    arealogic [OPTIONS] FILE

\x1b[1mARGUMENTS:\x1b[0m
    FILE               Area document to compile

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -o, --output PATH  Write compiled logic as MessagePack
    --areas PATH       Read area thresholds from PATH
    --dump             Print compiled rules and tables
    --extract          Print event, quest and region names

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace            Print compile events to stderr
    --json             Print trace events as JSON

\x1b[1mEXAMPLES:\x1b[0m
    arealogic areas.wotw --dump
    arealogic areas.wotw -o logic.msgpack
    arealogic --trace --json areas.wotw"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("arealogic")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_flags_and_paths() {
        let config = parse_args(&args(&[
            "areas.wotw",
            "-o",
            "out.msgpack",
            "--areas",
            "thresholds.txt",
            "--trace",
            "--json",
            "--dump",
        ]))
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("areas.wotw")));
        assert_eq!(config.output, Some(PathBuf::from("out.msgpack")));
        assert_eq!(config.areas, Some(PathBuf::from("thresholds.txt")));
        assert!(config.trace && config.json && config.dump);
        assert!(!config.extract);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["a.wotw", "b.wotw"])).is_err());
        assert!(parse_args(&args(&["a.wotw", "--output"])).is_err());
    }

    #[test]
    fn compile_errors_name_the_input() {
        let path = std::env::temp_dir().join("arealogic_cli_bad_enemy.wotw");
        fs::write(&path, "anchor A.Main:\n  conn A.Exit:\n    moki: Combat=Dragon\n").unwrap();

        let err = run(args(&[path.to_str().unwrap()])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&format!("in {} line 3", path.display())), "{message}");
        assert!(message.starts_with("unknown enemy: Dragon"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn help_and_version() {
        let config = parse_args(&args(&["-h", "-V"])).unwrap();
        assert!(config.show_help);
        assert!(config.show_version);
        assert_eq!(config.input, None);
    }
}
