use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::info;

use component_rewriter::{
    init_tracing, run_rewrite, run_split, write_split, Config, RunSummary, SourceBuffer,
};

const DEFAULT_REWRITE_INPUT: &str = "src/components/TruckBay.tsx";
const DEFAULT_SPLIT_INPUT: &str = "src/components/AmbientDetails.tsx";
const DEFAULT_SPLIT_DIR: &str = "src/components/ambient";

fn cli() -> Command {
    Command::new("component-rewriter")
        .version(component_rewriter::VERSION)
        .about("Throttle, memoize and split large TSX component files")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("JSON file overriding the built-in tables")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the run summary as JSON")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("rewrite")
                .about("Inject throttle guards and memoization wrappers")
                .arg(
                    Arg::new("input")
                        .value_name("INPUT")
                        .default_value(DEFAULT_REWRITE_INPUT)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .value_name("OUTPUT")
                        .help("Defaults to INPUT")
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("split")
                .about("Split components into category files")
                .arg(
                    Arg::new("input")
                        .value_name("INPUT")
                        .default_value(DEFAULT_SPLIT_INPUT)
                        .index(1),
                )
                .arg(
                    Arg::new("out_dir")
                        .value_name("OUT_DIR")
                        .default_value(DEFAULT_SPLIT_DIR)
                        .index(2),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    match matches.get_one::<String>("config") {
        Some(path) => Config::load(Path::new(path)).context("loading configuration"),
        None => Ok(Config::default()),
    }
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}

fn path_arg(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.get_one::<String>(id).map(PathBuf::from)
}

fn rewrite(matches: &ArgMatches, config: &Config) -> Result<RunSummary> {
    let input = path_arg(matches, "input").unwrap_or_else(|| PathBuf::from(DEFAULT_REWRITE_INPUT));
    let output = path_arg(matches, "output").unwrap_or_else(|| input.clone());

    let mut buf = SourceBuffer::load(&input)?;
    let summary = run_rewrite(&mut buf, config)?;
    buf.save(&output)?;

    info!(output = %output.display(), "optimization complete");
    Ok(summary)
}

fn split(matches: &ArgMatches, config: &Config) -> Result<RunSummary> {
    let input = path_arg(matches, "input").unwrap_or_else(|| PathBuf::from(DEFAULT_SPLIT_INPUT));
    let out_dir = path_arg(matches, "out_dir").unwrap_or_else(|| PathBuf::from(DEFAULT_SPLIT_DIR));

    let source = SourceBuffer::load(&input)?;
    let (files, summary) = run_split(source.as_str(), config);
    let written = write_split(&out_dir, &files)?;

    info!(written, dir = %out_dir.display(), "split complete");
    Ok(summary)
}

fn main() -> Result<()> {
    init_tracing();

    let matches = cli().get_matches();
    let config = load_config(&matches)?;

    let summary = match matches.subcommand() {
        Some(("rewrite", sub)) => rewrite(sub, &config)?,
        Some(("split", sub)) => split(sub, &config)?,
        _ => unreachable!("subcommand_required"),
    };

    report(&summary, matches.get_flag("json"))
}
