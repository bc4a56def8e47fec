mod folder_scanner;

use std::{fs::OpenOptions, io, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use env_logger::{Env, Target};
use log::info;

use crate::folder_scanner::{
    fixup::ScriptType,
    hasher::HashAlgorithm,
    ignore_list::IgnoreList,
    output::{output_error, Outputs},
    pipeline::Pipeline,
    progress::ConsoleProgress,
};

#[cfg(windows)]
const DEFAULT_SCRIPT: &str = "rm.bat";
#[cfg(not(windows))]
const DEFAULT_SCRIPT: &str = "rm.sh";

/// Find duplicate files and write a script that removes the extra copies.
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// Folders to scan
    #[arg(required = true)]
    folders: Vec<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    report: Option<PathBuf>,

    /// Append log records to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,

    /// Removal script path
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    script: PathBuf,

    /// Removal script syntax, detected from the platform by default
    #[arg(long, value_enum)]
    script_type: Option<ScriptType>,

    /// Hash algorithm: md5, sha1, sha256 or sha512
    #[arg(long, default_value = "md5", value_parser = HashAlgorithm::from_str)]
    hash: HashAlgorithm,

    /// Glob mask of files to leave out, may be repeated
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Match ignore masks against the whole path instead of the file name
    #[arg(long)]
    match_path: bool,

    /// Print phase counters and log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Do not show progress
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let level = if args.verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level));
    if let Some(path) = &args.log {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| output_error("log", path, source))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let ignore = IgnoreList::new(args.ignore.as_slice(), args.match_path)?;

    info!("Input folders {:?}", args.folders);
    info!("Hash algorithm: {}", args.hash);

    let mut pipeline = Pipeline::new(&args.hash, &ignore);
    if !args.quiet {
        pipeline = pipeline.with_observer(Box::new(ConsoleProgress::new()));
    }
    let duplicates = pipeline.run(args.folders.as_slice());
    let progress = pipeline.progress();
    info!(
        "Scanned {} files, {} partially hashed, {} fully hashed",
        progress.scanned, progress.partial_hashed, progress.full_hashed
    );
    if duplicates.is_empty() {
        info!("No duplicates found");
    }

    let outputs = Outputs {
        report: args.report,
        script: args.script,
        script_type: args.script_type.unwrap_or_else(ScriptType::detect),
    };
    let diagnostics = args.verbose.then(|| pipeline.diagnostics());
    outputs.write(&duplicates, diagnostics, &mut io::stdout().lock())?;

    info!("Exiting...");
    Ok(())
}
