use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use docx_extract::config::{init_default_config, ResolvedConfig, CONFIG_ENV, CONFIG_FILENAME};
use docx_extract::extract::{extract, write_elements_json};
use docx_extract::preview::preview;
use docx_extract::progress::ConsoleProgress;
use docx_extract::Error;

#[derive(Parser, Debug)]
#[command(name = "docx-extract")]
#[command(about = "Extract paragraphs and tables from a .docx in document order", long_about = None)]
struct Args {
    /// Input .docx (default: config `input.path`, then data/ifrs16.docx)
    #[arg(value_name = "DOCX")]
    input: Option<PathBuf>,

    /// Config file path (default: $DOCX_EXTRACT_CONFIG, then docx-extract.toml upwards)
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Number of elements to preview
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Characters of content shown per previewed element
    #[arg(long, value_name = "N")]
    max_chars: Option<usize>,

    /// Also write every extracted element to this JSON file
    #[arg(long, value_name = "JSON")]
    json: Option<PathBuf>,

    /// Generate a default config file, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config file when used with --init-config
    #[arg(long)]
    force: bool,

    /// No progress messages on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let progress = ConsoleProgress::new(!args.quiet);

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = ResolvedConfig::from_args(args.input, args.config, args.limit, args.max_chars)
        .with_context(|| format!("load config ({CONFIG_FILENAME} / {CONFIG_ENV})"))?;
    if let Some(p) = cfg.config_path.as_ref().filter(|p| p.exists()) {
        progress.info(format!("config: {}", p.display()));
    }

    if let Err(Error::FileNotFound { path }) = cfg.check_input() {
        let cwd = std::env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        eprintln!("Error: File not found at '{}'", path.display());
        eprintln!("Current working directory: {cwd}");
        return Ok(ExitCode::FAILURE);
    }

    progress.info(format!("reading {}", cfg.input.display()));
    let elements = extract(&cfg.input)?;
    progress.extracted(&elements);

    if let Some(json) = args.json.as_ref() {
        write_elements_json(&elements, json)?;
        progress.info(format!("wrote {} elements to {}", elements.len(), json.display()));
    }

    for line in preview(&elements, cfg.limit, cfg.max_chars) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}
