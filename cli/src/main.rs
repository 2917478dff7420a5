//! pdfoutline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, FileStatus};
use pdfoutline::{extract_outline_file, to_json, JsonFormat, OutlineOptions};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract heading outlines from PDF files as JSON", long_about = None)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT", default_value = "./input")]
    input: PathBuf,

    /// Directory to write JSON outlines to
    #[arg(value_name = "OUTPUT", default_value = "./output")]
    output: PathBuf,

    #[command(flatten)]
    flags: Flags,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Flags {
    /// Skip pages whose text cannot be extracted instead of failing the file
    #[arg(long, global = true)]
    lenient: bool,

    /// Disable literal phrase repairs in heading text
    #[arg(long, global = true)]
    no_phrase_table: bool,

    /// Write compact JSON
    #[arg(long, global = true)]
    compact: bool,
}

impl Flags {
    fn options(&self) -> OutlineOptions {
        let mut options = OutlineOptions::new();
        if self.lenient {
            options = options.lenient();
        }
        if self.no_phrase_table {
            options = options.without_phrases();
        }
        if self.compact {
            options = options.with_json_format(JsonFormat::Compact);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory (default)
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT", default_value = "./input")]
        input: PathBuf,

        /// Directory to write JSON outlines to
        #[arg(value_name = "OUTPUT", default_value = "./output")]
        output: PathBuf,
    },

    /// Extract the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = cli.flags.options();

    let result = match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(&input, &output, &options),
        Some(Commands::File { input, output }) => cmd_file(&input, output.as_deref(), &options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, &options),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(pdfoutline::Error::InputDirMissing(input.to_path_buf()).into());
    }
    fs::create_dir_all(output)?;

    let total = batch::collect_pdf_files(input)?.len();
    log::info!(
        "Batch run: {} -> {} ({} PDF files)",
        input.display(),
        output.display(),
        total
    );
    if total == 0 {
        println!("{} in {}", "No PDF files found".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::process_directory_with(input, output, options, |path, status| {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if let FileStatus::Failed(e) = status {
            pb.println(format!("{} {}: {}", "Failed".red(), name, e));
        }
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} written, {} failed",
        "Outlines:".green().bold(),
        report.written.len(),
        report.failed.len()
    );
    for path in &report.written {
        println!("  {} {}", "├─".dimmed(), path.display());
    }

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Extracting outline of {}", input.display());
    let outline = extract_outline_file(input, options)?;
    let json = to_json(&outline, options.json_format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
}
