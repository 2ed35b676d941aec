//! reportml CLI - board report parsing and export tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use reportml::{ExportOptions, JsonFormat, ParseOptions, Reportml, SectionKind};

#[derive(Parser)]
#[command(name = "reportml")]
#[command(version)]
#[command(about = "Parse board reports and export HTML and JSON", long_about = None)]
struct Cli {
    /// Input report file (Markdown-ish text), or '-' for stdin
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Product name used in titles and filenames
    #[arg(long, default_value = "Boardroom")]
    product: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a report as self-contained HTML
    Html {
        /// Input report file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (timestamped name in cwd if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Product name used in the title and filename
        #[arg(long, default_value = "Boardroom")]
        product: String,

        /// Parse sections in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Serialize a parsed report as JSON
    Json {
        /// Input report file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show report structure information
    Info {
        /// Input report file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            product,
            parallel,
        }) => cmd_html(&input, output.as_deref(), &product, parallel),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => {
            if let Some(input) = cli.input {
                cmd_html(&input, cli.output.as_deref(), &cli.product, false)
            } else {
                println!("{}", "Usage: reportml <FILE> [OUTPUT]".yellow());
                println!("       reportml --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if input == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    product: &str,
    parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;

    let mut builder = Reportml::new().with_product(product);
    if parallel {
        builder = builder.parallel();
    }
    let result = builder.parse(&raw);

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(reportml::render::export_filename(
            &ExportOptions::default().with_product(product),
            chrono::Local::now(),
        )),
    };

    fs::write(&path, result.to_html())?;

    let doc = result.document();
    println!(
        "{} {} ({} sections{})",
        "Exported".green().bold(),
        path.display(),
        doc.section_count(),
        if doc.truncated { ", truncated" } else { "" },
    );
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let doc = reportml::parse_report_with_options(&raw, ParseOptions::new());

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = reportml::render::to_json(&doc, format)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let doc = reportml::parse_report(&raw);

    println!("{}", "Report".cyan().bold());
    println!("  Source:    {} chars", doc.source_len);
    println!("  Sections:  {}", doc.section_count());
    println!("  Truncated: {}", doc.truncated);
    println!();

    for section in &doc.sections {
        let kind = kind_tag(section.kind);
        let title = section.title.as_deref().unwrap_or("(untitled)");
        println!(
            "  {:<12} {:<18} {} ({} blocks)",
            section.id.dimmed(),
            kind,
            title,
            section.blocks.len()
        );
    }
    Ok(())
}

fn kind_tag(kind: SectionKind) -> String {
    let label = kind.label();
    match kind {
        SectionKind::ExecutiveSummary => label.blue().to_string(),
        SectionKind::KeyFindings => label.green().to_string(),
        SectionKind::DeepDive => label.magenta().to_string(),
        SectionKind::RoastAndGold => label.yellow().to_string(),
        SectionKind::Transcript => label.cyan().to_string(),
        SectionKind::Generic => label.normal().to_string(),
    }
}
