use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use preview::{Config, Error};

#[derive(Parser)]
#[command(name = "preview", version)]
#[command(about = "Render generated deployment markdown for preview")]
struct Cli {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Output file (text formats default to stdout, PDF to the input name with .pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "preview.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Svg,
    /// The parsed document model as JSON
    Blocks,
}

fn main() {
    let cli = Cli::parse();

    // --verbose forces debug, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = Config::load(&cli.config)?;
    let markdown = read_input(&cli.input)?;
    tracing::debug!(bytes = markdown.len(), format = ?cli.format, "Rendering");

    match cli.format {
        Format::Html => {
            let html = preview::markdown_to_html_with_config(&markdown, &config);
            write_text(cli.output.as_deref(), &html)
        }
        Format::Typst => {
            let typst = preview::markdown_to_typst_with_config(&markdown, &config);
            write_text(cli.output.as_deref(), &typst)
        }
        Format::Blocks => {
            let blocks = preview::segment(&markdown);
            let mut json = serde_json::to_string_pretty(&blocks)?;
            json.push('\n');
            write_text(cli.output.as_deref(), &json)
        }
        Format::Pdf => {
            let pdf_bytes = preview::markdown_to_pdf_with_config(&markdown, &config)?;
            let output = output_path(cli, "pdf");
            fs::write(&output, pdf_bytes)?;
            println!("Created {}", output.display());
            Ok(())
        }
        Format::Svg => {
            let doc = preview::markdown_to_svg_with_config(&markdown, &config)?;
            let base = output_path(cli, "svg");
            let stem = base
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "preview".to_string());

            for (index, page) in doc.pages.iter().enumerate() {
                let path = base.with_file_name(format!("{stem}-{}.svg", index + 1));
                fs::write(&path, page)?;
                println!("Created {}", path.display());
            }
            Ok(())
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, Error> {
    if is_stdin(path) {
        let mut markdown = String::new();
        io::stdin().read_to_string(&mut markdown)?;
        Ok(markdown)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Explicit output path, or the input path with a new extension.
fn output_path(cli: &Cli, extension: &str) -> PathBuf {
    match &cli.output {
        Some(path) => path.clone(),
        None if is_stdin(&cli.input) => PathBuf::from("preview").with_extension(extension),
        None => cli.input.with_extension(extension),
    }
}

fn write_text(output: Option<&Path>, content: &str) -> Result<(), Error> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::debug!(path = %path.display(), "Wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}
