use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use soapnote_pdf::model::{FieldKind, FieldValue};

#[derive(Parser)]
#[command(version, about = "Generate a fillable acupuncture SOAP note PDF")]
struct Cli {
    /// Intermediate PDF holding the static page
    #[arg(long, default_value = soapnote_pdf::DEFAULT_BASE_PDF)]
    base: PathBuf,

    /// Final fillable PDF
    #[arg(short, long, default_value = soapnote_pdf::DEFAULT_OUTPUT_PDF)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the interactive form fields of a PDF
    Fields { pdf: PathBuf },
}

fn list_fields(pdf: &Path) -> Result<(), soapnote_pdf::Error> {
    let fields = soapnote_pdf::read_fields(pdf)?;
    for f in &fields {
        let kind = match f.kind {
            FieldKind::Text { multiline: true } => "text (multi-line)",
            FieldKind::Text { multiline: false } => "text",
            FieldKind::Checkbox => "checkbox",
        };
        let value = match &f.default {
            FieldValue::Text(s) => format!("{s:?}"),
            FieldValue::Checked(true) => "on".to_string(),
            FieldValue::Checked(false) => "off".to_string(),
        };
        println!(
            "{:<40} {:<18} {:<8} [{:.0} {:.0} {:.0} {:.0}]",
            f.name, kind, value, f.rect.x1, f.rect.y1, f.rect.x2, f.rect.y2
        );
    }
    println!("{} fields", fields.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Command::Fields { pdf }) => list_fields(pdf),
        None => soapnote_pdf::generate(&cli.base, &cli.output).map(|()| {
            println!("Created: {}", cli.output.display());
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
