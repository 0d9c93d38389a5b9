//! Import a PDF or DOCX file and print the editor HTML
//!
//! Usage:
//!   cargo run --release --bin import_document -- contract.pdf
//!   cargo run --release --bin import_document -- brief.docx --json --target
//!   cargo run --release --bin import_document -- scan.bin --mime application/pdf --config import.json
//!
//! `--json` prints the dual-language snapshot after importing into the
//! source buffer (or the target buffer with `--target`).
//! Set `RUST_LOG=debug` for per-page diagnostics.

use bilingual_import::editor::{
    DualLanguageEditor, LanguageSlot, MemorySurface, Notification, UiLanguage,
};
use bilingual_import::{DocumentFormat, DocumentTextExtractor, Error, ImportConfig};
use std::fs;
use std::path::PathBuf;
use std::process;

const USAGE: &str =
    "Usage: import_document <file> [--mime TYPE] [--config FILE] [--json] [--target]";

struct CliArgs {
    input: PathBuf,
    mime: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    slot: LanguageSlot,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut mime = None;
        let mut config = None;
        let mut json = false;
        let mut slot = LanguageSlot::Source;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--mime" => {
                    i += 1;
                    mime = Some(args.get(i).ok_or("--mime needs a value")?.clone());
                },
                "--config" => {
                    i += 1;
                    config = Some(PathBuf::from(args.get(i).ok_or("--config needs a value")?));
                },
                "--json" => json = true,
                "--target" => slot = LanguageSlot::Target,
                "--help" | "-h" => return Err(USAGE.to_string()),
                arg if arg.starts_with("--") => return Err(format!("Unknown option {}", arg)),
                arg => {
                    if input.is_some() {
                        return Err("Only one input file is accepted".to_string());
                    }
                    input = Some(PathBuf::from(arg));
                },
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or_else(|| USAGE.to_string())?,
            mime,
            config,
            json,
            slot,
        })
    }

    fn mime_type(&self) -> Result<String, Error> {
        if let Some(mime) = &self.mime {
            return Ok(mime.clone());
        }
        DocumentFormat::from_path(&self.input)
            .map(|format| format.mime_type().to_string())
            .ok_or_else(|| Error::UnsupportedFormat(self.input.display().to_string()))
    }
}

fn run(args: &CliArgs) -> Result<String, Error> {
    let config = match &args.config {
        Some(path) => ImportConfig::from_file(path)?,
        None => ImportConfig::default(),
    };
    let mime = args.mime_type()?;
    let bytes = fs::read(&args.input)?;
    let extractor = DocumentTextExtractor::with_config(config);

    if !args.json {
        return Ok(extractor.extract(&bytes, &mime)?.into_html());
    }

    let mut editor = DualLanguageEditor::new(MemorySurface::new(), MemorySurface::new());
    editor.import(args.slot, &extractor, &bytes, &mime)?;
    Ok(serde_json::to_string_pretty(&editor.snapshot())?)
}

fn main() {
    env_logger::init();

    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        },
    };

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            let note = Notification::from_error(&e, UiLanguage::English);
            eprintln!("{:?}: {}", note.severity, note.message);
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    }
}
