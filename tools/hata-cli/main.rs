use clap::{Parser, Subcommand};
use hata::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Compile, decompile and validate flagd feature-flag documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log compiler activity (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a flag draft JSON file into an engine document
    Compile {
        /// Path to the flag draft JSON file
        draft_path: String,
        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
        /// Print the save request body instead of the document
        #[arg(long)]
        save_body: bool,
    },
    /// Read an engine document (or a single flag) back into flag drafts
    Decompile {
        /// Path to the document or flag JSON file
        document_path: String,
        /// Flag key to use when the file holds a single flag
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Validate an engine document
    Validate {
        /// Path to the document JSON file
        document_path: String,
        /// Treat the input as a flag draft and compile it first
        #[arg(long)]
        draft: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            draft_path,
            pretty,
            save_body,
        } => run_compile(&draft_path, pretty, save_body),
        Command::Decompile { document_path, key } => run_decompile(&document_path, key),
        Command::Validate {
            document_path,
            draft,
        } => run_validate(&document_path, draft),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("hata=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compile(draft_path: &str, pretty: bool, save_body: bool) {
    let draft: FlagDraft = read_json(draft_path);

    if save_body {
        let body = SaveFlagRequest::from_draft(&draft)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        print_json(&body, pretty);
        return;
    }

    let document = compile(&draft).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    print_json(&document, pretty);
}

fn run_decompile(document_path: &str, key: Option<String>) {
    let value = load_json(document_path).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let drafts = if value.get("flags").is_some() {
        let document = EngineDocument::from_value(value).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read '{}' as a flag document: {}", document_path, e))
        });
        decompile_document(&document)
    } else {
        let key = key.unwrap_or_else(|| file_stem(document_path));
        let draft = decompile_value(&value, &key)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        vec![draft]
    };

    print_json(&drafts, true);
}

fn run_validate(document_path: &str, as_draft: bool) {
    let report = match load_json(document_path) {
        Ok(value) if as_draft => match serde_json::from_value::<FlagDraft>(value) {
            Ok(draft) => validate_draft(&draft),
            Err(e) => ValidationReport::failure(format!("JSON error: {}", e)),
        },
        Ok(value) => validate(&value),
        Err(DocumentError::JsonParseError(message)) => {
            ValidationReport::failure(format!("JSON error: {}", message))
        }
        Err(e) => exit_with_error(&e.to_string()),
    };

    if report.valid {
        println!("Valid");
        return;
    }
    println!("Invalid");
    for error in &report.errors {
        println!("  -> {}", error);
    }
    std::process::exit(1);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let value = load_json(path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    serde_json::from_value(value)
        .unwrap_or_else(|e| exit_with_error(&format!("JSON error in '{}': {}", path, e)))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with_error(&format!("Failed to render output: {}", e)),
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
