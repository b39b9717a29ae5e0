mod fetch;
mod model;
mod review;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use fetch::{fetch_page_text, validate_url};
use model::{build_prompt, find_model, model_search_dirs, print_download_instructions, LlamaCli};
use review::review_suggestion;

const RULER_WIDTH: usize = 70;

#[derive(Parser, Debug)]
#[command(name = "extract_deadlines")]
#[command(about = "Draft conference deadline entries from a website using a local LLM")]
struct Args {
    /// Conference website to analyze (e.g. https://neurips.cc)
    #[arg(required_unless_present = "download_model")]
    url: Option<String>,

    /// Show where to download a suitable GGUF model and exit
    #[arg(long)]
    download_model: bool,

    /// Use a specific GGUF model file instead of searching ./models, ~/.cache/llama-models and ./
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// llama.cpp CLI used to run the model
    #[arg(long, env = "LLAMA_CLI", default_value = "llama-cli")]
    llama_bin: String,
}

/// Where the run stopped; each prints its own hint
#[derive(Debug)]
enum Failure {
    NoModel(Option<PathBuf>),
    Fetch(anyhow::Error),
    Extraction(anyhow::Error),
}

impl Failure {
    fn report(&self) {
        match self {
            Failure::NoModel(path) => {
                match path {
                    Some(path) => eprintln!("Error: model file not found: {}", path.display()),
                    None => eprintln!("Error: No GGUF model found."),
                }
                eprintln!();
                eprintln!("Run: extract_deadlines --download-model");
                eprintln!("to see download instructions.");
            }
            Failure::Fetch(e) => {
                eprintln!("Error fetching webpage: {:#}", e);
            }
            Failure::Extraction(e) => {
                eprintln!("Error extracting with LLM: {:#}", e);
                eprintln!();
                eprintln!("Fallback: search the page manually for these keywords:");
                eprintln!("  deadline, submission, abstract, paper, camera-ready");
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the suggestion
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    if args.download_model {
        print_download_instructions();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            failure.report();
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Failure> {
    let model_path = match args.model_path {
        Some(path) if path.is_file() => path,
        Some(path) => return Err(Failure::NoModel(Some(path))),
        None => find_model(&model_search_dirs()).ok_or(Failure::NoModel(None))?,
    };
    info!("Using model {}", model_path.display());

    let raw_url = args
        .url
        .ok_or_else(|| Failure::Fetch(anyhow::anyhow!("a conference URL is required")))?;

    let url = validate_url(&raw_url).map_err(Failure::Fetch)?;
    let page_text = fetch_page_text(&url).await.map_err(Failure::Fetch)?;
    info!("Extracted {} characters of page text", page_text.chars().count());

    let llama = LlamaCli::locate(&args.llama_bin).map_err(Failure::Extraction)?;
    let prompt = build_prompt(url.as_str(), &page_text);
    let suggestion = llama
        .complete(&model_path, &prompt)
        .map_err(Failure::Extraction)?;

    let ruler = "=".repeat(RULER_WIDTH);
    println!();
    println!("{}", ruler);
    println!("SUGGESTED YAML (review before adding to data/conferences.yaml):");
    println!("{}", ruler);
    println!("{}", suggestion);
    println!("{}", ruler);

    let warnings = review_suggestion(&suggestion);
    if warnings.is_empty() {
        println!("\nThe suggestion parses and every date is well formed.");
    } else {
        println!("\nReview warnings:");
        for warning in &warnings {
            warn!("{}", warning);
            println!("  - {}", warning);
        }
    }

    println!("\nNote: LLM output may need manual review and correction.");
    println!("Check dates carefully against the website before adding them.");

    Ok(())
}
