use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::info;

const CONTEXT_SIZE: u32 = 4096;
const THREADS: u32 = 4;
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: &str = "0.3";

/// Generation is cut at the first of these
pub const STOP_SEQUENCES: &[&str] = &["```\n\n", "\n\nNote:"];

pub const DOWNLOAD_INSTRUCTIONS: &str = "\
Recommended models for deadline extraction:

1. Llama 3.2 3B Instruct (recommended, ~2GB)
   https://huggingface.co/bartowski/Llama-3.2-3B-Instruct-GGUF
   File: Llama-3.2-3B-Instruct-Q4_K_M.gguf

2. Llama 3.2 1B Instruct (faster, ~1GB)
   https://huggingface.co/bartowski/Llama-3.2-1B-Instruct-GGUF
   File: Llama-3.2-1B-Instruct-Q4_K_M.gguf

Save the .gguf file to ./models/ and install llama.cpp so that `llama-cli` is on PATH.
Recent llama.cpp builds moved one-shot completion out of `llama-cli`; with those,
pass `--llama-bin llama-completion` (or set LLAMA_CLI=llama-completion).
Then run: extract_deadlines https://conference-url";

pub fn print_download_instructions() {
    println!("{}", DOWNLOAD_INSTRUCTIONS);
}

/// Directories searched for a `.gguf` file when no path is given
pub fn model_search_dirs() -> Vec<PathBuf> {
    let mut search = vec![PathBuf::from("./models")];
    if let Some(home) = dirs::home_dir() {
        search.push(home.join(".cache").join("llama-models"));
    }
    search.push(PathBuf::from("./"));
    search
}

/// First `.gguf` file (by name) in the first directory that has one
pub fn find_model(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs.iter().find_map(|dir| {
        let mut models: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "gguf"))
            .collect();
        models.sort();
        models.into_iter().next()
    })
}

pub fn build_prompt(url: &str, page_text: &str) -> String {
    format!(
        r#"Extract conference deadline information from this webpage.

URL: {url}

Webpage content:
{page_text}

Find:
1. The conference name (short acronym and full name)
2. Submission deadlines (abstract, paper, workshop, ...) as YYYY-MM-DD
3. The conference start date as YYYY-MM-DD

Answer in this YAML format:
```yaml
- name: ACRONYM
  full_name: "Full Name"
  website: "{url}"
  deadlines:
    abstract: "YYYY-MM-DD"
    paper: "YYYY-MM-DD"
  conference_date: "YYYY-MM-DD"
```

Output only the YAML block. Leave out any date you cannot find."#
    )
}

/// Cut generated text at the first stop sequence
pub fn trim_at_stop(output: &str) -> &str {
    STOP_SEQUENCES
        .iter()
        .filter_map(|stop| output.find(stop))
        .min()
        .map_or(output, |end| &output[..end])
}

/// llama.cpp command-line runner
#[derive(Debug, Clone)]
pub struct LlamaCli {
    binary: PathBuf,
}

impl LlamaCli {
    /// Resolve `name` on PATH (or accept it as a direct path)
    pub fn locate(name: &str) -> Result<Self> {
        let binary = which::which(name)
            .with_context(|| format!("`{}` not found. Install llama.cpp or pass --llama-bin", name))?;
        Ok(Self { binary })
    }

    fn args(model: &Path, prompt: &str) -> Vec<String> {
        vec![
            "-m".to_string(),
            model.display().to_string(),
            "-p".to_string(),
            prompt.to_string(),
            "-n".to_string(),
            MAX_TOKENS.to_string(),
            "-c".to_string(),
            CONTEXT_SIZE.to_string(),
            "-t".to_string(),
            THREADS.to_string(),
            "--temp".to_string(),
            TEMPERATURE.to_string(),
            "--no-display-prompt".to_string(),
            "-no-cnv".to_string(),
        ]
    }

    /// Run one completion and return the generated text only
    pub fn complete(&self, model: &Path, prompt: &str) -> Result<String> {
        info!("Loading model from {}", model.display());
        info!("Analyzing with local LLM...");

        let output = Command::new(&self.binary)
            .args(Self::args(model, prompt))
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            bail!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = trim_at_stop(&stdout).trim().to_string();
        if text.is_empty() {
            bail!("Model produced no output");
        }
        Ok(text)
    }
}
