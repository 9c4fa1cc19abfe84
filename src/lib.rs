pub mod export;
pub mod model;
pub mod registry;
pub mod search;
pub mod ui;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::registry::text::fetch_document_text;
use crate::search::SearchState;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "laws-repo-viewer",
    version,
    about = "TUI viewer for a static laws repository with in-text search"
)]
pub struct Cli {
    /// Root directory holding the registry and document text files
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive TUI
    Tui {
        /// Load the registry and first document, then exit (headless-friendly)
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Print the registry entries
    List,
    /// Search one document's text and print match offsets
    Search {
        /// Reference (or title) of the document to search
        reference: String,
        /// Literal query string
        query: String,
    },
    /// Export a document's raw text, byte for byte
    Export {
        /// Reference (or title) of the document to export
        reference: String,
        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui { once } => ui::tui::run_tui(&cli.root, once),
        Commands::List => run_list(&cli.root),
        Commands::Search { reference, query } => run_search(&cli.root, &reference, &query),
        Commands::Export { reference, out_dir } => {
            let out = out_dir.unwrap_or_else(|| PathBuf::from("."));
            run_export(&cli.root, &reference, &out)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "lawv", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn run_list(root: &Path) -> Result<()> {
    let reg = registry::load_registry(root)?;
    println!("{} entries ({})", reg.entries.len(), reg.path.display());
    for entry in &reg.entries {
        println!(
            "{}\t{}\t{}",
            entry.reference.as_deref().unwrap_or("—"),
            entry.title,
            entry.jurisdiction.as_deref().unwrap_or("—"),
        );
    }
    Ok(())
}

fn run_search(root: &Path, reference: &str, query: &str) -> Result<()> {
    let (entry, text) = load_by_reference(root, reference)?;
    let mut state = SearchState::default();
    state.on_query_change(query, &text);
    println!("{} — {}", entry.title, state.status());
    for (idx, span) in state.matches.iter().enumerate() {
        let line = text[..span.start].matches('\n').count() + 1;
        println!("{}: bytes {}..{} (line {line})", idx + 1, span.start, span.end);
    }
    Ok(())
}

fn run_export(root: &Path, reference: &str, out_dir: &Path) -> Result<()> {
    let (entry, text) = load_by_reference(root, reference)?;
    let path = export::export_text(&entry, &text, out_dir)?;
    println!("Exported {} to {}", entry.title, path.display());
    Ok(())
}

fn load_by_reference(root: &Path, reference: &str) -> Result<(model::types::LawEntry, String)> {
    let reg = registry::load_registry(root)?;
    let Some(entry) = registry::find_entry(&reg.entries, reference) else {
        bail!("no registry entry matches {reference:?} (try `lawv list`)");
    };
    let Some(locator) = entry.text_file.as_deref() else {
        bail!(registry::text::FetchError::MissingLocator);
    };
    let text = fetch_document_text(root, locator)?;
    Ok((entry.clone(), text))
}

pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "laws-repo-viewer", "laws-repo-viewer")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".lawv-logs"))
}
