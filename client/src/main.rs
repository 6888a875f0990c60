use anagram_client::{offline_backends, online_backends, ClientConfig, Command, Composer, Repl};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anagram")]
#[command(about = "Compose anagrams of a reference phrase", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the web service root
    #[arg(long)]
    base_url: Option<String>,

    /// Override the language tag used for hints and settings
    #[arg(long)]
    lang: Option<String>,

    /// Keep everything local (redb store, no hints)
    #[arg(long)]
    offline: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_toml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(lang) = &cli.lang {
        config.base.language_tag = lang.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let backends = if cli.offline {
        offline_backends(config.base()).context("opening local stores")?
    } else {
        online_backends(&config).context("setting up the web client")?
    };
    info!(offline = cli.offline, lang = %config.base.language_tag, "starting");

    let composer = Composer::with_config(config.base());
    let mut repl = Repl::new(composer, backends, config.base.language_tag.clone());

    println!("anagram: type :ref <phrase> to start, :help for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let cmd = match Command::parse(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                warn!(%line, "rejected input");
                println!("  {msg}");
                continue;
            }
        };
        let Some(out) = repl.execute(cmd) else {
            break;
        };
        for l in out {
            writeln!(stdout, "  {l}")?;
        }
        stdout.flush()?;
    }

    let unsaved = repl.composer().session().saved_count();
    if unsaved > 0 {
        println!("  {unsaved} saved composition(s) were not persisted");
    }
    Ok(())
}
