//! ns-sybil-report: offline Sybil threat report
//!
//! Replays a network database snapshot through the analysis engine and
//! prints the report as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ns_01_sybil_analysis::{
    ConfigProvider, RouterHash, SnapshotFile, StaticConfigProvider, SybilAnalysisApi,
    SybilAnalysisService, SybilConfig, Timestamp, TomlConfigProvider,
};

/// Floodfill Sybil threat report
#[derive(Parser, Debug)]
#[command(name = "ns-sybil-report")]
#[command(about = "Score floodfills in a network database snapshot for Sybil behaviour")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every heuristic and print the ranked report
    Analyze {
        #[command(flatten)]
        common: CommonArgs,

        /// Also examine this router's routing keys (hex)
        #[arg(long)]
        victim: Option<String>,

        /// Include non-floodfill routers in the address and version heuristics
        #[arg(long)]
        all: bool,

        /// Only print threats at or above the display threshold
        #[arg(long)]
        visible_only: bool,
    },

    /// Track suspects against a victim's routing key over several days
    Timeline {
        #[command(flatten)]
        common: CommonArgs,

        /// Router whose routing key is tracked (hex)
        #[arg(long)]
        victim: String,

        /// Suspect routers (hex). Defaults to every visible threat.
        #[arg(long = "suspect")]
        suspects: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Network database snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Analysis configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Analyze as of this Unix time instead of the snapshot time
    #[arg(long)]
    now: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    match cli.command {
        Command::Analyze {
            common,
            victim,
            all,
            visible_only,
        } => {
            let mut config = load_config(common.config.as_ref())?;
            config.analyze_all_routers |= all;
            let service = build_service(&common, config)?;
            let victim = victim.as_deref().map(parse_hash).transpose()?;

            let report = service.analyze(victim).context("analysis failed")?;
            if visible_only {
                let visible: Vec<_> = report.visible().collect();
                print_json(&visible, common.pretty)
            } else {
                print_json(&report, common.pretty)
            }
        }
        Command::Timeline {
            common,
            victim,
            suspects,
        } => {
            let config = load_config(common.config.as_ref())?;
            let service = build_service(&common, config)?;
            let victim = parse_hash(&victim)?;

            let suspects = if suspects.is_empty() {
                let report = service.analyze(Some(victim)).context("analysis failed")?;
                let hashes: Vec<RouterHash> = report.visible().map(|t| t.hash).collect();
                if hashes.is_empty() {
                    warn!("No visible threats to track");
                }
                hashes
            } else {
                suspects
                    .iter()
                    .map(|s| parse_hash(s))
                    .collect::<Result<Vec<_>>>()?
            };

            let days = service
                .victim_timeline(victim, &suspects)
                .context("timeline failed")?;
            print_json(&days, common.pretty)
        }
    }
}

fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SybilConfig> {
    let config = match path {
        Some(path) => TomlConfigProvider::load(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .get_sybil_config(),
        None => StaticConfigProvider::new().get_sybil_config(),
    };
    Ok(config)
}

fn build_service(common: &CommonArgs, config: SybilConfig) -> Result<SybilAnalysisService> {
    let snapshot = SnapshotFile::load(&common.snapshot)
        .with_context(|| format!("loading snapshot {}", common.snapshot.display()))?;
    info!(
        "Loaded snapshot with {} routers, {} profiles",
        snapshot.routers.len(),
        snapshot.profiles.len()
    );
    let deps = snapshot.into_collaborators(common.now.map(Timestamp::new));
    Ok(SybilAnalysisService::new(config, deps))
}

fn parse_hash(s: &str) -> Result<RouterHash> {
    RouterHash::from_hex(s).with_context(|| format!("invalid router hash {s:?}"))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
