use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tenantmatch::{
    generate_profiles, read_profiles, write_matches, write_profiles, Matcher, MatchingSchema,
    OutputFormat, TieBreak, DEFAULT_SEED,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Explainable tenant compatibility matching
#[derive(Parser, Debug)]
#[command(name = "tenantmatch")]
#[command(about = "Rank and explain tenant compatibility", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Matching schema as JSON (defaults to the built-in tenant schema)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a synthetic profile table
    Generate {
        /// Number of profiles
        #[arg(short = 'n', long, default_value_t = 300)]
        count: u32,

        /// RNG seed (1234 when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Use a random seed instead of the default one
        #[arg(long, conflicts_with = "seed")]
        random: bool,

        /// Output CSV path
        #[arg(short, long, default_value = "synthetic_profiles.csv")]
        out: PathBuf,
    },
    /// Compute the explained top-N match table
    Match {
        /// Profile CSV path
        #[arg(short, long)]
        profiles: PathBuf,

        /// Output path
        #[arg(short, long, default_value = "top_matches_explained.csv")]
        out: PathBuf,

        /// Matches kept per tenant
        #[arg(long, default_value_t = 5)]
        top_n: usize,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Ordering among equal scores
        #[arg(long, value_enum, default_value_t = TieBreakArg::InputOrder)]
        tie_break: TieBreakArg,

        /// Run on the calling thread only
        #[arg(long)]
        serial: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TieBreakArg {
    InputOrder,
    CandidateId,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::InputOrder => TieBreak::InputOrder,
            TieBreakArg::CandidateId => TieBreak::CandidateId,
        }
    }
}

fn load_schema(path: Option<&PathBuf>) -> anyhow::Result<MatchingSchema> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
            let schema = MatchingSchema::from_json(&json)
                .with_context(|| format!("Invalid schema in {}", path.display()))?;
            info!("Loaded schema with {} attributes from {:?}", schema.len(), path);
            Ok(schema)
        }
        None => Ok(MatchingSchema::tenant_default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tenantmatch v{}", env!("CARGO_PKG_VERSION"));

    let schema = load_schema(args.schema.as_ref())?;

    match args.command {
        Command::Generate {
            count,
            seed,
            random,
            out,
        } => {
            let seed = if random { None } else { Some(seed.unwrap_or(DEFAULT_SEED)) };
            let profiles = generate_profiles(&schema, count, seed);
            write_profiles(&out, &schema, &profiles)?;
            info!("Wrote {} profiles to {:?} (seed {:?})", profiles.len(), out, seed);
        }
        Command::Match {
            profiles,
            out,
            top_n,
            format,
            tie_break,
            serial,
        } => {
            let entities = read_profiles(&profiles, &schema)?;
            info!("Loaded {} profiles from {:?}", entities.len(), profiles);

            let matcher = Matcher::new(schema)?.with_tie_break(tie_break.into());

            let started = Instant::now();
            let output = if serial {
                matcher.compute_all_serial(&entities, top_n)
            } else {
                matcher.compute_all(&entities, top_n)
            };
            info!(
                "Computed {} match rows in {:.2?}",
                output.rows.len(),
                started.elapsed()
            );

            for failure in &output.failures {
                warn!(
                    "Skipped {} ({}): {}",
                    failure.tenant_label, failure.user_id, failure.error
                );
            }

            write_matches(&out, &output.rows, format.into())?;
            info!("Wrote match table to {:?}", out);
        }
    }

    Ok(())
}
