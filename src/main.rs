mod render;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tzscout_core::{format_offset_display, GenderTag, OffsetKey, OutputFormat, ScoutConfig};
use tzscout_locate::resolver::{resolve_display, BucketResolver, Resolution};
use tzscout_stats::diversity::{DiversityRange, RatioScope};
use tzscout_stats::neighborhood::{NeighborMerge, NeighborWindow};
use tzscout_stats::recommend::{
    recommend_demographic, recommend_location, DemographicOptions, RecommendOptions,
};
use tzscout_stats::store::{DemographicStore, LocationStore};
use tzscout_stats::table::RecommendationCount;

const CONFIG_FILE: &str = ".tzscout.toml";
const LOG_ENV: &str = "TZSCOUT_LOG";

#[derive(Parser)]
#[command(
    name = "tzscout",
    version,
    about = "Find open-source projects whose contributors share your time zone",
    long_about = "tzscout recommends open-source projects to newcomers based on where their\n\
                   contributors live: projects active in your UTC offset, in neighboring\n\
                   offsets, and, with the diversity command, projects with a given share of\n\
                   female contributors.\n\n\
                   Examples:\n  \
                     tzscout recommend --offset UTC+5:30        Projects near UTC+5:30\n  \
                     tzscout recommend --auto                   Detect your zone from your IP\n  \
                     tzscout diversity --gender female --auto   Zone, nearby and worldwide tables\n  \
                     tzscout zones                              List offsets with statistics\n  \
                     tzscout doctor                             Check datasets and setup"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .tzscout.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable tables (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  Markdown tables with linked project URLs"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend projects active in and around your time zone
    #[command(long_about = "Recommend projects active in and around your time zone.\n\n\
        Prints the projects with the most contributors in your UTC offset, then the\n\
        projects with the most contributors across the neighboring offsets.\n\n\
        Examples:\n  tzscout recommend --offset UTC-3:00\n  tzscout recommend --auto --count 10")]
    Recommend {
        #[command(flatten)]
        zone: ZoneArgs,

        #[command(flatten)]
        table: TableArgs,

        /// Location dataset (default: data.location_path from config)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Put the rank column first
        #[arg(long)]
        rank_first: bool,
    },
    /// Recommend projects by contributor gender and diversity
    #[command(
        long_about = "Recommend projects by contributor gender and diversity.\n\n\
        Reads the demographic dataset and prints projects in your zone, in nearby zones\n\
        and worldwide, optionally keeping only projects whose share of female\n\
        contributors lies within --range.\n\n\
        Examples:\n  tzscout diversity --gender female --offset UTC+1:00\n  tzscout diversity --gender all --auto --range 20-50 --scope global"
    )]
    Diversity {
        /// Gender slice to rank by: male, female or all
        #[arg(long)]
        gender: GenderTag,

        #[command(flatten)]
        zone: ZoneArgs,

        #[command(flatten)]
        table: TableArgs,

        /// Female contributor share in percent, e.g. 20-50
        #[arg(long)]
        range: Option<DiversityRange>,

        /// Ratio used for the zone tables: local or global
        #[arg(long, default_value = "local")]
        scope: RatioScope,

        /// How nearby zones are combined
        #[arg(
            long,
            default_value = "concat",
            long_help = "How nearby zones are combined.\n\n\
                Policies:\n  \
                  concat  Each zone's top projects, concatenated and sorted (default)\n  \
                  sum     Counts summed per project across zones"
        )]
        merge: NeighborMerge,

        /// Demographic dataset (default: data.demographic_path from config)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List the UTC offsets that have statistics
    Zones {
        /// Dataset to read (default: data.location_path from config)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Read the demographic dataset instead of the location dataset
        #[arg(long)]
        demographic: bool,
    },
    /// Detect your time zone
    #[command(long_about = "Detect your time zone.\n\n\
        Looks up your approximate location from your network address and maps it to\n\
        a time zone and the UTC offset currently in effect there. Pass --lat and\n\
        --lon to resolve a known point instead.")]
    Locate {
        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Create a default .tzscout.toml configuration file
    #[command(long_about = "Create a default .tzscout.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .tzscout.toml already exists.")]
    Init,
    /// Check your tzscout setup
    #[command(long_about = "Check your tzscout setup.\n\n\
        Runs diagnostics for the config file, both datasets and automatic time zone\n\
        detection. Use --format json for machine-readable output.")]
    Doctor,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ZoneArgs {
    /// Your UTC offset, e.g. UTC+5:30 or UTC-3:00
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Detect your time zone from your network location
    #[arg(long)]
    auto: bool,
}

#[derive(Args)]
struct TableArgs {
    /// Rows per table, 1-20 (default: recommend.count from config)
    #[arg(long, short = 'n')]
    count: Option<usize>,

    /// Radius of the nearby-zones table in hours (default: recommend.window_hours)
    #[arg(long)]
    window: Option<f64>,
}

impl TableArgs {
    fn options(&self, config: &ScoutConfig) -> Result<RecommendOptions> {
        Ok(RecommendOptions {
            count: RecommendationCount::new(self.count.unwrap_or(config.recommend.count))?,
            window: NeighborWindow::from_hours(
                self.window.unwrap_or(config.recommend.window_hours),
            )?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1mtzscout\x1b[0m v{version}: open-source projects near your time zone\n");

        println!("Quick start:");
        println!("  \x1b[36mtzscout zones\x1b[0m                      List offsets with statistics");
        println!("  \x1b[36mtzscout recommend --auto\x1b[0m           Projects near your detected zone");
        println!("  \x1b[36mtzscout recommend --offset UTC+1:00\x1b[0m  Projects near a chosen zone\n");

        println!("All commands:");
        println!("  \x1b[32mrecommend\x1b[0m  Projects in your zone and nearby zones");
        println!("  \x1b[32mdiversity\x1b[0m  Projects by contributor gender and diversity");
        println!("  \x1b[32mzones\x1b[0m      List the offsets that have statistics");
        println!("  \x1b[32mlocate\x1b[0m     Detect your time zone");
        println!("  \x1b[32mdoctor\x1b[0m     Check your setup");
        println!("  \x1b[32minit\x1b[0m       Create default configuration\n");
    } else {
        println!("tzscout v{version}: open-source projects near your time zone\n");

        println!("Quick start:");
        println!("  tzscout zones                      List offsets with statistics");
        println!("  tzscout recommend --auto           Projects near your detected zone");
        println!("  tzscout recommend --offset UTC+1:00  Projects near a chosen zone\n");

        println!("All commands:");
        println!("  recommend  Projects in your zone and nearby zones");
        println!("  diversity  Projects by contributor gender and diversity");
        println!("  zones      List the offsets that have statistics");
        println!("  locate     Detect your time zone");
        println!("  doctor     Check your setup");
        println!("  init       Create default configuration\n");
    }

    println!("Run 'tzscout <command> --help' for details.");
}

fn init_tracing(verbose: bool, use_color: bool) {
    let fallback = if verbose {
        "warn,tzscout=debug,tzscout_core=debug,tzscout_stats=debug,tzscout_locate=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color)
                .with_target(false),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ScoutConfig> {
    match path {
        Some(path) => ScoutConfig::from_file(path)
            .wrap_err_with(|| format!("loading config from {}", path.display())),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                ScoutConfig::from_file(default_path).wrap_err(format!("loading {CONFIG_FILE}"))
            } else {
                Ok(ScoutConfig::default())
            }
        }
    }
}

/// Turn `--offset`/`--auto` into a bucket key. `None` means automatic
/// detection failed and the user has been told to pick a zone.
async fn resolve_zone(zone: &ZoneArgs, config: &ScoutConfig) -> Result<Option<OffsetKey>> {
    let resolution = match &zone.offset {
        Some(display) => resolve_display(display)?,
        None => {
            BucketResolver::from_config(&config.geolocation)?
                .resolve_auto()
                .await
        }
    };

    match resolution {
        Resolution::Resolved { key, zone, .. } => {
            if let Some(name) = zone {
                eprintln!("Detected time zone {name} ({})", format_offset_display(key));
            }
            Ok(Some(key))
        }
        Resolution::Fallback { reason } => {
            print_fallback(&reason);
            Ok(None)
        }
    }
}

fn print_fallback(reason: &str) {
    eprintln!("warning: could not detect your time zone: {reason}");
    eprintln!("hint: choose one with --offset UTC±H:MM; 'tzscout zones' lists the available offsets");
}

async fn run_recommend(
    zone: &ZoneArgs,
    table: &TableArgs,
    data: Option<&Path>,
    rank_first: bool,
    config: &ScoutConfig,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let options = table.options(config)?;
    let Some(target) = resolve_zone(zone, config).await? else {
        return Ok(());
    };

    let path = data.unwrap_or(config.data.location_path.as_path());
    let store = LocationStore::load(path)?;

    let Some(report) = recommend_location(&store, target, options) else {
        eprintln!(
            "No statistics for {}; run 'tzscout zones' to list the available offsets",
            format_offset_display(target)
        );
        if format == OutputFormat::Json {
            println!("null");
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => print!("{}", render::location_report(&report, rank_first, format, use_color)),
    }
    Ok(())
}

struct DiversityArgs<'a> {
    gender: GenderTag,
    zone: &'a ZoneArgs,
    table: &'a TableArgs,
    range: Option<DiversityRange>,
    scope: RatioScope,
    merge: NeighborMerge,
    data: Option<&'a Path>,
}

async fn run_diversity(
    args: DiversityArgs<'_>,
    config: &ScoutConfig,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let base = args.table.options(config)?;
    let Some(target) = resolve_zone(args.zone, config).await? else {
        return Ok(());
    };

    let path = args.data.unwrap_or(config.data.demographic_path.as_path());
    let store = DemographicStore::load(path)?;

    let report = recommend_demographic(
        &store,
        target,
        DemographicOptions {
            base,
            gender: args.gender,
            diversity: args.range,
            scope: args.scope,
            merge: args.merge,
        },
    );
    if !report.offset_known {
        eprintln!(
            "No statistics for {}; showing worldwide projects only",
            report.display
        );
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => print!("{}", render::demographic_report(&report, format, use_color)),
    }
    Ok(())
}

fn run_zones(
    data: Option<&Path>,
    demographic: bool,
    config: &ScoutConfig,
    format: OutputFormat,
) -> Result<()> {
    let offsets = if demographic {
        let path = data.unwrap_or(config.data.demographic_path.as_path());
        DemographicStore::load(path)?.sorted_offsets()
    } else {
        let path = data.unwrap_or(config.data.location_path.as_path());
        LocationStore::load(path)?.sorted_offsets()
    };

    match format {
        OutputFormat::Json => {
            let zones: Vec<serde_json::Value> = offsets
                .iter()
                .map(|k| serde_json::json!({ "key": k, "display": format_offset_display(*k) }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&zones).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            for key in &offsets {
                println!("- {}", format_offset_display(*key));
            }
        }
        OutputFormat::Text => {
            for key in &offsets {
                println!("{}", format_offset_display(*key));
            }
        }
    }
    Ok(())
}

async fn run_locate(
    coordinates: Option<(f64, f64)>,
    config: &ScoutConfig,
    format: OutputFormat,
) -> Result<()> {
    let resolver = BucketResolver::from_config(&config.geolocation)?;
    let resolution = match coordinates {
        Some((lat, lon)) => resolver.resolve_coordinates(lat, lon, Utc::now()),
        None => resolver.resolve_auto().await,
    };

    if format == OutputFormat::Json {
        let mut json = serde_json::to_value(&resolution).into_diagnostic()?;
        if let (Some(obj), Some(display)) = (json.as_object_mut(), resolution.display()) {
            obj.insert("display".into(), display.into());
        }
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        return Ok(());
    }

    match resolution {
        Resolution::Resolved { key, zone, .. } => {
            let display = format_offset_display(key);
            let zone = zone.unwrap_or_else(|| "unknown zone".into());
            match format {
                OutputFormat::Markdown => println!("**{zone}** ({display}, key `{key}`)"),
                _ => println!("{zone} ({display}, key {key})"),
            }
        }
        Resolution::Fallback { reason } => print_fallback(&reason),
    }
    Ok(())
}

/// Outcome of one doctor check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

impl CheckStatus {
    fn symbol(self) -> &'static str {
        match self {
            CheckStatus::Pass => "\u{2713}",
            CheckStatus::Fail => "\u{2717}",
            CheckStatus::Info => "~",
        }
    }

    /// ANSI color code for the symbol.
    fn color(self) -> u8 {
        match self {
            CheckStatus::Pass => 32,
            CheckStatus::Fail => 31,
            CheckStatus::Info => 33,
        }
    }

    fn render(self, use_color: bool) -> String {
        if use_color {
            format!("\x1b[{}m{}\x1b[0m", self.color(), self.symbol())
        } else {
            self.symbol().to_string()
        }
    }
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl DoctorCheck {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
            hint: None,
        }
    }

    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, detail)
    }

    fn info(name: &'static str, detail: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Info, detail)
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            hint: Some(hint.into()),
            ..Self::new(name, CheckStatus::Fail, detail)
        }
    }
}

fn count_status(checks: &[DoctorCheck], status: CheckStatus) -> usize {
    checks.iter().filter(|c| c.status == status).count()
}

async fn run_doctor(
    config: &ScoutConfig,
    config_path: Option<&Path>,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    // 1. Config file
    let path = config_path.unwrap_or(Path::new(CONFIG_FILE));
    if path.exists() {
        checks.push(DoctorCheck::pass(
            "config_file",
            format!("{} found", path.display()),
        ));
    } else {
        checks.push(DoctorCheck::info(
            "config_file",
            format!("{CONFIG_FILE} not found, using defaults"),
        ));
    }

    // 2. Datasets
    let location_path = &config.data.location_path;
    match LocationStore::load(location_path) {
        Ok(store) => checks.push(DoctorCheck::pass(
            "location_data",
            format!("{} ({} offsets)", location_path.display(), store.len()),
        )),
        Err(e) => checks.push(DoctorCheck::fail(
            "location_data",
            e.to_string(),
            "set data.location_path in .tzscout.toml or pass --data",
        )),
    }

    let demographic_path = &config.data.demographic_path;
    match DemographicStore::load(demographic_path) {
        Ok(store) => {
            let worldwide = if store.global(GenderTag::All).is_some() {
                "with worldwide totals"
            } else {
                "no worldwide totals"
            };
            checks.push(DoctorCheck::pass(
                "demographic_data",
                format!(
                    "{} ({} offsets, {worldwide})",
                    demographic_path.display(),
                    store.offsets().count()
                ),
            ));
        }
        Err(e) => checks.push(DoctorCheck::fail(
            "demographic_data",
            e.to_string(),
            "set data.demographic_path in .tzscout.toml or pass --data",
        )),
    }

    // 3. Automatic time zone detection
    let resolution = BucketResolver::from_config(&config.geolocation)?
        .resolve_auto()
        .await;
    match resolution {
        Resolution::Resolved { key, zone, .. } => checks.push(DoctorCheck::pass(
            "geolocation",
            format!(
                "{} ({})",
                zone.unwrap_or_default(),
                format_offset_display(key)
            ),
        )),
        Resolution::Fallback { reason } => checks.push(DoctorCheck::fail(
            "geolocation",
            reason,
            format!(
                "check access to {} or use --offset UTC±H:MM",
                config.geolocation.endpoint
            ),
        )),
    }

    match format {
        OutputFormat::Json => {
            let version = env!("CARGO_PKG_VERSION");
            let json = serde_json::json!({
                "version": version,
                "checks": checks,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        _ => {
            let version = env!("CARGO_PKG_VERSION");
            println!("tzscout v{version} environment check\n");

            for check in &checks {
                let sym = check.status.render(use_color);
                let label = check.name.replace('_', " ");
                println!("  {sym} {label:<18} {}", check.detail);
                if let Some(hint) = &check.hint {
                    println!("    hint: {hint}");
                }
            }

            println!(
                "\n{} checks passed, {} failed, {} info",
                count_status(&checks, CheckStatus::Pass),
                count_status(&checks, CheckStatus::Fail),
                count_status(&checks, CheckStatus::Info),
            );
        }
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# tzscout configuration

[data]
# Offset -> project -> contributor count
# location_path = "tz_project.json"
# Offset -> gender -> project records, plus a "global" bucket
# demographic_path = "tz_gender_project.json"

[recommend]
# Rows per table (1-20)
# count = 5
# Radius of the nearby-zones table, in hours
# window_hours = 2.0

[geolocation]
# Service answering with {"latitude": ..., "longitude": ...}
# endpoint = "https://geolocation-db.com/json"
# timeout_secs = 4
"#;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };
    init_tracing(cli.verbose, use_color);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(format = %cli.format, ?config, "configuration loaded");

    match cli.command {
        None => print_welcome(use_color),
        Some(Command::Recommend {
            ref zone,
            ref table,
            ref data,
            rank_first,
        }) => {
            run_recommend(
                zone,
                table,
                data.as_deref(),
                rank_first,
                &config,
                cli.format,
                use_color,
            )
            .await?;
        }
        Some(Command::Diversity {
            gender,
            ref zone,
            ref table,
            range,
            scope,
            merge,
            ref data,
        }) => {
            let args = DiversityArgs {
                gender,
                zone,
                table,
                range,
                scope,
                merge,
                data: data.as_deref(),
            };
            run_diversity(args, &config, cli.format, use_color).await?;
        }
        Some(Command::Zones {
            ref data,
            demographic,
        }) => {
            run_zones(data.as_deref(), demographic, &config, cli.format)?;
        }
        Some(Command::Locate { lat, lon }) => {
            run_locate(lat.zip(lon), &config, cli.format).await?;
        }
        Some(Command::Init) => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Some(Command::Doctor) => {
            run_doctor(&config, cli.config.as_deref(), cli.format, use_color).await?;
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tzscout", &mut std::io::stdout());
        }
    }

    Ok(())
}
