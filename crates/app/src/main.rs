use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use prep_core::model::Locale;
use services::{
    AppServices, CardCatalog, Clock, DashboardStats, ProgressStore, RecordLoader,
    StudyLoopService,
};
use tracing_subscriber::EnvFilter;
use ui::{App, LinkOpenerRef, SystemLinkOpener, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLocale { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLocale { raw } => {
                write!(f, "invalid --locale value: {raw} (expected en or ja)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    locale: Locale,
    services: AppServices,
    links: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn initial_locale(&self) -> Locale {
        self.locale
    }

    fn progress_store(&self) -> Arc<ProgressStore> {
        self.services.progress()
    }

    fn study_loop(&self) -> Arc<StudyLoopService> {
        self.services.study_loop()
    }

    fn catalog(&self) -> Arc<CardCatalog> {
        self.services.catalog()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.links)
    }
}

struct Args {
    db_url: String,
    locale: Locale,
    data: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--locale <en|ja>] [--data <csv>]");
    eprintln!("  cargo run -p app -- stats [--db <sqlite_url>] [--locale <en|ja>] [--data <csv>]");
    eprintln!("  cargo run -p app -- reset [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://<cwd>/cloud-prep.sqlite3");
    eprintln!("  --locale en");
    eprintln!("  --data bundled cards");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL, PREP_LOCALE, PREP_DATA_CSV, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Stats,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "stats" => Some(Self::Stats),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PREP_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url("cloud-prep.sqlite3".into()), normalize_sqlite_url);
        let mut locale = match std::env::var("PREP_LOCALE") {
            Ok(raw) => parse_locale(raw)?,
            Err(_) => Locale::default(),
        };
        let mut data = std::env::var_os("PREP_DATA_CSV")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--locale" => {
                    locale = parse_locale(require_value(args, "--locale")?)?;
                }
                "--data" => {
                    data = Some(PathBuf::from(require_value(args, "--data")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            locale,
            data,
        })
    }

    fn loader(&self) -> RecordLoader {
        match &self.data {
            Some(path) => RecordLoader::from_file(path.clone()),
            None => RecordLoader::bundled(),
        }
    }
}

fn parse_locale(raw: String) -> Result<Locale, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidLocale { raw })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launch the UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup; services never see file paths.
    prepare_sqlite_file(&parsed.db_url)?;
    tracing::info!(db = %parsed.db_url, locale = %parsed.locale, "opening progress store");
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), parsed.loader()).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                locale: parsed.locale,
                services,
                links: Arc::new(SystemLinkOpener),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Cloud Prep")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stats => {
            let records = services.catalog().records(parsed.locale);
            let progress = services.progress().snapshot().await;
            print_stats(&DashboardStats::compute(&records, &progress));
            Ok(())
        }
        Command::Reset => {
            let cleared = services.progress().clear_all().await;
            println!("progress cleared ({} records remain)", cleared.len());
            Ok(())
        }
    }
}

fn print_stats(stats: &DashboardStats) {
    println!(
        "mastered {} / {} ({}%)",
        stats.mastered,
        stats.total,
        stats.percentage()
    );
    for section in &stats.sections {
        println!(
            "  {:<40} {:>3} / {:<3} {:>3}%",
            section.section.as_str(),
            section.mastered,
            section.total,
            section.percentage()
        );
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
