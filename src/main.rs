// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use wflocale::app_config::{self, Config, TranslationProvider};
use wflocale::app_controller::{Controller, LocaleOutcome, LocaleStatus, all_succeeded};
use wflocale::content::extracted_pairs;
use wflocale::export::{ExportEntry, export_to_file};
use wflocale::language_utils::describe_tag;
use wflocale::session::{Session, SessionCredentials};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the site's locales
    Locales,

    /// List the site's pages
    Pages,

    /// Show the translatable text of a page
    Show {
        /// Page to inspect
        #[arg(value_name = "PAGE_ID")]
        page_id: String,

        /// Print the raw page document instead of the extracted text
        #[arg(long)]
        raw: bool,
    },

    /// Translate a page into one or more locales and write the result back
    Translate {
        /// Page to translate
        #[arg(value_name = "PAGE_ID")]
        page_id: String,

        /// Target locale (id, tag or display name); repeat for several
        #[arg(short = 'l', long = "locale", value_name = "LOCALE", required_unless_present = "all_secondary")]
        locales: Vec<String>,

        /// Translate into every secondary locale of the site
        #[arg(long, conflicts_with = "locales")]
        all_secondary: bool,

        /// Also write the translations to a ZIP archive
        #[arg(long, value_name = "ZIP")]
        export: Option<PathBuf>,
    },

    /// Generate shell completions for wflocale
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// wflocale - Webflow page localization with AI
///
/// Extracts the static text of a Webflow page, translates it with an AI
/// provider and writes it back into the site's secondary locales.
#[derive(Parser, Debug)]
#[command(name = "wflocale")]
#[command(version)]
#[command(about = "AI-powered Webflow page localization tool")]
#[command(long_about = "wflocale translates the static text of Webflow pages into a site's locales.

EXAMPLES:
    wflocale locales                             # List the site's locales
    wflocale pages                               # List the site's pages
    wflocale show 6596da6045e56dee495bcbc8       # Show a page's translatable text
    wflocale translate PAGE_ID -l fr -l de       # Translate into French and German
    wflocale translate PAGE_ID --all-secondary   # Translate into every secondary locale
    wflocale translate PAGE_ID -l fr --export out.zip
    wflocale completions bash > wflocale.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. WEBFLOW_API_TOKEN, WEBFLOW_SITE_ID,
    OPENAI_API_KEY and ANTHROPIC_API_KEY override the file.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (requires API key, default: gpt-4o-mini)
    anthropic - Anthropic Claude API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Webflow API token
    #[arg(long, env = "WEBFLOW_API_TOKEN", hide_env_values = true, global = true)]
    api_token: Option<String>,

    /// Webflow site ID
    #[arg(long, env = "WEBFLOW_SITE_ID", global = true)]
    site_id: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    openai_api_key: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, global = true)]
    anthropic_api_key: Option<String>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Level is refined once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "wflocale", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        log::set_max_level(level_filter(&level.clone().into()));
    }

    let config = load_config(&cli)?;
    log::set_max_level(level_filter(&config.log_level));
    config.validate()?;

    let mut session = Session::new(SessionCredentials::from_config(&config)?);
    let controller =
        Controller::for_session(&config, &session).context("Failed to create Webflow client")?;

    session
        .load_site(controller.api())
        .await
        .context("Failed to load site")?;

    let result = match cli.command {
        Commands::Locales => {
            print_locales(&session);
            Ok(())
        }
        Commands::Pages => {
            print_pages(&session);
            Ok(())
        }
        Commands::Show { page_id, raw } => run_show(&mut session, &controller, &page_id, raw).await,
        Commands::Translate {
            page_id,
            locales,
            all_secondary,
            export,
        } => {
            run_translate(&mut session, &controller, &page_id, &locales, all_secondary, export).await
        }
        Commands::Completions { .. } => Ok(()),
    };

    session.finish();
    result
}

/// Load the config file and apply CLI and environment overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(token) = &cli.api_token {
        config.webflow.api_token = token.clone();
    }
    if let Some(site_id) = &cli.site_id {
        config.webflow.site_id = site_id.clone();
    }
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &cli.model {
        let provider_str = config.translation.provider.to_lowercase_string();
        match config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            Some(provider_config) => provider_config.model = model.clone(),
            None => warn!("No configuration for provider '{}', ignoring --model", provider_str),
        }
    }
    if let Some(key) = &cli.openai_api_key {
        config.translation.set_api_key(TranslationProvider::OpenAI, key.clone());
    }
    if let Some(key) = &cli.anthropic_api_key {
        config.translation.set_api_key(TranslationProvider::Anthropic, key.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    Ok(config)
}

fn print_locales(session: &Session) {
    println!("{:<26} {:<10} {:<12} NAME", "ID", "TYPE", "TAG");
    for locale in session.locales() {
        println!(
            "{:<26} {:<10} {:<12} {}",
            locale.id,
            locale.kind.to_string(),
            locale.tag,
            locale.display_name
        );
    }
}

fn print_pages(session: &Session) {
    println!("{:<26} {:<30} TITLE", "ID", "SLUG");
    for page in session.pages() {
        println!(
            "{:<26} {:<30} {}",
            page.id,
            page.slug.as_deref().unwrap_or("-"),
            page.display_title()
        );
    }
}

async fn run_show(session: &mut Session, controller: &Controller, page_id: &str, raw: bool) -> Result<()> {
    let page = session
        .view_page(controller.api(), page_id)
        .await
        .context(format!("Failed to fetch page {}", page_id))?;

    if raw {
        println!("{}", serde_json::to_string_pretty(&page.document)?);
        return Ok(());
    }

    let pairs = extracted_pairs(&page.extracted);
    if pairs.is_empty() {
        warn!("Page {} has no translatable text", page_id);
        return Ok(());
    }

    for node in &page.extracted {
        for fragment in &node.property_overrides {
            println!("{}\t{}\t{}", node.node_id, fragment.property_id, fragment.text);
        }
    }
    info!("{} text fragment(s) in {} node(s)", pairs.len(), page.extracted.len());
    Ok(())
}

async fn run_translate(
    session: &mut Session,
    controller: &Controller,
    page_id: &str,
    selectors: &[String],
    all_secondary: bool,
    export: Option<PathBuf>,
) -> Result<()> {
    let locales = if all_secondary {
        session.secondary_locales()
    } else {
        session.select_locales(selectors)?
    };
    if locales.is_empty() {
        return Err(anyhow!("No target locales selected"));
    }

    let extracted = session
        .view_page(controller.api(), page_id)
        .await
        .context(format!("Failed to fetch page {}", page_id))?
        .extracted
        .clone();

    info!(
        "Targets: {}",
        locales.iter().map(|l| describe_tag(&l.tag)).collect::<Vec<_>>().join(", ")
    );

    let cancel = controller.cancel_flag();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current locale");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let statuses = controller.translate_page(page_id, &extracted, &locales).await;
    signal_task.abort();

    print_summary(&statuses);

    if let Some(path) = export {
        let entries = ExportEntry::from_statuses(&statuses);
        if entries.is_empty() {
            warn!("No translations to export");
        } else {
            export_to_file(&path, &entries).context(format!("Failed to export to {}", path.display()))?;
        }
    }

    if all_succeeded(&statuses) {
        Ok(())
    } else {
        let failed = statuses.iter().filter(|s| !s.is_success()).count();
        error!("{} of {} locale(s) were not updated", failed, statuses.len());
        Err(anyhow!("Translation incomplete for page {}", page_id))
    }
}

fn print_summary(statuses: &[LocaleStatus]) {
    println!("{:<12} {:<10} DETAIL", "LOCALE", "RESULT");
    for status in statuses {
        let (result, detail) = match &status.outcome {
            LocaleOutcome::Written { fragments, expected } => {
                ("written", format!("{}/{} fragment(s)", fragments, expected))
            }
            LocaleOutcome::Failed(e) => ("failed", e.to_string()),
            LocaleOutcome::Cancelled => ("cancelled", String::new()),
        };
        println!("{:<12} {:<10} {}", status.locale.tag, result, detail);
    }
}
