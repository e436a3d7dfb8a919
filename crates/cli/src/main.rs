//! Finance Dashboard - terminal front end for the finance tracker backend.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any failure (bad arguments, config, login, backend errors)

mod cli;
mod render;

use anyhow::{bail, Context, Result};
use cli::{Args, Command, Credentials, OutputFormat, TransactionArgs};
use finance_dashboard_core::models::forms::{LoginForm, RegisterForm};
use finance_dashboard_core::models::route::Route;
use finance_dashboard_core::models::settings::{Settings, DEFAULT_CONFIG_FILE};
use finance_dashboard_core::FinanceDashboard;
use render::TextRenderer;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if args.init_config {
        return handle_init_config(&args);
    }

    init_logging(&args)?;
    info!("Finance Dashboard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        error!("{e:#}");
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

/// Handle --init-config: write the default settings file.
fn handle_init_config(args: &Args) -> Result<()> {
    let path = config_path(args);
    if path.exists() {
        bail!(
            "{} already exists. Remove it first or edit it manually.",
            path.display()
        );
    }

    let content = Settings::default().to_toml_string()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created {} with default settings.", path.display());
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the level comes from --verbose/--quiet.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn config_path(args: &Args) -> PathBuf {
    args.config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Settings file (explicit path must exist, default path may not), then
/// command-line overrides.
fn load_settings(args: &Args) -> Result<Settings> {
    let path = config_path(args);
    let mut settings = if args.config.is_some() {
        info!("Loading settings from: {}", path.display());
        Settings::load(&path)
    } else {
        Settings::load_or_default(&path)
    }
    .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    if let Some(url) = &args.base_url {
        settings.base_url = url.clone();
    }
    if let Some(currency) = &args.currency {
        settings
            .set_default_currency(currency)
            .context("Invalid --currency")?;
    }
    settings.validate().context("Invalid settings")?;
    debug!("Settings: {settings:?}");
    Ok(settings)
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let text = TextRenderer::new(&settings.default_currency);
    let mut dash = FinanceDashboard::connect(settings).context("Failed to set up backend client")?;

    let Some(command) = args.command else {
        bail!("No command given");
    };

    match command {
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                username,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            let result = dash.register(&form).await;
            flush_notifications(&mut dash);
            result.context("Registration failed")?;
        }
        Command::Dashboard { credentials } => {
            login(&mut dash, &credentials).await?;
            print_view(&dash, &text, args.format)?;
            logout(&mut dash).await;
        }
        Command::Add {
            credentials,
            transaction,
        } => {
            login(&mut dash, &credentials).await?;
            flush_notifications(&mut dash);
            fill_transaction_form(&mut dash, transaction);
            let result = dash.submit_transaction().await;
            flush_notifications(&mut dash);
            if result.is_ok() {
                print_view(&dash, &text, args.format)?;
            }
            logout(&mut dash).await;
            result.context("Adding the transaction failed")?;
        }
    }
    Ok(())
}

async fn login(dash: &mut FinanceDashboard, credentials: &Credentials) -> Result<()> {
    let form = LoginForm::new(&credentials.email, &credentials.password);
    let result = dash.login(&form).await;
    flush_notifications(dash);
    result.context("Login failed")?;

    if dash.route() != Route::Dashboard {
        bail!("Logged in but the dashboard could not be opened");
    }
    Ok(())
}

/// Best effort: a failed logout is reported but does not fail the command.
async fn logout(dash: &mut FinanceDashboard) {
    if let Err(e) = dash.logout().await {
        debug!("Logout error: {e}");
    }
    flush_notifications(dash);
}

fn fill_transaction_form(dash: &mut FinanceDashboard, args: TransactionArgs) {
    let form = dash.transaction_form_mut();
    if let Some(date) = args.date {
        form.date = date;
    }
    form.kind = args.kind;
    form.amount = args.amount;
    form.category = args.category;
    form.description = args.description;
}

fn print_view(dash: &FinanceDashboard, text: &TextRenderer, format: OutputFormat) -> Result<()> {
    let Some(view) = dash.view() else {
        bail!("Nothing to show: the dashboard is not loaded");
    };
    match format {
        OutputFormat::Text => print!("{}", text.dashboard(view)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(view).context("Failed to serialize view")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn flush_notifications(dash: &mut FinanceDashboard) {
    for n in dash.take_notifications() {
        eprintln!("{}", render::notification(&n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let args = Args::try_parse_from([
            "finance-dashboard",
            "--config",
            missing.to_str().unwrap(),
            "--init-config",
        ])
        .unwrap();
        assert!(load_settings(&args).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "default_currency = \"PLN\"\nrecent_transactions_limit = 3\n").unwrap();

        let args = Args::try_parse_from([
            "finance-dashboard",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "https://finance.example.com",
            "--currency",
            "eur",
            "--init-config",
        ])
        .unwrap();
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.base_url, "https://finance.example.com");
        assert_eq!(settings.default_currency, "EUR");
        assert_eq!(settings.recent_transactions_limit, 3);
    }

    #[test]
    fn init_config_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finance-dashboard.toml");
        let args = Args::try_parse_from([
            "finance-dashboard",
            "--config",
            path.to_str().unwrap(),
            "--init-config",
        ])
        .unwrap();

        handle_init_config(&args).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
        assert!(handle_init_config(&args).is_err());
    }

    #[test]
    fn missing_default_file_is_fine() {
        let args = Args::try_parse_from(["finance-dashboard", "--init-config"]).unwrap();
        // Falls back to defaults when ./finance-dashboard.toml is absent.
        if !Path::new(DEFAULT_CONFIG_FILE).exists() {
            let settings = load_settings(&args).unwrap();
            assert_eq!(settings.recent_transactions_limit, 5);
        }
    }
}
