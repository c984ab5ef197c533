//! Odhanee CLI - drive the storefront from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the collection
//! odhanee catalog --category Sarees
//! odhanee catalog --search silk
//!
//! # Shopping bag
//! odhanee cart add 1
//! odhanee cart qty 1 3
//! odhanee cart show
//!
//! # Mock login
//! odhanee login -e admin@odhanee.com
//!
//! # Admin console (administrators only)
//! odhanee admin products save --name "Mul Cotton Saree" --category sarees \
//!     --price 4200 --description "Soft handloom cotton." --image https://...
//! odhanee admin users toggle-admin customer@odhanee.com
//! odhanee admin settings set --promo "DIWALI SALE"
//! ```
//!
//! State is kept in `ODHANEE_DATA_DIR` (default `.odhanee`), one JSON file per
//! slot. Logs go to stderr; command output goes to stdout.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odhanee_storefront::config::LogFormat;
use odhanee_storefront::store::FileBackend;
use odhanee_storefront::{AppState, StorefrontConfig};

mod commands;

use commands::{CommandError, Context};

#[derive(Parser)]
#[command(name = "odhanee")]
#[command(author, version, about = "Odhanee storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the collection
    Catalog {
        /// Category filter (Sarees, Lehengas, Suits, Kurtis or All)
        #[arg(short, long)]
        category: Option<String>,

        /// Search by name, description or category
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print a share link for a product
    Share {
        /// Product ID
        id: String,

        /// `whatsapp`, `facebook` or `instagram`
        platform: String,
    },
    /// Manage the shopping bag
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in (no password; unknown emails get a new account)
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name for a new account
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Log out
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Show the promo banner and announcement bar
    Banner,
    /// Admin console
    Admin {
        #[command(subcommand)]
        section: AdminSection,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the bag with its total
    Show,
    /// Add one unit of a product
    Add { id: String },
    /// Remove a product from the bag
    Remove { id: String },
    /// Set the quantity of a line (minimum 1)
    Qty { id: String, quantity: u32 },
    /// Lower the quantity of a line by one
    Dec { id: String },
    /// Confirm the selection
    Confirm,
}

#[derive(Subcommand)]
enum AdminSection {
    /// Manage the collection
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the site banners
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product
    List,
    /// Print a blank product draft
    New,
    /// Create a product, or edit the one with `--id`
    Save(commands::admin::ProductFields),
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
enum UserAction {
    /// List every account
    List,
    /// Flip an account's administrator flag
    ToggleAdmin { email: String },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current settings
    Show,
    /// Edit one or more settings
    Set {
        /// Promo banner text
        #[arg(long)]
        promo: Option<String>,

        /// Announcement bar text
        #[arg(long)]
        marquee: Option<String>,

        /// Whether the announcement bar is shown
        #[arg(long)]
        announcement: Option<bool>,
    },
    /// Turn the announcement bar on or off
    ToggleAnnouncement,
    /// Save changes
    Save,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry_environment.clone().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "odhanee_storefront=info,odhanee_cli=info".into());

    let text = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let json = (format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text)
        .with(json)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config) {
        if let CommandError::App(app) = &e {
            app.report();
        }
        tracing::error!("Command failed: {e}");
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CommandError> {
    let backend = FileBackend::open(config.data_dir.clone())?;
    tracing::debug!(data_dir = %backend.dir().display(), "Opened data directory");
    let mut state = AppState::open(Arc::new(backend));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context {
        state: &mut state,
        base_url: &config.base_url,
        out: &mut out,
    };

    dispatch(cli.command, &mut ctx)?;
    out.flush()?;
    Ok(())
}

fn dispatch<W: Write>(command: Commands, ctx: &mut Context<'_, W>) -> Result<(), CommandError> {
    match command {
        Commands::Catalog { category, search } => {
            commands::catalog::list(ctx, category.as_deref(), search.as_deref())
        }
        Commands::Share { id, platform } => commands::catalog::share(ctx, &id, &platform),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(ctx),
            CartAction::Add { id } => commands::cart::add(ctx, &id),
            CartAction::Remove { id } => commands::cart::remove(ctx, &id),
            CartAction::Qty { id, quantity } => commands::cart::set_quantity(ctx, &id, quantity),
            CartAction::Dec { id } => commands::cart::decrement(ctx, &id),
            CartAction::Confirm => commands::cart::confirm(ctx),
        },
        Commands::Login { email, name } => commands::account::login(ctx, &email, name.as_deref()),
        Commands::Logout => commands::account::logout(ctx),
        Commands::Whoami => commands::account::whoami(ctx),
        Commands::Banner => commands::account::banner(ctx),
        Commands::Admin { section } => match section {
            AdminSection::Products { action } => match action {
                ProductAction::List => commands::admin::list_products(ctx),
                ProductAction::New => commands::admin::new_product(ctx),
                ProductAction::Save(fields) => commands::admin::save_product(ctx, fields),
                ProductAction::Delete { id } => commands::admin::delete_product(ctx, &id),
            },
            AdminSection::Users { action } => match action {
                UserAction::List => commands::admin::list_users(ctx),
                UserAction::ToggleAdmin { email } => commands::admin::toggle_admin(ctx, &email),
            },
            AdminSection::Settings { action } => match action {
                SettingsAction::Show => commands::admin::show_settings(ctx),
                SettingsAction::Set {
                    promo,
                    marquee,
                    announcement,
                } => commands::admin::update_settings(ctx, promo, marquee, announcement),
                SettingsAction::ToggleAnnouncement => commands::admin::toggle_announcement(ctx),
                SettingsAction::Save => commands::admin::save_settings(ctx),
            },
        },
    }
}
