//! Envcopy - cross-environment entry replication
//!
//! Usage:
//!   envcopy copy <ENTRY> --source master             # pick destination interactively
//!   envcopy copy <ENTRY> --source master --all --yes # scripted copy to all environments
//!   envcopy config show                              # inspect endpoint configuration
//!   envcopy config set --list-url <URL> --copy-url <URL>

mod interactive;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use envcopy_core::config::{AppConfig, ConfigStore};
use envcopy_core::dialog::{CopyDialog, DialogParameters, DialogPhase, SubmitOutcome};
use envcopy_core::host::{DialogLifecycle, HostEffects, IdentityContext};
use envcopy_core::panel::TriggerPanel;
use envcopy_core::remote::HttpCopyService;
use envcopy_core::types::{CopyTarget, Credentials};

use crate::interactive::{DialogFlow, PrefilledInput};

#[derive(Parser)]
#[command(name = "envcopy")]
#[command(about = "Copy content entries across environments", long_about = None)]
struct Cli {
    /// Path to an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy an entry from the source environment to a destination
    Copy(CopyArgs),

    /// Show or update the endpoint configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct CopyArgs {
    /// Id of the entry to copy
    entry: String,

    /// Source environment id
    #[arg(short, long)]
    source: String,

    /// Destination environment id (skips the selection prompt)
    #[arg(short, long)]
    target: Option<String>,

    /// Copy to every environment
    #[arg(long, conflicts_with = "target")]
    all: bool,

    /// Username, for deployments that require credentials
    #[arg(short, long)]
    username: Option<String>,

    /// Password, for deployments that require credentials
    #[arg(short, long)]
    password: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configured endpoints
    Show,

    /// Update configuration values
    Set {
        /// URL of the environment-listing endpoint
        #[arg(long)]
        list_url: Option<String>,

        /// URL of the entry-copy endpoint
        #[arg(long)]
        copy_url: Option<String>,

        /// Whether the copy endpoint requires HTTP Basic credentials
        #[arg(long)]
        require_credentials: Option<bool>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "envcopy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path.clone()),
        None => ConfigStore::from_default_location()?,
    };

    match cli.command {
        Commands::Copy(args) => run_copy(&store, args),
        Commands::Config { action } => run_config(&store, action),
    }
}

/// Terminal stand-in for the host shell's notification surface.
#[derive(Clone, Default)]
struct TerminalShell;

impl HostEffects for TerminalShell {
    fn notify_success(&mut self, message: &str) {
        println!("{} {message}", style("✓").green().bold());
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("{} {message}", style("✗").red().bold());
    }

    fn request_reflow(&mut self) {
        // The terminal lays itself out; there is no height to recompute.
    }
}

impl DialogLifecycle for TerminalShell {
    fn on_open(&mut self) {
        tracing::debug!("copy dialog opened");
    }

    fn on_close(&mut self) {
        tracing::debug!("copy dialog closed");
    }
}

fn run_copy(store: &ConfigStore, args: CopyArgs) -> Result<()> {
    let config = store.load()?;
    tracing::debug!(config_path = %store.config_path().display(), "configuration loaded");

    let identity = IdentityContext::new(args.entry, args.source);
    let shell = TerminalShell;
    let mut panel = TriggerPanel::new(&identity, shell.clone());

    let prefilled = PrefilledInput {
        target: if args.all {
            Some(CopyTarget::AllEnvironments)
        } else {
            args.target.map(CopyTarget::Environment)
        },
        credentials: match (args.username, args.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        },
        yes: args.yes,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(panel.invoke_copy_flow(|params| {
        run_dialog(params, &identity, &config, prefilled, shell.clone())
    }));

    Ok(())
}

/// Drive the copy dialog to completion or dismissal.
async fn run_dialog(
    params: DialogParameters,
    identity: &IdentityContext,
    config: &AppConfig,
    prefilled: PrefilledInput,
    shell: TerminalShell,
) -> Result<()> {
    let service = HttpCopyService::new()?;
    let mut dialog = CopyDialog::new(
        params,
        identity,
        config.endpoints.clone(),
        config.dialog,
        service,
        shell.clone(),
        shell,
    );

    dialog.open().await;

    if matches!(dialog.phase(), DialogPhase::Failed(_)) {
        // The failure was already surfaced through the shell.
        dialog.dismiss();
        return Ok(());
    }
    if dialog.catalog().is_empty() {
        println!(
            "{}",
            style("No destination environments available.").yellow()
        );
        dialog.dismiss();
        return Ok(());
    }

    let mut flow = DialogFlow::new(prefilled);

    let Some(target) = flow.prompt_target(dialog.catalog())? else {
        dialog.dismiss();
        return Ok(());
    };
    dialog.select_target(target.clone());

    if config.dialog.require_credentials {
        let credentials = flow.prompt_credentials()?;
        dialog.set_username(credentials.username.clone());
        dialog.set_password(credentials.password);
    }

    if !flow.confirm(&dialog.context().entry_id, &target)? {
        dialog.dismiss();
        return Ok(());
    }

    loop {
        match dialog.submit().await {
            SubmitOutcome::Completed => return Ok(()),
            SubmitOutcome::Retry => {
                if !flow.retry()? {
                    dialog.dismiss();
                    return Ok(());
                }
            }
            SubmitOutcome::NotReady => {
                // Only reachable with empty credential input; collect again.
                let credentials = flow.prompt_credentials()?;
                dialog.set_username(credentials.username.clone());
                dialog.set_password(credentials.password);
            }
        }
    }
}

fn run_config(store: &ConfigStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = store.load()?;
            println!("{}", style("Envcopy configuration").bold());
            println!(
                "  {}",
                style(store.config_path().display().to_string()).dim()
            );
            print_url("List URL", config.endpoints.list_environments_url.as_deref());
            print_url("Copy URL", config.endpoints.copy_entry_url.as_deref());
            println!(
                "  {:<22} {}",
                "Require credentials",
                style(config.dialog.require_credentials).green()
            );
            Ok(())
        }
        ConfigAction::Set {
            list_url,
            copy_url,
            require_credentials,
        } => {
            let mut config = store.load()?;
            if let Some(url) = list_url {
                config.endpoints.list_environments_url = Some(url);
            }
            if let Some(url) = copy_url {
                config.endpoints.copy_entry_url = Some(url);
            }
            if let Some(required) = require_credentials {
                config.dialog.require_credentials = required;
            }
            store.save(&config)?;
            println!(
                "Saved configuration to {}",
                style(store.config_path().display().to_string()).green()
            );
            Ok(())
        }
    }
}

fn print_url(label: &str, value: Option<&str>) {
    match value {
        Some(url) => println!("  {label:<22} {}", style(url).green()),
        None => println!("  {label:<22} {}", style("(not set)").dim()),
    }
}
