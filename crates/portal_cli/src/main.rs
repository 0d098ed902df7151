//! `portal` command-line entry point.
//!
//! # Responsibility
//! - Verify `portal_core` wiring (`ping`, version).
//! - Inspect and drive the local storage of a data directory.

use clap::{Parser, Subcommand};
use log::info;
use portal_core::{
    init_logging_from, known_identity_ids, AppConfigStore, LocalAppRepository, NotificationStore,
    PortalConfig, PortalService, SessionStore, SqliteStorage,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(about = "App portal local data CLI", version)]
struct Cli {
    /// Data dir (defaults to PORTAL_DATA_DIR, then the system temp dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core wiring and version
    Ping,
    /// List apps visible to the logged-in identity
    Apps {
        /// Case-insensitive match on title or description
        query: Vec<String>,
    },
    /// Print the admin dashboard summary
    Summary,
    /// Log in with one of the known accounts
    Login { email: String, password: String },
    /// Show the logged-in identity
    Whoami,
    Logout,
    /// List notifications for the logged-in identity
    Inbox,
    /// Broadcast a notification to every known account (admin only)
    Notify { title: String, message: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = PortalConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = PortalConfig {
            log_level: config.log_level,
            ..PortalConfig::with_data_dir(dir)
        };
    }

    match run(&config, cli.command.unwrap_or(Command::Ping)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PortalConfig, command: Command) -> Result<(), String> {
    if let Command::Ping = command {
        println!("portal_core ping={}", portal_core::ping());
        println!("portal_core version={}", portal_core::core_version());
        return Ok(());
    }

    init_logging_from(config)?;
    info!("event=cli_command module=cli status=start command={command:?}");
    let storage = SqliteStorage::open(config.storage_path()).map_err(|err| err.to_string())?;
    let session = SessionStore::new(&storage);

    match command {
        Command::Ping => {}
        Command::Apps { query } => {
            let identity = session.current().ok_or("not logged in")?;
            let store = AppConfigStore::new(&storage);
            let service = PortalService::new(LocalAppRepository::new(&store));
            for app in service.list_for(&identity, &query.join(" ")) {
                let state = if app.is_active { "active" } else { "inactive" };
                println!(
                    "{}\t{}\t{}\t{} members\t{}",
                    app.id,
                    app.title,
                    app.url,
                    app.users.len(),
                    state
                );
            }
        }
        Command::Summary => {
            let store = AppConfigStore::new(&storage);
            let summary = PortalService::new(LocalAppRepository::new(&store)).dashboard();
            println!("apps={}", summary.total_apps);
            println!("active_apps={}", summary.active_apps);
            println!("members={}", summary.total_members);
            for app in summary.recent {
                println!("recent={}\t{}", app.id, app.title);
            }
        }
        Command::Login { email, password } => {
            let identity = session
                .login(&email, &password)
                .map_err(|err| err.to_string())?;
            println!("logged in as {} ({:?})", identity.name, identity.role);
            if identity.must_reset_password() {
                println!("temporary password: please reset it");
            }
        }
        Command::Whoami => match session.current() {
            Some(identity) => println!("{}\t{}\t{:?}", identity.id, identity.email, identity.role),
            None => println!("not logged in"),
        },
        Command::Logout => session.logout(),
        Command::Inbox => {
            let identity = session.current().ok_or("not logged in")?;
            let inbox = NotificationStore::new(&storage);
            println!("unread={}", inbox.unread_count(&identity));
            for item in inbox.all_for(&identity) {
                let marker = if item.read { " " } else { "*" };
                println!("{marker} {}\t{}\t{}", item.id, item.sender, item.title);
            }
        }
        Command::Notify { title, message } => {
            let identity = session.current().ok_or("not logged in")?;
            if !identity.is_admin() {
                return Err("only administrators can send notifications".to_string());
            }
            let sent = NotificationStore::new(&storage).broadcast(
                &identity,
                title.as_str(),
                message.as_str(),
                known_identity_ids(),
            );
            println!("sent {}", sent.id);
        }
    }
    Ok(())
}
