use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;

use context::{AppContext, GlobalOptions};

#[derive(Parser)]
#[command(name = "fitlife")]
#[command(about = "FitLife CLI - sign in, inspect the session and track progress", long_about = None)]
struct Cli {
    /// Directory holding config, credentials and avatar (overrides FITLIFE_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Account API base URL (overrides FITLIFE_API_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email (or username) and password
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log in
    Register {
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session and the dashboard it leads to
    Status,
    /// Fetch the signed-in user's profile, or another user's by id
    Profile {
        #[arg(long)]
        id: Option<String>,
    },
    /// List users
    Users,
    /// Read or change the signed-in user's role
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Body stats and personal records
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
    /// Locally cached profile picture
    Avatar {
        #[command(subcommand)]
        action: AvatarAction,
    },
    /// Look up calories and macros of a food, e.g. `nutrition 100g rice`
    Nutrition {
        #[arg(required = true, num_args = 1..)]
        food: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    Get,
    /// member, trainer, nutritionist or admin
    Set { role: String },
}

#[derive(Subcommand)]
enum ProgressAction {
    Show,
    /// weight, fat or muscle
    Set { stat: String, value: String },
    /// Update the weight of a personal record
    Record { index: usize, weight: String },
}

#[derive(Subcommand)]
enum AvatarAction {
    Show,
    Set { path: PathBuf },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = GlobalOptions {
        home: cli.home,
        api_url: cli.api_url,
        ephemeral: cli.ephemeral,
    };
    let config = context::load_config(&options)?;
    logging::init(&config.logging.level);
    tracing::debug!(api = %config.api.base_url, "Configuration loaded");

    let ctx = AppContext::new(config, options.ephemeral).await?;

    let outcome = tokio::select! {
        outcome = run(cli.command, &ctx) => outcome,
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
    };
    ctx.shutdown().await;
    outcome
}

async fn run(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let password = commands::password_or_prompt(password)?;
            commands::session::login(ctx, &email, &password).await?
        }
        Commands::Register {
            email,
            password,
            name,
        } => {
            let password = commands::password_or_prompt(password)?;
            commands::session::register(ctx, &email, &password, name.as_deref()).await?
        }
        Commands::Logout => commands::session::logout(ctx).await?,
        Commands::Status => commands::session::status(ctx).await?,
        Commands::Profile { id } => commands::session::profile(ctx, id.as_deref()).await?,
        Commands::Users => commands::session::users(ctx).await?,
        Commands::Role { action } => match action {
            RoleAction::Get => commands::role::get(ctx).await?,
            RoleAction::Set { role } => commands::role::set(ctx, &role).await?,
        },
        Commands::Progress { action } => match action {
            ProgressAction::Show => commands::progress::show(ctx).await?,
            ProgressAction::Set { stat, value } => {
                commands::progress::set(ctx, &stat, &value).await?
            }
            ProgressAction::Record { index, weight } => {
                commands::progress::record(ctx, index, &weight).await?
            }
        },
        Commands::Avatar { action } => match action {
            AvatarAction::Show => commands::avatar::show(ctx).await?,
            AvatarAction::Set { path } => commands::avatar::set(ctx, &path).await?,
            AvatarAction::Clear => commands::avatar::clear(ctx).await?,
        },
        Commands::Nutrition { food } => {
            commands::nutrition::lookup(ctx, &food.join(" ")).await?
        }
    }

    Ok(())
}
