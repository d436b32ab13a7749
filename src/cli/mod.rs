pub mod commands;
pub mod input;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::Platform;
use crate::config::config;

#[derive(Parser)]
#[command(name = "skillmatch")]
#[command(about = "Skillmatch CLI - course and project catalogue client")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, signup and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Browse and edit courses")]
    Course {
        #[command(subcommand)]
        cmd: commands::course::CourseCommands,
    },

    #[command(about = "Browse projects and join groups")]
    Project {
        #[command(subcommand)]
        cmd: commands::project::ProjectCommands,
    },

    #[command(about = "Profile, skills and recommendations")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "Administration of users, courses and projects")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Local mock backend for development")]
    Mock {
        #[command(subcommand)]
        cmd: commands::mock::MockCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let platform = Platform::from_config(config());

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &platform, output_format).await,
        Commands::Course { cmd } => commands::course::handle(cmd, &platform, output_format).await,
        Commands::Project { cmd } => commands::project::handle(cmd, &platform, output_format).await,
        Commands::Profile { cmd } => commands::profile::handle(cmd, &platform, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, &platform, output_format).await,
        Commands::Mock { cmd } => commands::mock::handle(cmd, output_format).await,
    }
}
