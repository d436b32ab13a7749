use std::path::PathBuf;

use clap::Subcommand;

use crate::api::{Platform, ProjectDraft};
use crate::cli::input::load_draft;
use crate::cli::utils::{
    output_collection, output_empty_collection, output_record, output_success, report,
};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects visible to the current user type")]
    List,

    #[command(about = "Show one project with its groups")]
    Show {
        #[arg(help = "Project id")]
        id: i64,
    },

    #[command(about = "Add a project from a JSON or YAML draft")]
    Add {
        #[arg(help = "Draft file")]
        file: PathBuf,
    },

    #[command(about = "Join a project group")]
    Join {
        #[arg(help = "Project id")]
        project: i64,
        #[arg(help = "Group id")]
        group: i64,
    },

    #[command(about = "Create a new group for a project")]
    CreateGroup {
        #[arg(help = "Project id")]
        project: i64,
        #[arg(help = "Group name")]
        name: String,
    },
}

pub async fn handle(
    cmd: ProjectCommands,
    platform: &Platform,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProjectCommands::List => {
            let projects = platform
                .list_projects()
                .await
                .map_err(|e| report(&output_format, e))?;
            if projects.is_empty() {
                return output_empty_collection(&output_format, "projects", "No projects found");
            }
            output_collection(&output_format, "projects", &projects, |p| {
                format!("{:>4}  {}  [{}]", p.id, p.name, p.knowledge.join(", "))
            })
        }
        ProjectCommands::Show { id } => {
            let project = platform
                .project(id)
                .await
                .map_err(|e| report(&output_format, e))?;
            if let OutputFormat::Text = output_format {
                println!("{} ({})", project.name, project.client.as_deref().unwrap_or("-"));
                for group in &project.groups {
                    println!("  group {:>4}  {}  {}", group.id, group.group_name, group.members.join(", "));
                }
                return Ok(());
            }
            output_record(&output_format, &project.name, &project)
        }
        ProjectCommands::Add { file } => {
            let draft: ProjectDraft = load_draft(&file)?;
            platform
                .create_project(&draft)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &format!("Project {} created", draft.name), None)
        }
        ProjectCommands::Join { project, group } => {
            platform
                .join_group(project, group)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &format!("Joined group {}", group), None)
        }
        ProjectCommands::CreateGroup { project, name } => {
            platform
                .create_group(project, &name)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &format!("Created group '{}'", name), None)
        }
    }
}
