use clap::Subcommand;
use serde_json::json;

use crate::api::{CourseKey, Platform};
use crate::cli::utils::{output_collection, output_record, output_success, report};
use crate::cli::OutputFormat;
use crate::types::UserType;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "User, course and project counts")]
    Dashboard,

    #[command(about = "List every user")]
    Users,

    #[command(about = "List every course offering")]
    Courses,

    #[command(about = "List every project")]
    Projects,

    #[command(about = "Delete users by zID")]
    DeleteUsers {
        #[arg(required = true, help = "zIDs to delete")]
        z_ids: Vec<String>,
    },

    #[command(about = "Delete course offerings given as CODE:YEAR:TERM")]
    DeleteCourses {
        #[arg(required = true, value_parser = parse_course_key, help = "Offerings, e.g. COMP1511:2023:T1")]
        offerings: Vec<CourseKey>,
    },

    #[command(about = "Delete projects by id")]
    DeleteProjects {
        #[arg(required = true, help = "Project ids")]
        ids: Vec<i64>,
    },

    #[command(about = "Change a user's type")]
    SetUserType {
        #[arg(help = "zID")]
        z_id: String,
        #[arg(help = "New user type")]
        user_type: UserType,
    },

    #[command(about = "Reset a user's password")]
    ResetPassword {
        #[arg(help = "zID")]
        z_id: String,
        #[arg(long, help = "New password (at least 8 characters)")]
        password: String,
    },
}

/// `CODE:YEAR:TERM`
pub fn parse_course_key(raw: &str) -> Result<CourseKey, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    match parts.as_slice() {
        [code, year, term] if !code.is_empty() && !term.is_empty() => {
            let year = year
                .parse::<i64>()
                .map_err(|_| format!("invalid year '{}' in '{}'", year, raw))?;
            Ok(CourseKey::new(*code, year, *term))
        }
        _ => Err(format!("expected CODE:YEAR:TERM, got '{}'", raw)),
    }
}

pub async fn handle(
    cmd: AdminCommands,
    platform: &Platform,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Dashboard => {
            let dashboard = platform
                .dashboard()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_record(&output_format, "Dashboard", &dashboard)
        }
        AdminCommands::Users => {
            let users = platform
                .all_users()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_collection(&output_format, "users", &users, |u| {
                format!(
                    "{}  {} {}  {}  [{}]",
                    u.z_id,
                    u.first_name,
                    u.last_name,
                    u.email,
                    u.user_type.join(", ")
                )
            })
        }
        AdminCommands::Courses => {
            let courses = platform
                .all_courses()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_collection(&output_format, "courses", &courses, |c| {
                format!("{:<10} {} {}  {}", c.course_code, c.year_date, c.term, c.course_name)
            })
        }
        AdminCommands::Projects => {
            let projects = platform
                .all_projects()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_collection(&output_format, "projects", &projects, |p| {
                format!("{:>4}  {}  ({})", p.id, p.project_name, p.client)
            })
        }
        AdminCommands::DeleteUsers { z_ids } => {
            platform
                .delete_users(&z_ids)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Deleted {} user(s)", z_ids.len()),
                Some(json!({ "deleted": z_ids })),
            )
        }
        AdminCommands::DeleteCourses { offerings } => {
            platform
                .delete_courses(&offerings)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Deleted {} course offering(s)", offerings.len()),
                Some(json!({ "deleted": offerings })),
            )
        }
        AdminCommands::DeleteProjects { ids } => {
            platform
                .delete_projects(&ids)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Deleted {} project(s)", ids.len()),
                Some(json!({ "deleted": ids })),
            )
        }
        AdminCommands::SetUserType { z_id, user_type } => {
            platform
                .set_user_type(&z_id, user_type)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("{} is now {}", z_id, user_type),
                None,
            )
        }
        AdminCommands::ResetPassword { z_id, password } => {
            platform
                .reset_password(&z_id, &password)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &format!("Password reset for {}", z_id), None)
        }
    }
}
