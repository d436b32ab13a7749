use clap::Subcommand;
use serde_json::json;

use crate::api::Platform;
use crate::cli::utils::{
    output_collection, output_empty_collection, output_record, output_success, report,
};
use crate::cli::OutputFormat;
use crate::types::UserType;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show your profile, or another user's")]
    Show {
        #[arg(long, help = "zID of another user")]
        z_id: Option<String>,
        #[arg(long, requires = "z_id", help = "Show the public profile for this user type")]
        user_type: Option<UserType>,
    },

    #[command(about = "Skills gathered from a user's courses")]
    Skills {
        #[arg(long, help = "zID (defaults to yours)")]
        z_id: Option<String>,
        #[arg(long, help = "User type (defaults to the current one)")]
        user_type: Option<UserType>,
    },

    #[command(about = "Courses listed on a profile")]
    Courses {
        #[arg(long, help = "zID (defaults to yours)")]
        z_id: Option<String>,
        #[arg(long, help = "User type (defaults to the current one)")]
        user_type: Option<UserType>,
    },

    #[command(about = "Students with a similar course history")]
    Similar {
        #[arg(long, help = "zID (defaults to yours)")]
        z_id: Option<String>,
    },

    #[command(about = "Change your email address")]
    SetEmail {
        #[arg(help = "New email address")]
        email: String,
    },

    #[command(about = "Make your profile private or public")]
    SetPrivacy {
        #[arg(long, help = "Hide the profile from other users")]
        private: bool,
    },
}

pub async fn handle(
    cmd: ProfileCommands,
    platform: &Platform,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProfileCommands::Show { z_id, user_type } => {
            let profile = match (z_id, user_type) {
                (Some(z_id), Some(user_type)) => platform
                    .public_profile(user_type, &z_id)
                    .await
                    .map_err(|e| report(&output_format, e))?,
                (Some(z_id), None) => serde_json::to_value(
                    platform
                        .profile_for(&z_id)
                        .await
                        .map_err(|e| report(&output_format, e))?,
                )?,
                (None, _) => serde_json::to_value(
                    platform
                        .my_profile()
                        .await
                        .map_err(|e| report(&output_format, e))?,
                )?,
            };
            output_record(&output_format, "Profile", &profile)
        }
        ProfileCommands::Skills { z_id, user_type } => {
            let z_id = resolve_z_id(platform, z_id, &output_format).await?;
            let user_type = resolve_user_type(platform, user_type);
            let skills = platform
                .profile_skills(user_type, &z_id)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_record(&output_format, &format!("Skills of {}", z_id), &skills)
        }
        ProfileCommands::Courses { z_id, user_type } => {
            let z_id = resolve_z_id(platform, z_id, &output_format).await?;
            let user_type = resolve_user_type(platform, user_type);
            let courses = platform
                .profile_courses(user_type, &z_id)
                .await
                .map_err(|e| report(&output_format, e))?;
            if courses.is_empty() {
                return output_empty_collection(&output_format, "courses", "No courses on this profile");
            }
            output_collection(&output_format, "courses", &courses, |c| {
                format!("{:<10} {} {}", c.course_code, c.year_date, c.term)
            })
        }
        ProfileCommands::Similar { z_id } => {
            let z_id = resolve_z_id(platform, z_id, &output_format).await?;
            let students = platform
                .recommended_users(&z_id)
                .await
                .map_err(|e| report(&output_format, e))?;
            if students.is_empty() {
                return output_empty_collection(&output_format, "students", "No similar students found");
            }
            output_collection(&output_format, "students", &students, |s| {
                let field = |key: &str| s.get(key).and_then(|v| v.as_str()).unwrap_or("").to_string();
                format!("{}  {} {}", field("zID"), field("firstName"), field("lastName"))
            })
        }
        ProfileCommands::SetEmail { email } => {
            platform
                .set_email(&email)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &format!("Email changed to {}", email), None)
        }
        ProfileCommands::SetPrivacy { private } => {
            let z_id = resolve_z_id(platform, None, &output_format).await?;
            platform
                .set_privacy(&z_id, private)
                .await
                .map_err(|e| report(&output_format, e))?;
            let state = if private { "private" } else { "public" };
            output_success(
                &output_format,
                &format!("Profile is now {}", state),
                Some(json!({ "private": private })),
            )
        }
    }
}

/// Explicit zID, else the cached profile, else a fresh profile fetch
async fn resolve_z_id(
    platform: &Platform,
    z_id: Option<String>,
    output_format: &OutputFormat,
) -> anyhow::Result<String> {
    if let Some(z_id) = z_id {
        return Ok(z_id);
    }
    let cached = platform.session().get().and_then(|record| {
        let profile = record.profile_data()?;
        profile
            .get("zID")
            .or_else(|| profile.get("zId"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    });
    match cached {
        Some(z_id) => Ok(z_id),
        None => {
            let profile = platform
                .my_profile()
                .await
                .map_err(|e| report(output_format, e))?;
            Ok(profile.z_id)
        }
    }
}

fn resolve_user_type(platform: &Platform, user_type: Option<UserType>) -> UserType {
    user_type
        .or_else(|| platform.session().user_type().and_then(|t| t.parse().ok()))
        .unwrap_or(UserType::Student)
}
