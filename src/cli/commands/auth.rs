use clap::Subcommand;
use serde_json::json;

use crate::api::{Credentials, Platform, SignUpForm};
use crate::cli::utils::{output_record, output_success, report};
use crate::cli::OutputFormat;
use crate::types::UserType;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Create an account; a verification code is emailed")]
    Signup {
        #[arg(help = "zID, e.g. z1234567")]
        z_id: String,
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long, help = "Email address")]
        email: String,
        #[arg(long, help = "Password (at least 8 characters)")]
        password: String,
        #[arg(long, help = "Password again")]
        confirm_password: String,
    },

    #[command(about = "Verify a new account with the emailed code")]
    Verify {
        #[arg(help = "zID the account was registered with (defaults to the last signup)")]
        z_id: Option<String>,
        #[arg(long, help = "Verification code")]
        code: String,
    },

    #[command(about = "Logout and forget the local session")]
    Logout,

    #[command(about = "Show the stored session")]
    Status,

    #[command(about = "Show the logged-in user's profile")]
    Whoami,

    #[command(about = "Act as another user type, e.g. student or academic")]
    UseType {
        #[arg(help = "User type")]
        user_type: UserType,
    },
}

pub async fn handle(
    cmd: AuthCommands,
    platform: &Platform,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let grant = platform
                .login(&Credentials::new(email, password))
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Logged in as {}", grant.user_type),
                Some(json!({ "userType": grant.user_type })),
            )
        }
        AuthCommands::Signup {
            z_id,
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                z_id,
                first_name,
                last_name,
                email,
                password,
                confirmed_password: confirm_password,
            };
            let message = platform
                .register(&form)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, &message.message, None)
        }
        AuthCommands::Verify { z_id, code } => {
            let z_id = match z_id.or_else(|| pending_signup(platform)) {
                Some(z_id) => z_id,
                None => anyhow::bail!("No zID given and no pending signup found"),
            };
            let grant = platform
                .verify_code(&z_id, &code)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Account verified, logged in as {}", grant.user_type),
                Some(json!({ "userType": grant.user_type })),
            )
        }
        AuthCommands::Logout => {
            platform
                .logout()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => match platform.session().get() {
            Some(record) if record.token().is_some() => {
                output_record(&output_format, "Logged in", &record)
            }
            _ => output_success(&output_format, "Not logged in", Some(json!({ "session": null }))),
        },
        AuthCommands::Whoami => {
            let profile = platform
                .my_profile()
                .await
                .map_err(|e| report(&output_format, e))?;
            output_record(
                &output_format,
                &format!("{} {} ({})", profile.first_name, profile.last_name, profile.z_id),
                &profile,
            )
        }
        AuthCommands::UseType { user_type } => {
            platform
                .switch_user_type(user_type)
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Now acting as {}", user_type),
                Some(json!({ "userType": user_type.as_str() })),
            )
        }
    }
}

fn pending_signup(platform: &Platform) -> Option<String> {
    platform
        .session()
        .get()
        .and_then(|r| r.get("zId").and_then(|v| v.as_str()).map(str::to_string))
}
