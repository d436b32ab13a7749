use serde_json::json;

use super::{AuthGrant, Credentials, Message, Platform, PlatformResult, SignUpForm};
use crate::reload::Resource;
use crate::session::{HIGHEST_USER_TYPE, TOKEN, USER_TYPE};
use crate::types::{HttpMethod, UserType};

impl Platform {
    /// POST /login; the granted role becomes both current and highest user type
    pub async fn login(&self, credentials: &Credentials) -> PlatformResult<AuthGrant> {
        credentials.validate()?;
        let body = json!({ "email": credentials.email, "password": credentials.password });
        let grant: AuthGrant = self.send_as(HttpMethod::Post, "/login", &body).await?;
        self.store_grant(&grant)?;
        tracing::info!(user_type = %grant.user_type, "logged in");
        Ok(grant)
    }

    /// POST /register; only the zID is remembered until the account is verified
    pub async fn register(&self, form: &SignUpForm) -> PlatformResult<Message> {
        form.validate()?;
        let message: Message = self
            .send_as(HttpMethod::Post, "/register", &form.to_payload())
            .await?;
        self.session().set(json!({ "zId": form.z_id }))?;
        Ok(message)
    }

    /// POST /verifyCode with the emailed code
    pub async fn verify_code(&self, z_id: &str, code: &str) -> PlatformResult<AuthGrant> {
        let body = json!({ "zId": z_id, "code": code });
        let grant: AuthGrant = self.send_as(HttpMethod::Post, "/verifyCode", &body).await?;
        self.store_grant(&grant)?;
        tracing::info!(user_type = %grant.user_type, "account verified");
        Ok(grant)
    }

    /// POST /logout. The local session is cleared whether or not the backend answered.
    pub async fn logout(&self) -> PlatformResult<()> {
        let result = self.send(HttpMethod::Post, "/logout", None).await;
        self.session().clear()?;
        self.reload.signal_all();
        result.map(|_| ())
    }

    /// Act as another role; only roles at or below the highest granted one make sense
    pub fn switch_user_type(&self, user_type: UserType) -> PlatformResult<()> {
        self.session().set_user_type(user_type)?;
        self.changed(&[Resource::Courses, Resource::Projects]);
        Ok(())
    }

    fn store_grant(&self, grant: &AuthGrant) -> PlatformResult<()> {
        self.session().set(json!({
            HIGHEST_USER_TYPE: grant.user_type,
            USER_TYPE: grant.user_type,
            TOKEN: grant.token,
        }))?;
        Ok(())
    }
}
