use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    AdminCourseRow, AdminProjectRow, CourseKey, Dashboard, Platform, PlatformResult, UserRow,
};
use crate::client::fan_out;
use crate::reload::Resource;
use crate::types::{HttpMethod, UserType};
use crate::validation::validate_new_password;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Users {
    users: Vec<UserRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Courses {
    courses: Vec<AdminCourseRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Projects {
    projects: Vec<AdminProjectRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DashboardEnvelope {
    dashboard: Dashboard,
}

impl Platform {
    pub async fn dashboard(&self) -> PlatformResult<Dashboard> {
        let envelope: DashboardEnvelope = self.fetch("/admin/dashboard").await?;
        Ok(envelope.dashboard)
    }

    pub async fn all_users(&self) -> PlatformResult<Vec<UserRow>> {
        let list: Users = self.fetch("/admin/all-users").await?;
        Ok(list.users)
    }

    pub async fn all_courses(&self) -> PlatformResult<Vec<AdminCourseRow>> {
        let list: Courses = self.fetch("/admin/all-courses").await?;
        Ok(list.courses)
    }

    pub async fn all_projects(&self) -> PlatformResult<Vec<AdminProjectRow>> {
        let list: Projects = self.fetch("/admin/all-projects").await?;
        Ok(list.projects)
    }

    /// One DELETE per entry, sent concurrently. Any failure fails the whole call
    /// and nothing is signalled.
    async fn delete_all(
        &self,
        path: &str,
        bodies: Vec<Value>,
        changed: &[Resource],
    ) -> PlatformResult<Vec<Value>> {
        let client = self.client();
        let responses = fan_out(
            bodies
                .iter()
                .map(|body| client.request(HttpMethod::Delete, path, Some(body))),
        )
        .await?;
        self.changed(changed);
        Ok(responses)
    }

    pub async fn delete_users(&self, z_ids: &[String]) -> PlatformResult<Vec<Value>> {
        let bodies = z_ids.iter().map(|z| json!({ "zID": z })).collect();
        self.delete_all(
            "/admin/user/delete",
            bodies,
            &[Resource::Users, Resource::Dashboard],
        )
        .await
    }

    pub async fn delete_courses(&self, keys: &[CourseKey]) -> PlatformResult<Vec<Value>> {
        let bodies = keys
            .iter()
            .map(|k| json!({ "courseCode": k.code, "yearDate": k.year, "term": k.term }))
            .collect();
        self.delete_all(
            "/admin/course/delete",
            bodies,
            &[Resource::Courses, Resource::Dashboard],
        )
        .await
    }

    pub async fn delete_projects(&self, ids: &[i64]) -> PlatformResult<Vec<Value>> {
        let bodies = ids.iter().map(|id| json!({ "ID": id })).collect();
        self.delete_all(
            "/admin/project/delete",
            bodies,
            &[Resource::Projects, Resource::Dashboard],
        )
        .await
    }

    pub async fn set_user_type(&self, z_id: &str, user_type: UserType) -> PlatformResult<Value> {
        let body = json!({ "zId": z_id, "userType": user_type.as_str() });
        let response = self
            .send(HttpMethod::Put, "/admin/user/edit/usertype", Some(&body))
            .await?;
        self.changed(&[Resource::Users, Resource::Dashboard]);
        Ok(response)
    }

    pub async fn reset_password(&self, z_id: &str, new_password: &str) -> PlatformResult<Value> {
        validate_new_password(new_password)?;
        let body = json!({ "zID": z_id, "newPassword": new_password });
        self.send(HttpMethod::Put, "/admin/auth/passwordreset", Some(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::platform;
    use crate::client::tests::StubTransport;
    use crate::error::PlatformError;

    #[tokio::test]
    async fn bulk_delete_sends_one_request_each() {
        let transport = StubTransport::status(200, r#"{"message":"deleted"}"#);
        let platform = platform(transport.clone());
        let before = platform.reload().generation(Resource::Users);

        let ids = vec!["z1111111".to_string(), "z2222222".to_string()];
        let responses = platform.delete_users(&ids).await.unwrap();
        assert_eq!(responses.len(), 2);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|r| r.url.ends_with("/admin/user/delete")));
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"zID":"z1111111"}"#));
        drop(seen);
        assert!(platform.reload().generation(Resource::Users) > before);
    }

    #[tokio::test]
    async fn bulk_delete_failure_is_all_or_nothing() {
        let platform = platform(StubTransport::status(500, r#"{"error":"nope"}"#));
        let before = platform.reload().generation(Resource::Projects);
        let err = platform.delete_projects(&[1, 2, 3]).await.unwrap_err();
        match err {
            PlatformError::Batch(batch) => {
                assert_eq!(batch.failed, 3);
                assert_eq!(batch.total, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(platform.reload().generation(Resource::Projects), before);
    }

    #[tokio::test]
    async fn dashboard_is_unwrapped() {
        let platform = platform(StubTransport::status(
            200,
            r#"{"dashboard":{"userCount":{"student":4,"admin":1},"courseCount":7,"projectCount":2}}"#,
        ));
        let dashboard = platform.dashboard().await.unwrap();
        assert_eq!(dashboard.course_count, 7);
        assert_eq!(dashboard.user_count.get("student"), Some(&4));
    }

    #[tokio::test]
    async fn weak_password_reset_is_refused() {
        let transport = StubTransport::status(200, "{}");
        let platform = platform(transport.clone());
        assert!(platform.reset_password("z1234567", "short").await.is_err());
        assert!(transport.seen.lock().unwrap().is_empty());
    }
}
