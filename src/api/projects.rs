use serde::Deserialize;
use serde_json::{json, Value};

use super::{query, Platform, PlatformResult, Project, ProjectDraft, ProjectSummary};
use crate::error::{PlatformError, RequestError};
use crate::reload::Resource;
use crate::transform::sort_knowledge_descending;
use crate::types::HttpMethod;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProjectList {
    projects: Vec<Value>,
}

fn decode_projects(path: &str, raw: Vec<Value>) -> PlatformResult<Vec<ProjectSummary>> {
    sort_knowledge_descending(raw)
        .into_iter()
        // the backend pads empty listings with `{}`
        .filter(|p| p.as_object().map_or(false, |o| !o.is_empty()))
        .map(|p| {
            serde_json::from_value(p).map_err(|e| {
                PlatformError::Request(RequestError::Decode {
                    method: HttpMethod::Get,
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            })
        })
        .collect()
}

impl Platform {
    /// Project cards with knowledge names ranked heaviest first
    pub async fn list_projects(&self) -> PlatformResult<Vec<ProjectSummary>> {
        let audience = if self.session().can_add() { "academic" } else { "student" };
        let path = format!("/projects/{}", audience);
        let list: RawProjectList = self.fetch(&path).await?;
        decode_projects(&path, list.projects)
    }

    pub async fn project(&self, id: i64) -> PlatformResult<Project> {
        self.fetch(&format!("/projects/{}", id)).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> PlatformResult<Value> {
        draft.validate()?;
        let response = self
            .send(HttpMethod::Post, "/projects", Some(&draft.to_payload()))
            .await?;
        self.changed(&[Resource::Projects, Resource::Dashboard]);
        Ok(response)
    }

    pub async fn join_group(&self, project_id: i64, group_id: i64) -> PlatformResult<Value> {
        let path = format!("/projects/join/{}/{}", project_id, group_id);
        let response = self.send(HttpMethod::Put, &path, None).await?;
        self.changed(&[Resource::Projects]);
        Ok(response)
    }

    pub async fn create_group(&self, project_id: i64, group_name: &str) -> PlatformResult<Value> {
        let path = format!("/projects/groupCreate/{}", project_id);
        let body = json!({ "groupName": group_name });
        let response = self.send(HttpMethod::Post, &path, Some(&body)).await?;
        self.changed(&[Resource::Projects]);
        Ok(response)
    }

    /// Whether the logged-in user already belongs to one of the project's groups
    pub async fn is_member(&self, project: &Project) -> PlatformResult<bool> {
        let profile = self.my_profile().await?;
        Ok(project.is_member(&profile.z_id))
    }

    /// Projects a student has joined
    pub async fn student_projects(&self, z_id: &str) -> PlatformResult<Vec<ProjectSummary>> {
        let path = format!("/student/projects{}", query("zID", z_id));
        let list: RawProjectList = self.fetch(&path).await?;
        decode_projects(&path, list.projects)
    }
}
