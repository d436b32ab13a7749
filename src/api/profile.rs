use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{query, segment, Platform, PlatformResult, ProfileCourse, ProfileIntro, ProfileSummary};
use crate::error::RequestError;
use crate::reload::Resource;
use crate::types::{HttpMethod, UserType};
use crate::validation::{validate_email, validate_profile_names};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileCourses {
    courses: Vec<ProfileCourse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Recommendations {
    students: Vec<Value>,
}

fn typed_path(user_type: UserType, rest: &str) -> String {
    format!("/{}{}", segment(user_type.as_str()), rest)
}

fn profile_course_body(z_id: &str, course: &ProfileCourse) -> Value {
    json!({
        "zID": z_id,
        "courseCode": course.course_code,
        "yearDate": course.year_date,
        "term": course.term,
    })
}

impl Platform {
    /// GET /user/profile, cached into the session's `profileData`
    pub async fn my_profile(&self) -> PlatformResult<ProfileSummary> {
        let raw = self.send(HttpMethod::Get, "/user/profile", None).await?;
        self.session().merge_profile_data(&raw)?;
        serde_json::from_value(raw).map_err(|e| {
            RequestError::Decode {
                method: HttpMethod::Get,
                path: "/user/profile".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Another user's profile as an admin sees it
    pub async fn profile_for(&self, z_id: &str) -> PlatformResult<ProfileSummary> {
        self.fetch(&format!("/user/profile{}", query("zID", z_id))).await
    }

    pub async fn public_profile(&self, user_type: UserType, z_id: &str) -> PlatformResult<Value> {
        let path = format!("/user/profile/{}{}", segment(user_type.as_str()), query("zID", z_id));
        self.send(HttpMethod::Get, &path, None).await
    }

    pub async fn edit_intro(&self, intro: &ProfileIntro) -> PlatformResult<Value> {
        intro.validate()?;
        let body = json!({
            "firstName": intro.first_name,
            "lastName": intro.last_name,
            "headline": intro.headline,
            "summary": intro.summary,
        });
        let response = self
            .send(HttpMethod::Put, "/user/profile/edit-intro", Some(&body))
            .await?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    /// Send the whole edited profile; on success it replaces the cached fields
    pub async fn set_account_preference(&self, profile: &Map<String, Value>) -> PlatformResult<Value> {
        let name = |key: &str| profile.get(key).and_then(Value::as_str).unwrap_or("");
        validate_profile_names(name("firstName"), name("lastName"))?;

        let body = Value::Object(profile.clone());
        let response = self
            .send(HttpMethod::Put, "/user/profile/setaccountpreference", Some(&body))
            .await?;
        self.session().merge_profile_data(&body)?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    pub async fn set_email(&self, email: &str) -> PlatformResult<Value> {
        validate_email(email)?;
        let body = json!({ "email": email });
        let response = self.send(HttpMethod::Put, "/auth/setemail", Some(&body)).await?;
        self.session().merge_profile_data(&body)?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    pub async fn set_privacy(&self, z_id: &str, private: bool) -> PlatformResult<Value> {
        let body = json!({ "zID": z_id, "private": private });
        let response = self
            .send(HttpMethod::Put, "/profile/edit/privacy", Some(&body))
            .await?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    /// Weighted skills aggregated from the user's courses
    pub async fn profile_skills(&self, user_type: UserType, z_id: &str) -> PlatformResult<Value> {
        let path = typed_path(user_type, &format!("/profile/skills{}", query("zID", z_id)));
        let mut response = self.send(HttpMethod::Get, &path, None).await?;
        Ok(response.get_mut("skills").map(Value::take).unwrap_or(Value::Null))
    }

    pub async fn profile_courses(
        &self,
        user_type: UserType,
        z_id: &str,
    ) -> PlatformResult<Vec<ProfileCourse>> {
        let path = typed_path(user_type, &format!("/course{}", query("zID", z_id)));
        let list: ProfileCourses = self.fetch(&path).await?;
        Ok(list.courses)
    }

    pub async fn add_profile_course(
        &self,
        user_type: UserType,
        z_id: &str,
        course: &ProfileCourse,
    ) -> PlatformResult<Value> {
        let path = typed_path(user_type, "/course/add");
        let response = self
            .send(HttpMethod::Post, &path, Some(&profile_course_body(z_id, course)))
            .await?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    pub async fn remove_profile_course(
        &self,
        user_type: UserType,
        z_id: &str,
        course: &ProfileCourse,
    ) -> PlatformResult<Value> {
        let path = typed_path(user_type, "/course/delete");
        let response = self
            .send(HttpMethod::Delete, &path, Some(&profile_course_body(z_id, course)))
            .await?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    /// Upload a parsed transcript; the backend adds every course on it
    pub async fn upload_transcript(
        &self,
        user_type: UserType,
        z_id: &str,
        transcript: Value,
    ) -> PlatformResult<Value> {
        let path = format!("/user/profile/{}/transcript", segment(user_type.as_str()));
        let body = json!({ "zID": z_id, "transcript": transcript });
        let response = self.send(HttpMethod::Post, &path, Some(&body)).await?;
        self.changed(&[Resource::Profile]);
        Ok(response)
    }

    /// Students with similar course history
    pub async fn recommended_users(&self, z_id: &str) -> PlatformResult<Vec<Value>> {
        let path = format!("/user/recommended-users{}", query("zID", z_id));
        let list: Recommendations = self.fetch(&path).await?;
        Ok(list.students)
    }
}
