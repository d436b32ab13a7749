use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use super::{
    models::CourseList, segment, Course, CourseDraft, CourseKey, CourseSummary, Platform,
    PlatformResult,
};
use crate::reload::Resource;
use crate::types::HttpMethod;

pub const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Embed raw PDF bytes in a data URL
pub fn pdf_data_url(bytes: &[u8]) -> String {
    format!("{}{}", PDF_DATA_URL_PREFIX, STANDARD.encode(bytes))
}

/// `/courses/{code}[/{year}/{term}][/{version}]`
pub fn course_path(code: &str, year_term: Option<(i64, &str)>, version: Option<&str>) -> String {
    let mut path = format!("/courses/{}", segment(code));
    if let Some((year, term)) = year_term {
        path.push_str(&format!("/{}/{}", year, segment(term)));
    }
    if let Some(version) = version {
        path.push_str(&format!("/{}", segment(version)));
    }
    path
}

fn offering_path(key: &CourseKey) -> String {
    course_path(&key.code, Some((key.year, &key.term)), None)
}

impl Platform {
    /// Academics and admins see the academic listing, everyone else the student one
    pub async fn list_courses(&self) -> PlatformResult<Vec<CourseSummary>> {
        let audience = if self.session().can_add() { "academic" } else { "student" };
        let list: CourseList = self.fetch(&format!("/courses/{}", audience)).await?;
        Ok(list.courses)
    }

    pub async fn course(
        &self,
        code: &str,
        year_term: Option<(i64, &str)>,
        version: Option<&str>,
    ) -> PlatformResult<Course> {
        self.fetch(&course_path(code, year_term, version)).await
    }

    /// Create (or overwrite) the offering the draft names
    pub async fn save_course(&self, draft: &CourseDraft) -> PlatformResult<Value> {
        draft.validate()?;
        let key = draft.key()?;
        let payload = draft.to_payload()?;
        let response = self.send(HttpMethod::Put, &offering_path(&key), Some(&payload)).await?;
        self.changed(&[Resource::Courses, Resource::Dashboard]);
        Ok(response)
    }

    /// Edit an offering in place. The request goes to `original`, so code, year
    /// and term may all change.
    pub async fn update_course(&self, original: &CourseKey, draft: &CourseDraft) -> PlatformResult<Value> {
        draft.validate()?;
        let payload = draft.to_payload()?;
        let response = self
            .send(HttpMethod::Put, &offering_path(original), Some(&payload))
            .await?;
        self.changed(&[Resource::Courses]);
        Ok(response)
    }

    /// Ask the backend to scrape a handbook page
    pub async fn import_course_url(&self, url: &str) -> PlatformResult<Value> {
        let response = self
            .send(HttpMethod::Put, "/courses/url", Some(&json!({ "url": url })))
            .await?;
        self.changed(&[Resource::Courses, Resource::Dashboard]);
        Ok(response)
    }

    pub async fn import_course_pdf(&self, pdf: &[u8]) -> PlatformResult<Value> {
        let body = json!({ "pdf": pdf_data_url(pdf) });
        let response = self.send(HttpMethod::Put, "/courses/pdf", Some(&body)).await?;
        self.changed(&[Resource::Courses, Resource::Dashboard]);
        Ok(response)
    }
}
