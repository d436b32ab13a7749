mod common;

use anyhow::Result;
use serde_json::json;

use skillmatch::api::{CourseDraft, CourseKey};
use skillmatch::types::{WeightedEntry, UserType};
use skillmatch::{Query, Resource};

fn draft() -> CourseDraft {
    CourseDraft {
        name: "Data Structures and Algorithms".into(),
        code: "COMP2521".into(),
        year: json!("2024"),
        term: "T2".into(),
        school: "School of Computer Science and Engineering".into(),
        thumbnail: "https://example.com/dsa.png".into(),
        description: "Trees, graphs and complexity".into(),
        topics: vec!["graphs".into(), "hashing".into()],
        skills: vec![
            WeightedEntry::new("problem solving", 70i64),
            WeightedEntry::new("C", "50"),
        ],
        knowledge: vec![WeightedEntry::new("data structures", 90i64)],
    }
}

#[tokio::test]
async fn course_listing_and_detail() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let courses = platform.list_courses().await?;
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[1].code, "MATH101");

    let course = platform.course("COMP3900", Some((2022, "T2")), Some("1")).await?;
    assert_eq!(course.uoc, Some(12));
    assert_eq!(course.available_year_terms, vec![(2022, "T2".to_string()), (2023, "T3".to_string())]);
    assert_eq!(course.key(), Some(CourseKey::new("COMP3900", 2022, "T2")));
    let skills: Vec<&str> = course.skills.keys().map(String::as_str).collect();
    assert_eq!(skills, vec!["Swift", "Angular", "Python"]);

    let sent = backend.state().last_request().expect("detail was recorded");
    assert_eq!(sent.path, "/courses/COMP3900/2022/T2/1");
    Ok(())
}

#[tokio::test]
async fn saving_a_course_converts_weights_and_refreshes_queries() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;
    platform.verify_code("z1234567", "123456").await?;

    let mut listing = Query::new(Resource::Courses);
    let first = listing
        .load(platform.reload(), || platform.list_courses())
        .await?
        .len();
    assert_eq!(first, 2);
    assert!(!listing.is_stale(platform.reload()));

    platform.save_course(&draft()).await?;
    let sent = backend.state().last_request().expect("save was recorded");
    assert_eq!(sent.method, "PUT");
    assert_eq!(sent.path, "/courses/COMP2521/2024/T2");
    let body = sent.body.expect("course body");
    assert_eq!(body["year"], json!(2024));
    assert_eq!(body["skills"], json!({"problem solving": 70, "C": "50"}));
    assert_eq!(body["knowledge"], json!({"data structures": 90}));

    assert!(listing.is_stale(platform.reload()));
    let requests_before = backend.state().requests().len();
    listing
        .load(platform.reload(), || platform.list_courses())
        .await?;
    assert_eq!(backend.state().requests().len(), requests_before + 1);
    Ok(())
}

#[tokio::test]
async fn editing_targets_the_original_offering() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let course = platform.course("COMP3900", None, None).await?;
    let mut edit = CourseDraft::from_course(&course);
    edit.term = "T3".into();
    edit.thumbnail = "https://example.com/new.png".into();

    let original = course.key().expect("course has a current offering");
    platform.update_course(&original, &edit).await?;

    let sent = backend.state().last_request().expect("update was recorded");
    assert_eq!(sent.path, "/courses/COMP3900/2022/T2");
    let body = sent.body.expect("course body");
    assert_eq!(body["term"], "T3");
    assert_eq!(body["skills"]["Angular"], json!(30.44));
    Ok(())
}

#[tokio::test]
async fn imports_send_url_and_pdf() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let response = platform
        .import_course_url("https://www.handbook.unsw.edu.au/undergraduate/courses/2024/COMP1511")
        .await?;
    assert_eq!(response["message"], "Course updated successfully");

    platform.import_course_pdf(b"%PDF-1.4").await?;
    let sent = backend.state().last_request().expect("pdf was recorded");
    assert_eq!(sent.path, "/courses/pdf");
    assert_eq!(sent.body, Some(json!({"pdf": "data:application/pdf;base64,JVBERi0xLjQ="})));
    Ok(())
}

#[tokio::test]
async fn profile_course_listing_uses_role_prefix() -> Result<()> {
    let backend = common::start_backend().await?;
    let courses = backend
        .platform
        .profile_courses(UserType::Student, "z5255135")
        .await?;
    assert_eq!(courses[0].course_code, "COMP1511");
    let sent = backend.state().last_request().expect("request was recorded");
    assert_eq!(sent.path, "/student/course?zID=z5255135");
    Ok(())
}
