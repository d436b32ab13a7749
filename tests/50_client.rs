mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use skillmatch::types::{HttpMethod, UserType};
use skillmatch::{ApiClient, RequestError, Resource, SessionStore};

#[tokio::test]
async fn unknown_route_surfaces_backend_error() -> Result<()> {
    let backend = common::start_backend().await?;
    let client = backend.platform.client();

    let value = client.call(HttpMethod::Get, "/does/not/exist", None).await;
    assert_eq!(
        value,
        json!({"error": "Error making GET request to /does/not/exist: Error: Not found"})
    );

    let err = client
        .request(HttpMethod::Get, "/does/not/exist", None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    Ok(())
}

#[tokio::test]
async fn empty_object_body_is_still_sent() -> Result<()> {
    let backend = common::start_backend().await?;
    let client = backend.platform.client();
    client
        .request(HttpMethod::Post, "/logout", Some(&json!({})))
        .await?;
    let sent = backend.state().last_request().expect("logout was recorded");
    assert_eq!(sent.body, Some(json!({})));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_never_panics() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let client = ApiClient::new(
        format!("http://127.0.0.1:{}", port),
        Arc::new(SessionStore::in_memory()),
    );
    let value = client.call(HttpMethod::Put, "/courses/url", Some(&json!({"url": "x"}))).await;
    let message = value["error"].as_str().expect("error message");
    assert!(message.starts_with("Error making PUT request to /courses/url: "));
    Ok(())
}

#[tokio::test]
async fn cancelled_request_stops_waiting() -> Result<()> {
    let backend = common::start_backend().await?;
    let client = backend.platform.client().clone();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        canceller.cancel();
    });
    token.cancelled().await;

    let err = client
        .request_cancellable(&token, HttpMethod::Get, "/courses/student", None)
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::Cancelled { .. }));
    assert!(err.to_string().contains("GET"));
    Ok(())
}

#[tokio::test]
async fn subscribers_see_mutations() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;
    let mut profile_changes = platform.reload().subscribe(Resource::Profile);

    platform.set_privacy("z5255135", true).await?;
    tokio::time::timeout(Duration::from_secs(1), profile_changes.changed()).await??;

    platform
        .add_profile_course(
            UserType::Student,
            "z5255135",
            &skillmatch::api::ProfileCourse {
                course_code: "COMP1531".into(),
                year_date: 2022,
                term: "T1".into(),
            },
        )
        .await?;
    let sent = backend.state().last_request().expect("add was recorded");
    assert_eq!(sent.path, "/student/course/add");
    assert_eq!(
        sent.body,
        Some(json!({"zID": "z5255135", "courseCode": "COMP1531", "yearDate": 2022, "term": "T1"}))
    );
    Ok(())
}
