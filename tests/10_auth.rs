mod common;

use anyhow::Result;
use serde_json::json;

use skillmatch::api::{Credentials, SignUpForm};
use skillmatch::mock::{fixtures::MOCK_TOKEN, MockState};
use skillmatch::types::UserType;
use skillmatch::PlatformError;

#[tokio::test]
async fn login_persists_session_and_authorizes_later_requests() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let grant = platform
        .login(&Credentials::new("z5255135@unsw.edu.au", "password123"))
        .await?;
    assert_eq!(grant.token, MOCK_TOKEN);
    assert_eq!(grant.user_type, "academic");

    let login = backend.state().last_request().expect("login was recorded");
    assert_eq!(login.method, "POST");
    assert_eq!(login.path, "/login");
    assert_eq!(
        login.body,
        Some(json!({"email": "z5255135@unsw.edu.au", "password": "password123"}))
    );
    assert_eq!(login.authorization, None);

    // the session survives on disk
    assert!(backend.session_file().exists());
    let reopened = backend.reopen();
    assert_eq!(reopened.session().token().as_deref(), Some(MOCK_TOKEN));
    assert!(reopened.session().can_add());

    reopened.list_courses().await?;
    let listing = backend.state().last_request().expect("listing was recorded");
    assert_eq!(listing.path, "/courses/academic");
    assert_eq!(
        listing.authorization.as_deref(),
        Some(format!("Bearer {}", MOCK_TOKEN).as_str())
    );
    Ok(())
}

#[tokio::test]
async fn signup_then_verify_grants_admin() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let form = SignUpForm {
        z_id: "z1234567".into(),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "z1234567@unsw.edu.au".into(),
        password: "password123".into(),
        confirmed_password: "password123".into(),
    };
    let message = platform.register(&form).await?;
    assert_eq!(message.message, "Successful registration, verify account now.");

    let sent = backend.state().last_request().expect("register was recorded");
    let body = sent.body.expect("register body");
    assert!(body.get("confirmedPassword").is_none());

    let record = platform.session().get().expect("pending signup");
    assert_eq!(record.get("zId"), Some(&json!("z1234567")));

    let grant = platform.verify_code("z1234567", "123456").await?;
    assert_eq!(grant.user_type, "admin");
    assert!(platform.session().is_admin());
    assert_eq!(platform.session().highest_user_type().as_deref(), Some("admin"));
    Ok(())
}

#[tokio::test]
async fn invalid_signup_never_reaches_backend() -> Result<()> {
    let backend = common::start_backend().await?;
    let form = SignUpForm {
        z_id: "1234567".into(),
        ..SignUpForm::default()
    };
    let err = backend.platform.register(&form).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid zID");
    assert!(backend.state().requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;
    platform
        .login(&Credentials::new("z5255135@unsw.edu.au", "password123"))
        .await?;

    backend.state().set_failing(true);
    let err = platform.logout().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error making POST request to /logout: Error: Fake mock server error."
    );
    assert!(platform.session().get().is_none());
    assert!(!backend.session_file().exists());
    Ok(())
}

#[tokio::test]
async fn failed_login_reports_backend_error() -> Result<()> {
    let backend = common::start_with(MockState::failing()).await?;
    let err = backend
        .platform
        .login(&Credentials::new("z5255135@unsw.edu.au", "password123"))
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Request(_)));
    assert_eq!(err.error_code(), "HTTP_ERROR");
    assert!(backend.platform.session().get().is_none());
    Ok(())
}

#[tokio::test]
async fn role_switch_changes_listing() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;
    platform.verify_code("z1234567", "123456").await?;

    platform.switch_user_type(UserType::Student)?;
    platform.list_courses().await?;
    let sent = backend.state().last_request().expect("listing was recorded");
    assert_eq!(sent.path, "/courses/student");
    Ok(())
}
