mod common;

use anyhow::Result;
use serde_json::json;

use skillmatch::api::ProjectDraft;
use skillmatch::types::WeightedEntry;
use skillmatch::validation::ValidationError;
use skillmatch::{PlatformError, Resource};

#[tokio::test]
async fn project_cards_rank_knowledge() -> Result<()> {
    let backend = common::start_backend().await?;
    let projects = backend.platform.list_projects().await?;
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].knowledge, vec!["JavaScript", "React"]);
    assert_eq!(projects[2].knowledge, vec!["JavaScript", "Vue.js", "Firebase"]);
    Ok(())
}

#[tokio::test]
async fn membership_is_checked_against_own_profile() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let project = platform.project(1).await?;
    assert_eq!(project.groups.len(), 2);
    assert_eq!(project.percentage_match, Some(50.0));
    // the canned profile is z5255135, a member of "best group"
    assert!(platform.is_member(&project).await?);

    let record = platform.session().get().expect("profile was cached");
    assert_eq!(record.profile_data().expect("profile data")["firstName"], "James");
    Ok(())
}

#[tokio::test]
async fn joining_and_creating_groups() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;
    let generation = platform.reload().generation(Resource::Projects);

    let joined = platform.join_group(1, 72).await?;
    assert_eq!(joined["message"], "User joined group");
    let sent = backend.state().last_request().expect("join was recorded");
    assert_eq!((sent.method.as_str(), sent.path.as_str()), ("PUT", "/projects/join/1/72"));

    platform.create_group(1, "night owls").await?;
    let sent = backend.state().last_request().expect("create was recorded");
    assert_eq!(sent.path, "/projects/groupCreate/1");
    assert_eq!(sent.body, Some(json!({"groupName": "night owls"})));

    assert_eq!(platform.reload().generation(Resource::Projects), generation + 2);
    Ok(())
}

#[tokio::test]
async fn creating_a_project_validates_first() -> Result<()> {
    let backend = common::start_backend().await?;
    let platform = &backend.platform;

    let mut draft = ProjectDraft {
        name: "Study Planner".into(),
        client: "UNSW".into(),
        thumbnail: "https://example.com/p.png".into(),
        requirements: "COMP1531".into(),
        scope: "Timetable builder".into(),
        outcomes: "A working planner".into(),
        topics: vec!["scheduling".into()],
        skills: vec![WeightedEntry::new("teamwork", 50i64)],
        knowledge: vec![WeightedEntry::new("React", 0i64)],
    };

    let err = platform.create_project(&draft).await.unwrap_err();
    assert!(matches!(
        err,
        PlatformError::Validation(ValidationError::IncompleteKnowledge)
    ));
    assert!(backend.state().requests().is_empty());

    draft.knowledge = vec![WeightedEntry::new("React", 40i64)];
    platform.create_project(&draft).await?;
    let sent = backend.state().last_request().expect("create was recorded");
    assert_eq!(sent.path, "/projects");
    assert_eq!(sent.body.expect("project body")["knowledge"], json!({"React": 40}));
    Ok(())
}

#[tokio::test]
async fn student_projects_by_zid() -> Result<()> {
    let backend = common::start_backend().await?;
    let projects = backend.platform.student_projects("z5255135").await?;
    assert_eq!(projects.len(), 3);
    let sent = backend.state().last_request().expect("request was recorded");
    assert_eq!(sent.path, "/student/projects?zID=z5255135");
    Ok(())
}
