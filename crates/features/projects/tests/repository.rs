#![cfg(feature = "server")]

use lpad_domain::{Fragments, ProjectId, ProjectName};
use lpad_projects::server::{ProjectError, ProjectRepository};
use lpad_storage::Storage;
use tempfile::TempDir;

async fn repository(temp: &TempDir) -> ProjectRepository {
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    ProjectRepository::new(storage)
}

fn name(value: &str) -> ProjectName {
    ProjectName::parse(value).unwrap()
}

#[tokio::test]
async fn create_assigns_a_safe_id_and_persists() {
    let temp = TempDir::new().unwrap();
    let repo = repository(&temp).await;

    let project = repo.create(name("Demo"), Fragments::new("<p>hi</p>", "", "")).await.unwrap();

    assert_eq!(project.id.as_str().len(), 12);
    assert!(temp.path().join(format!("projects/{}.json", project.id)).is_file());
    assert_eq!(repo.get(&project.id).await.unwrap(), project);
}

#[tokio::test]
async fn update_replaces_fragments_and_keeps_the_name() {
    let temp = TempDir::new().unwrap();
    let repo = repository(&temp).await;
    let project = repo.create(name("Demo"), Fragments::new("a", "b", "c")).await.unwrap();

    repo.update(&project.id, Fragments::new("x", "", "")).await.unwrap();

    let stored = repo.get(&project.id).await.unwrap();
    assert_eq!(stored.name.as_str(), "Demo");
    assert_eq!(stored.fragments, Fragments::new("x", "", ""));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let temp = TempDir::new().unwrap();
    let repo = repository(&temp).await;
    let id = ProjectId::parse("nope").unwrap();

    assert!(matches!(repo.get(&id).await, Err(ProjectError::NotFound { .. })));
    assert!(matches!(repo.update(&id, Fragments::default()).await, Err(ProjectError::NotFound { .. })));
    assert!(matches!(repo.delete(&id).await, Err(ProjectError::NotFound { .. })));
}

#[tokio::test]
async fn list_is_sorted_and_skips_damaged_documents() {
    let temp = TempDir::new().unwrap();
    let repo = repository(&temp).await;
    assert!(repo.list().await.unwrap().is_empty());

    repo.create(name("beta"), Fragments::default()).await.unwrap();
    let alpha = repo.create(name("alpha"), Fragments::default()).await.unwrap();
    std::fs::write(temp.path().join("projects/broken.json"), b"{not json").unwrap();
    std::fs::write(temp.path().join("projects/bad name.json"), b"{}").unwrap();

    let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["alpha", "beta"]);

    repo.delete(&alpha.id).await.unwrap();
    assert_eq!(repo.list().await.unwrap().len(), 1);
}
