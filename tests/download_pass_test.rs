use grablist::config::{Config, FolderLayout};
use grablist::list::AddOutcome;
use grablist::runner::Runner;
use std::fs;
use tempfile::tempdir;

fn runner_in(root: &std::path::Path) -> Runner {
    let layout = FolderLayout::new(root.to_path_buf());
    layout.ensure().unwrap();
    Runner::new(&Config::default(), layout).unwrap()
}

#[test]
fn test_layout_ensure_creates_full_tree() {
    let temp_dir = tempdir().unwrap();
    let layout = FolderLayout::new(temp_dir.path().to_path_buf());
    layout.ensure().unwrap();

    assert!(temp_dir.path().join("system").is_dir());
    assert!(temp_dir
        .path()
        .join("Downloads/Videos/Playlist Videos")
        .is_dir());
    assert!(temp_dir
        .path()
        .join("Downloads/Pictures/Wildberries")
        .is_dir());
}

#[test]
fn test_list_lifecycle_through_public_api() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());

    assert_eq!(
        runner.list().add("https://youtu.be/abc").unwrap(),
        AddOutcome::Added
    );
    assert_eq!(
        runner.list().add("https://youtu.be/abc").unwrap(),
        AddOutcome::AlreadyListed
    );
    assert_eq!(runner.list().load().unwrap(), vec!["https://youtu.be/abc"]);

    runner.list().clear().unwrap();
    assert!(runner.list().load().unwrap().is_empty());
}

#[test]
fn test_handler_name_lookup_for_pending_urls() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());

    assert_eq!(
        runner.handler_name_for("https://www.wildberries.ru/catalog/99/detail.aspx"),
        Some("wildberries_product")
    );
    assert_eq!(runner.handler_name_for("https://example.com/x"), None);
    assert_eq!(runner.handler_name_for("no scheme at all"), None);
}

#[tokio::test]
async fn test_empty_list_pass_is_a_no_op() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());
    fs::write(runner.list().path(), "").unwrap();

    let summary = runner.run(false).await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.completed, 0);
    assert!(summary.errors.is_empty());
}

#[tokio::test]
async fn test_unsupported_urls_are_counted_not_fatal() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());
    runner.list().add("https://example.com/page").unwrap();
    runner.list().add("https://vimeo.com/123").unwrap();

    let summary = runner.run(false).await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.unsupported, 2);
    assert_eq!(summary.completed, 0);
    assert!(summary.errors.is_empty());
    assert!(!summary.is_clean());

    // The pass still clears the list, matching the download-and-forget flow
    assert!(runner.list().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_keep_flag_preserves_the_list() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());
    runner.list().add("https://example.com/page").unwrap();

    runner.run(true).await.unwrap();
    assert_eq!(runner.list().load().unwrap(), vec!["https://example.com/page"]);
}

#[tokio::test]
async fn test_unparseable_lines_are_reported_as_errors() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());
    // `add` would reject this, but a hand-edited list can contain anything
    fs::create_dir_all(runner.list().path().parent().unwrap()).unwrap();
    fs::write(runner.list().path(), "https://\n").unwrap();

    let summary = runner.run(false).await.unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.completed, 0);
}

#[tokio::test]
async fn test_missing_list_file_fails_the_pass() {
    let temp_dir = tempdir().unwrap();
    let runner = runner_in(temp_dir.path());
    // ensure() creates system/ but not the list file itself
    assert!(runner.run(false).await.is_err());
}
