use git2::Repository;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use nextver::error::NextverError;
use nextver::tag;

// Helper to set up a temporary git repo with one commit
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");

    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let content_path = temp_dir.path().join("README.md");
    fs::write(&content_path, b"Initial content\n").expect("Could not write initial file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    repo.commit(
        Some("HEAD"),
        &repo.signature().expect("Could not get sig"),
        &repo.signature().expect("Could not get sig"),
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Could not create commit");

    temp_dir
}

fn has_tag(repo_path: &Path, name: &str) -> bool {
    let repo = Repository::open(repo_path).expect("Could not open repo");
    let found = repo.find_reference(&format!("refs/tags/{}", name)).is_ok();
    found
}

#[test]
fn test_create_tag_at_head() {
    let temp_dir = setup_test_repo();

    tag::create(temp_dir.path(), "v1.0.0", tag::DEFAULT_BRANCH).expect("Tagging should succeed");
    assert!(has_tag(temp_dir.path(), "v1.0.0"));
}

#[test]
fn test_create_tag_twice_fails() {
    let temp_dir = setup_test_repo();

    tag::create(temp_dir.path(), "v1.0.0", tag::DEFAULT_BRANCH).expect("Tagging should succeed");
    let err = tag::create(temp_dir.path(), "v1.0.0", tag::DEFAULT_BRANCH).unwrap_err();
    assert!(matches!(err, NextverError::TagCreation { .. }));
}

#[test]
fn test_missing_branch_fails() {
    let temp_dir = setup_test_repo();

    let err = tag::create(temp_dir.path(), "v1.0.0", "feature/missing").unwrap_err();
    assert!(matches!(err, NextverError::BranchNotFound(_)));
}

#[test]
fn test_tagging_a_named_branch_checks_it_out() {
    let temp_dir = setup_test_repo();

    {
        let repo = Repository::open(temp_dir.path()).expect("Could not open repo");
        let head = repo
            .head()
            .expect("Could not get HEAD")
            .peel_to_commit()
            .expect("Could not peel HEAD");
        repo.branch("develop", &head, false)
            .expect("Could not create branch");
    }

    tag::create(temp_dir.path(), "v1.1.0", "develop").expect("Tagging should succeed");
    assert!(has_tag(temp_dir.path(), "v1.1.0"));

    let repo = Repository::open(temp_dir.path()).expect("Could not open repo");
    let head = repo.head().expect("Could not get HEAD");
    assert_eq!(head.name(), Some("refs/heads/develop"));
}

#[test]
fn test_dirty_working_tree_blocks_branch_switch() {
    let temp_dir = setup_test_repo();

    let head_before = {
        let repo = Repository::open(temp_dir.path()).expect("Could not open repo");
        let first = repo
            .head()
            .expect("Could not get HEAD")
            .peel_to_commit()
            .expect("Could not peel HEAD");

        // "develop" stays on the first commit while the current branch
        // moves on with a different README
        repo.branch("develop", &first, false)
            .expect("Could not create branch");

        let content_path = temp_dir.path().join("README.md");
        fs::write(&content_path, b"Second content\n").expect("Could not write updated file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");

        repo.commit(
            Some("HEAD"),
            &repo.signature().expect("Could not get sig"),
            &repo.signature().expect("Could not get sig"),
            "Update README",
            &tree,
            &[&first],
        )
        .expect("Could not create commit");

        // Uncommitted local edit that a switch to "develop" would clobber
        fs::write(&content_path, b"local uncommitted\n")
            .expect("Could not write local edit");

        let head_name = repo
            .head()
            .expect("Could not get HEAD")
            .name()
            .expect("HEAD should have a name")
            .to_string();
        head_name
    };

    let err = tag::create(temp_dir.path(), "v9.9.9", "develop").unwrap_err();
    assert!(matches!(err, NextverError::Checkout(_)));

    // The refused checkout must not have moved HEAD, touched the working
    // tree, or created the tag
    let repo = Repository::open(temp_dir.path()).expect("Could not open repo");
    let head = repo.head().expect("Could not get HEAD");
    assert_eq!(head.name(), Some(head_before.as_str()));
    assert!(!has_tag(temp_dir.path(), "v9.9.9"));

    let content =
        fs::read_to_string(temp_dir.path().join("README.md")).expect("Could not read README");
    assert_eq!(content, "local uncommitted\n");
}

#[test]
fn test_nonexistent_path_fails() {
    let err = tag::create(Path::new("/no/such/repository"), "v1.0.0", "master").unwrap_err();
    assert!(matches!(err, NextverError::RepositoryNotFound(_)));
}
