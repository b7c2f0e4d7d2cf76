use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{BranchType, Repository};

use crate::error::{NextverError, Result};

/// Branch used when no explicit branch is requested
pub const DEFAULT_BRANCH: &str = "master";

/// Create a lightweight tag at the HEAD of a branch in a local repository.
///
/// If `branch` differs from the default branch, the branch reference is
/// resolved and the working tree is checked out onto it first. The tag points
/// at the commit HEAD resolves to after the (possible) checkout.
///
/// Running twice with the same tag name fails the second time - tags are
/// never overwritten.
///
/// # Returns
/// * `Err(RepositoryNotFound)` - If the path does not exist
/// * `Err(BranchNotFound)` - If the requested branch cannot be resolved
/// * `Err(Checkout)` - If the working tree cannot be switched
/// * `Err(TagCreation)` - If the tag exists already or the write fails
pub fn create(path: &Path, tag: &str, branch: &str) -> Result<()> {
    if !path.exists() {
        return Err(NextverError::RepositoryNotFound(path.to_path_buf()));
    }

    let repo = Repository::open(path).map_err(|e| NextverError::RepositoryOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !branch.is_empty() && branch != DEFAULT_BRANCH {
        let reference = repo
            .find_branch(branch, BranchType::Local)
            .map_err(|_| NextverError::BranchNotFound(branch.to_string()))?
            .into_reference();

        let refname = reference
            .name()
            .ok_or_else(|| NextverError::BranchNotFound(branch.to_string()))?
            .to_string();

        let commit = reference.peel_to_commit()?;

        // Switch the working tree before moving HEAD: a refused checkout
        // must leave the repository on its original branch.
        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(commit.as_object(), Some(&mut checkout))
            .map_err(NextverError::Checkout)?;

        repo.set_head(&refname)?;
    }

    let head = repo.head()?.peel_to_commit()?;
    repo.tag_lightweight(tag, head.as_object(), false)
        .map_err(|e| NextverError::TagCreation {
            name: tag.to_string(),
            source: e,
        })?;

    Ok(())
}
