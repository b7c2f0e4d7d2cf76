use std::path::Path;

use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, RemoteCallbacks, Repository};

use crate::config::RemoteAuth;
use crate::error::{NextverError, Result};
use crate::version::SourceVersion;

/// List all version tags of a local repository.
///
/// Tag names that do not parse as semantic versions are skipped without
/// error; a repository without tags yields an empty set.
///
/// # Returns
/// * `Ok(versions)` - All parseable tag versions, ascending
/// * `Err(RepositoryNotFound)` - If the path does not exist
/// * `Err(RepositoryOpen)` - If the path is not a git repository
pub fn versions_from_local(path: &Path) -> Result<Vec<SourceVersion>> {
    if !path.exists() {
        return Err(NextverError::RepositoryNotFound(path.to_path_buf()));
    }

    let repo = Repository::open(path).map_err(|e| NextverError::RepositoryOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    versions_in(&repo)
}

/// List all version tags of a remote repository.
///
/// Performs a full clone into a temporary directory that is removed when
/// extraction finishes; nothing is persisted. Only SSH-key authentication is
/// implemented - a password or a user other than "git" is rejected before any
/// network access.
///
/// # Arguments
/// * `url` - Clone URL of the remote repository
/// * `auth` - Authentication parameters (SSH key path, user, password)
pub fn versions_from_remote(url: &str, auth: &RemoteAuth) -> Result<Vec<SourceVersion>> {
    if auth.password.is_some() {
        return Err(NextverError::unsupported_auth(
            "password authentication is not implemented",
        ));
    }
    if auth.user != "git" {
        return Err(NextverError::unsupported_auth(format!(
            "user '{}' is not supported, only 'git' is implemented",
            auth.user
        )));
    }

    let mut fetch_options = FetchOptions::new();

    if let Some(key_path) = &auth.ssh_key {
        // Surface an unreadable key as an I/O error up front instead of an
        // opaque transport failure mid-clone.
        std::fs::metadata(key_path)?;

        let key_path = key_path.clone();
        let user = auth.user.clone();
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, _allowed_types| {
            Cred::ssh_key(username_from_url.unwrap_or(&user), None, &key_path, None)
        });
        fetch_options.remote_callbacks(callbacks);
    }

    // Clone target lives only as long as this function; the TempDir is
    // deleted on drop.
    let workdir = tempfile::tempdir()?;
    let repo = RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, workdir.path())
        .map_err(|e| NextverError::Clone {
            url: url.to_string(),
            source: e,
        })?;

    versions_in(&repo)
}

/// Collect every tag reference that parses as a semantic version.
fn versions_in(repo: &Repository) -> Result<Vec<SourceVersion>> {
    let names = repo.tag_names(None)?;

    let mut versions: Vec<SourceVersion> = names
        .iter()
        .flatten()
        .filter_map(|name| SourceVersion::parse(name).ok())
        .collect();

    versions.sort();
    Ok(versions)
}
