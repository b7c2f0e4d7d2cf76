use std::path::PathBuf;

use clap::Parser;

use crate::error::{NextverError, Result};
use crate::version::Bump;

/// Command-line arguments for nextver.
///
/// Flag names and defaults mirror the tool's documented interface; all
/// validation beyond clap's own parsing happens in [RunConfig::resolve].
#[derive(Debug, Parser)]
#[command(
    name = "nextver",
    about = "Derive the next semantic version from git tags",
    long_about = None
)]
pub struct Args {
    /// Local git repository to read version tags from
    #[arg(short = 'r', long)]
    pub repository: Option<PathBuf>,

    /// Remote repository URL to clone as tag source
    #[arg(long, value_name = "URL")]
    pub repository_remote: Option<String>,

    /// Branch to check out before tagging
    #[arg(short = 'b', long, default_value = "master")]
    pub branch: String,

    /// Version string to use instead of repository tags
    #[arg(short = 'v', long, value_name = "VERSION")]
    pub original_version: Option<String>,

    /// SSH private key used to authenticate against the remote
    #[arg(long, value_name = "PATH")]
    pub remote_ssh: Option<PathBuf>,

    /// User used to authenticate against the remote
    #[arg(long, default_value = "git")]
    pub remote_user: String,

    /// Password used to authenticate against the remote
    #[arg(long)]
    pub remote_password: Option<String>,

    /// Increment the major version
    #[arg(long)]
    pub major: bool,

    /// Increment the minor version
    #[arg(long)]
    pub minor: bool,

    /// Increment the patch version
    #[arg(long)]
    pub patch: bool,

    /// Attach a prerelease suffix to the new version
    #[arg(long)]
    pub suffix: bool,

    /// Suffix to attach when --suffix is set
    #[arg(long, default_value = "beta")]
    pub suffix_tag: String,

    /// Prepend a prefix to the new version string
    #[arg(long)]
    pub prefix: bool,

    /// Prefix to prepend when --prefix is set
    #[arg(long, default_value = "v")]
    pub prefix_tag: String,

    /// Create a git tag for the new version (local repositories only)
    #[arg(long)]
    pub git_tag: bool,

    /// Print only the new version string
    #[arg(short = 'm', long)]
    pub minimal: bool,
}

/// Where the current version comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// A version string supplied on the command line
    Literal(String),
    /// A local repository whose tags are scanned
    Local(PathBuf),
    /// A remote repository cloned into transient storage
    Remote(String),
}

/// Authentication parameters for remote clones.
///
/// Only SSH-key auth is implemented; a password or a non-default user is
/// rejected when the remote is contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAuth {
    pub ssh_key: Option<PathBuf>,
    pub user: String,
    pub password: Option<String>,
}

/// The resolved configuration for a single run.
///
/// Built once from command-line input and passed by reference into every
/// component; read-only thereafter.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: VersionSource,
    pub branch: String,
    pub bump: Bump,
    pub suffix: Option<String>,
    pub prefix: Option<String>,
    pub create_tag: bool,
    pub minimal: bool,
    pub auth: RemoteAuth,
}

impl RunConfig {
    /// Validate the parsed arguments and resolve them into a run configuration.
    ///
    /// Rejects mutually exclusive options before any repository access:
    /// exactly one version source must be set, at most one of
    /// --major/--minor/--patch, and --git-tag requires --repository.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut sources = Vec::new();
        if let Some(version) = &args.original_version {
            sources.push(VersionSource::Literal(version.clone()));
        }
        if let Some(path) = &args.repository {
            sources.push(VersionSource::Local(path.clone()));
        }
        if let Some(url) = &args.repository_remote {
            sources.push(VersionSource::Remote(url.clone()));
        }

        let source = match sources.len() {
            0 => {
                return Err(NextverError::config(
                    "missing version source: use one of --original-version, --repository, --repository-remote",
                ))
            }
            1 => sources.remove(0),
            _ => {
                return Err(NextverError::config(
                    "--original-version, --repository and --repository-remote are mutually exclusive",
                ))
            }
        };

        let selected = [args.major, args.minor, args.patch]
            .iter()
            .filter(|set| **set)
            .count();
        if selected > 1 {
            return Err(NextverError::config(
                "--major, --minor and --patch are mutually exclusive",
            ));
        }

        let bump = if args.major {
            Bump::Major
        } else if args.minor {
            Bump::Minor
        } else if args.patch {
            Bump::Patch
        } else {
            Bump::None
        };

        if args.git_tag && !matches!(source, VersionSource::Local(_)) {
            return Err(NextverError::config(
                "--git-tag requires a local repository (--repository)",
            ));
        }

        Ok(RunConfig {
            source,
            branch: args.branch.clone(),
            bump,
            suffix: args.suffix.then(|| args.suffix_tag.clone()),
            prefix: args.prefix.then(|| args.prefix_tag.clone()),
            create_tag: args.git_tag,
            minimal: args.minimal,
            auth: RemoteAuth {
                ssh_key: args.remote_ssh.clone(),
                user: args.remote_user.clone(),
                password: args.remote_password.clone(),
            },
        })
    }
}
