use anyhow::Result;
use clap::Parser;

use nextver::config::{Args, RunConfig, VersionSource};
use nextver::version::{self, SourceVersion};
use nextver::{extract, tag, ui};

/// Outcome of a run: the version the bump started from and the rendered
/// new version string.
struct Derived {
    current: SourceVersion,
    rendered: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Validate configuration before any repository access
    let config = match RunConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let derived = match run(&config) {
        Ok(derived) => derived,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if config.minimal {
        println!("{}", derived.rendered);
        return Ok(());
    }

    println!("Current Version: {}", derived.current.original());
    println!("New Version: {}", derived.rendered);

    Ok(())
}

fn run(config: &RunConfig) -> nextver::Result<Derived> {
    // Determine the current version
    let current = match &config.source {
        VersionSource::Literal(text) => SourceVersion::parse(text)?,
        VersionSource::Local(path) => version::latest(extract::versions_from_local(path)?),
        VersionSource::Remote(url) => {
            version::latest(extract::versions_from_remote(url, &config.auth)?)
        }
    };

    // Bump and decorate
    let mut next = version::apply_bump(current.semver(), config.bump);
    if let Some(suffix) = &config.suffix {
        next = version::with_prerelease(&next, suffix)?;
    }
    let rendered = version::render(&next, config.prefix.as_deref());

    // Persist as a git tag when requested (local repositories only)
    if config.create_tag {
        if let VersionSource::Local(path) = &config.source {
            tag::create(path, &rendered, &config.branch)?;
        }
    }

    Ok(Derived { current, rendered })
}
