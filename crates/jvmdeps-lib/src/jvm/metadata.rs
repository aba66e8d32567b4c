//! Third-party artifact metadata
//!
//! Artifacts come from `bazel query "kind(jvm_import, @maven//:all)"
//! --output=build`, which prints one rule block per rules_jvm_external
//! target:
//!
//! ```text
//! jvm_import(
//!   name = "com_fasterxml_jackson_core_jackson_core",
//!   tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-core:2.13.3"],
//!   jars = ["@maven//:v1/https/repo1.maven.org/..."],
//! )
//! ```
//!
//! Only the `name` and the `maven_coordinates` tag matter. Any block that
//! closes without both is a hard error: a partially parsed artifact list
//! would silently drop third-party packages from resolution.

use crate::application::session::Session;
use crate::primitives::{ArtifactDescriptor, TargetLabel};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, trace};

const NAME_PREFIX: &str = "  name = \"";
const TAGS_PREFIX: &str = "  tags = [";
const BLOCK_END: &str = ")";

static COORDINATES_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""maven_coordinates=([a-z0-9_.:-]+)""#).expect("coordinates pattern is valid")
});

/// Errors that can occur while loading artifact metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to query maven targets with `{command}`: {reason}")]
    Query { command: String, reason: String },

    #[error("Failed to read maven query output: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unparseable target name on line {line_number}: '{line}'")]
    MalformedName { line_number: usize, line: String },

    #[error("No maven_coordinates tag on line {line_number}: '{line}'")]
    MissingCoordinatesTag { line_number: usize, line: String },

    #[error(
        "Unparseable maven target ending on line {line_number}: name = {target:?}, coordinates = {coordinates:?}"
    )]
    IncompleteBlock {
        line_number: usize,
        target: Option<String>,
        coordinates: Option<String>,
    },

    #[error("Malformed maven coordinates \"{coordinates}\" for {target}")]
    MalformedCoordinates {
        target: TargetLabel,
        coordinates: String,
    },
}

/// Arguments for the jvm_import query against `repository`
pub fn query_args(repository: &str) -> Vec<String> {
    vec![
        "query".to_string(),
        format!("kind(jvm_import, @{repository}//:all)"),
        "--output=build".to_string(),
    ]
}

/// Parse `bazel query --output=build` text into artifact descriptors
///
/// Target names are qualified with `@<repository>//:`. Descriptors are
/// returned in query order.
pub fn parse_query_output(
    output: &str,
    repository: &str,
) -> Result<Vec<ArtifactDescriptor>, MetadataError> {
    let mut artifacts = Vec::new();
    let mut target: Option<TargetLabel> = None;
    let mut coordinates: Option<String> = None;

    for (index, line) in output.lines().enumerate() {
        let line_number = index + 1;

        if target.is_none() && line.starts_with(NAME_PREFIX) {
            let rest = &line[NAME_PREFIX.len()..];
            let name = rest
                .rfind('"')
                .map(|end| &rest[..end])
                .ok_or_else(|| MetadataError::MalformedName {
                    line_number,
                    line: line.to_string(),
                })?;
            target = Some(TargetLabel::external(repository, name));
        } else if line.starts_with(TAGS_PREFIX) {
            let captures = COORDINATES_TAG.captures(line).ok_or_else(|| {
                MetadataError::MissingCoordinatesTag {
                    line_number,
                    line: line.to_string(),
                }
            })?;
            coordinates = Some(captures[1].to_string());
        } else if line == BLOCK_END {
            let artifact = match (target.take(), coordinates.take()) {
                (Some(block_target), Some(block_coordinates)) => {
                    ArtifactDescriptor::new(block_target.clone(), block_coordinates.clone())
                        .ok_or(MetadataError::MalformedCoordinates {
                            target: block_target,
                            coordinates: block_coordinates,
                        })?
                }
                (block_target, block_coordinates) => {
                    return Err(MetadataError::IncompleteBlock {
                        line_number,
                        target: block_target.map(TargetLabel::into_string),
                        coordinates: block_coordinates,
                    });
                }
            };
            trace!(label = %artifact.target, coordinates = %artifact.coordinates, "parsed maven target");
            artifacts.push(artifact);
        }
    }

    Ok(artifacts)
}

/// Load artifact descriptors for the session
///
/// Uses the pre-captured query output when configured, otherwise runs the
/// query through the session's process provider in the repository root.
pub fn load_artifacts(session: &dyn Session) -> Result<Vec<ArtifactDescriptor>, MetadataError> {
    let config = session.config().app_config();
    let repository = config.maven_repository.as_str();

    let output = match config.maven_query_output_path() {
        Some(path) => {
            debug!(path = %path.display(), "reading captured maven query output");
            session
                .filesystem()
                .read_to_string(&path)
                .map_err(|source| MetadataError::Read { path, source })?
        }
        None => run_query(session, &config.bazel, repository)?,
    };

    let artifacts = parse_query_output(&output, repository)?;
    info!(count = artifacts.len(), repository, "parsed maven targets");
    Ok(artifacts)
}

fn run_query(session: &dyn Session, bazel: &str, repository: &str) -> Result<String, MetadataError> {
    let args = query_args(repository);
    let command = format!("{} {}", bazel, args.join(" "));
    info!("parsing maven targets: {}", command);

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let workdir = session.config().app_config().repository_root();
    let output = session
        .process()
        .execute(bazel, &arg_refs, &workdir)
        .map_err(|e| MetadataError::Query {
            command: command.clone(),
            reason: format!("{:#}", e),
        })?;

    if !output.success {
        return Err(MetadataError::Query {
            command,
            reason: output.stderr.trim().to_string(),
        });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    include!("metadata.test.rs");
}
