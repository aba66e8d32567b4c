//! Command execution handlers
//!
//! Session-based command execution: every handler receives a `&dyn Session`
//! and reaches the filesystem, the bazel query and the output sink only
//! through it.

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::jvm::generate::{GenerateOptions, generate_rule, walk_post_order};
use crate::jvm::imports::ImportScan;
use crate::jvm::rule::{BUILD_FILE_NAME, JavaLibraryRule, render_build_file};
use crate::jvm::rule_index::RepositoryRuleIndex;
use crate::jvm::{Resolver, ThirdPartyIndex};
use crate::primitives::PackageName;
use anyhow::{Context, Result};
use indicatif::ProgressStyle;
use std::path::PathBuf;
use tracing::{info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Execute CLI commands using the session-based architecture
pub fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .output()
                .emit("jvmdeps - Bazel dependency inference for Java sources")?;
            session
                .output()
                .emit("Run 'jvmdeps --help' for usage information")?;
            return Ok(());
        }
    };

    execute_command_with_session(command, &session)
}

/// Execute a specific command with a provided session (for testing)
pub fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    match command {
        Commands::Version => handle_version(session),
        Commands::Imports { files } => handle_imports(session, &files),
        Commands::Generate { write } => handle_generate(session, &load_resolver(session)?, write),
        Commands::Thirdparty { packages } => {
            handle_thirdparty(session, &load_resolver(session)?, &packages)
        }
    }
}

/// Build the third-party index for the session; nothing else runs if this fails
pub fn load_resolver(session: &dyn Session) -> Result<Resolver> {
    let index = ThirdPartyIndex::initialize(session).context("Failed to build 3rdparty map")?;
    Ok(Resolver::new(index))
}

/// Generate and resolve a rule for every directory of the repository
///
/// Directories are processed children first. Each rule is resolved against
/// the rules of directories finished before it, then added to that index.
/// The first resolution failure aborts the walk.
pub fn generate_repository(session: &dyn Session, resolver: &Resolver) -> Result<Vec<JavaLibraryRule>> {
    let config = session.config().app_config();
    let root = config.repository_root();
    let options = GenerateOptions {
        source_tree_prefix: &config.source_tree_prefix,
        visibility: &config.visibility,
    };

    let walk = walk_post_order(session.filesystem(), &root)
        .with_context(|| format!("Failed to walk repository: {}", root.display()))?;

    let span = crate::progress_span!("generate", total = walk.len());
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {pos}/{len}")
    {
        span.pb_set_style(&style);
    }
    span.pb_set_length(walk.len() as u64);
    span.pb_set_message("resolving java_library rules");
    let _guard = span.enter();

    let mut rule_index = RepositoryRuleIndex::new();
    let mut rules = Vec::new();

    for (rel, listing) in walk {
        span.pb_inc(1);
        let dir = root.join(&rel);
        let _dir_span = info_span!("directory", rel = %rel).entered();

        let Some(mut rule) = generate_rule(session.filesystem(), &dir, &rel, &listing, &options)
        else {
            continue;
        };

        let deps = resolver
            .resolve(&rule.imports, &rule_index)
            .with_context(|| format!("Failed to resolve imports of {}", dir.display()))?;
        info!(
            label = %rule.label(),
            package = %rule.package,
            deps = deps.len(),
            "generated java_library"
        );
        rule.deps = deps.into_attr();

        rule_index.add(rule.package.clone(), rule.label());
        rules.push(rule);
    }

    Ok(rules)
}

fn build_file_path(root: &std::path::Path, rule: &JavaLibraryRule) -> PathBuf {
    root.join(&rule.package_dir).join(BUILD_FILE_NAME)
}

fn handle_generate(session: &dyn Session, resolver: &Resolver, write: bool) -> Result<()> {
    let rules = generate_repository(session, resolver)?;
    let root = session.config().app_config().repository_root();

    // Nothing is printed or written until every directory resolved
    let rendered: Vec<(&JavaLibraryRule, PathBuf, String)> = rules
        .iter()
        .map(|rule| {
            let text = render_build_file(std::slice::from_ref(rule));
            (rule, build_file_path(&root, rule), text)
        })
        .collect();

    if !write {
        for (rule, _, text) in &rendered {
            let display_path = PathBuf::from(&rule.package_dir).join(BUILD_FILE_NAME);
            session
                .output()
                .emit(&format!("# {}\n{}", display_path.display(), text))?;
        }
        return Ok(());
    }

    // Writes are not transactional: a filesystem failure leaves earlier files in place
    for (written, (_, path, text)) in rendered.iter().enumerate() {
        session.filesystem().write_file(path, text).with_context(|| {
            format!(
                "Wrote {} of {} BUILD files before failing",
                written,
                rendered.len()
            )
        })?;
        info!(path = %path.display(), "wrote BUILD file");
    }

    session
        .output()
        .emit(&format!("Wrote {} BUILD files", rendered.len()))?;
    Ok(())
}

fn handle_imports(session: &dyn Session, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let scan = ImportScan::from_file(session.filesystem(), file)
            .with_context(|| format!("Failed to scan imports of {}", file.display()))?;

        let mut block = file.display().to_string();
        for package in &scan.packages {
            block.push_str("\n  ");
            block.push_str(package.as_str());
        }
        session.output().emit(&block)?;
    }
    Ok(())
}

fn handle_thirdparty(session: &dyn Session, resolver: &Resolver, packages: &[String]) -> Result<()> {
    if packages.is_empty() {
        let json = serde_json::to_string_pretty(resolver.third_party())
            .context("Failed to serialize 3rdparty map")?;
        return session.output().emit(&json);
    }

    // Only third-party targets are consulted here
    let no_rules = RepositoryRuleIndex::new();
    for package in packages {
        let package = PackageName::new(package.as_str());
        let resolution = resolver.resolve_package(&package, &no_rules)?;
        session
            .output()
            .emit(&format!("{} {}", package, resolution.target()))?;
    }
    Ok(())
}

fn handle_version(session: &dyn Session) -> Result<()> {
    session
        .output()
        .emit(&format!("jvmdeps {}", env!("CARGO_PKG_VERSION")))?;
    session
        .output()
        .emit("Bazel dependency inference for Java sources")?;
    session
        .output()
        .emit(&format!("Target: {}", std::env::consts::ARCH))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
