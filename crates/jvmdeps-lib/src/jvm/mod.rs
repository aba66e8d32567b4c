//! Java import resolution
//!
//! Leaf-first: [`imports`] extracts imported packages from source text,
//! [`metadata`], [`overrides`] and [`thirdparty`] build the package →
//! artifact index, [`resolver`] maps packages to targets and [`deps`]
//! collects them. [`generate`], [`rule_index`] and [`rule`] tie this to a
//! directory tree and BUILD file text.

pub mod deps;
pub mod generate;
pub mod imports;
pub mod metadata;
pub mod overrides;
pub mod resolver;
pub mod rule;
pub mod rule_index;
pub mod thirdparty;

pub use deps::DependencySet;
pub use generate::{GenerateOptions, generate_rule, walk_post_order};
pub use imports::{ImportScan, ImportScanError, ImportWarning};
pub use metadata::MetadataError;
pub use overrides::{OverrideError, OverrideTable};
pub use resolver::{Resolution, ResolveError, Resolver};
pub use rule::{JavaLibraryRule, render_build_file};
pub use rule_index::{RepositoryRuleIndex, RuleIndex};
pub use thirdparty::{InitializationError, ThirdPartyIndex, ThirdPartyIndexBuilder, ThirdPartyIndexError};
