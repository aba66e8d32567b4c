//! Import resolution
//!
//! Every imported package must map to exactly one target. Rules generated
//! inside the repository win over third-party artifacts; a package with no
//! match in either layer, or with several local rules, fails the whole run.

use crate::jvm::deps::DependencySet;
use crate::jvm::rule_index::RuleIndex;
use crate::jvm::thirdparty::ThirdPartyIndex;
use crate::primitives::{PackageName, TargetLabel};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while resolving imported packages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("failed to find a BUILD target containing the \"{package}\" package")]
    Unresolved { package: PackageName },

    #[error("multiple BUILD targets containing the \"{package}\" package: {candidates:?}")]
    Ambiguous {
        package: PackageName,
        candidates: Vec<String>,
    },
}

/// Where a package was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A rule generated in this repository, as `//<dir>`
    Local(TargetLabel),
    /// A third-party artifact
    ThirdParty(TargetLabel),
}

impl Resolution {
    pub fn target(&self) -> &TargetLabel {
        match self {
            Resolution::Local(target) | Resolution::ThirdParty(target) => target,
        }
    }

    pub fn into_target(self) -> TargetLabel {
        match self {
            Resolution::Local(target) | Resolution::ThirdParty(target) => target,
        }
    }
}

/// Resolves packages against the repository rules and the third-party index
#[derive(Debug, Clone)]
pub struct Resolver {
    third_party: ThirdPartyIndex,
}

impl Resolver {
    pub fn new(third_party: ThirdPartyIndex) -> Self {
        Self { third_party }
    }

    pub fn third_party(&self) -> &ThirdPartyIndex {
        &self.third_party
    }

    /// Resolve a single package
    pub fn resolve_package(
        &self,
        package: &PackageName,
        rules: &dyn RuleIndex,
    ) -> Result<Resolution, ResolveError> {
        match rules.find_rules(package) {
            [] => {}
            [rule] => {
                let target = rule.dependency_label();
                trace!(%package, label = %target, "resolved to local rule");
                return Ok(Resolution::Local(target));
            }
            found => {
                return Err(ResolveError::Ambiguous {
                    package: package.clone(),
                    candidates: found.iter().map(ToString::to_string).collect(),
                });
            }
        }

        match self.third_party.lookup(package) {
            Some(target) => {
                trace!(%package, label = %target, "resolved to 3rdparty target");
                Ok(Resolution::ThirdParty(target.clone()))
            }
            None => Err(ResolveError::Unresolved {
                package: package.clone(),
            }),
        }
    }

    /// Resolve every package of a rule; the first failure wins
    pub fn resolve<'a, I>(&self, packages: I, rules: &dyn RuleIndex) -> Result<DependencySet, ResolveError>
    where
        I: IntoIterator<Item = &'a PackageName>,
    {
        let mut deps = DependencySet::new();
        for package in packages {
            deps.insert(self.resolve_package(package, rules)?.into_target());
        }

        debug!(count = deps.len(), "resolved dependencies");
        Ok(deps)
    }
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
