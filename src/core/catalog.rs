//! Dependency catalog - the fixed set of dependencies a distribution may vendor.

use serde::Deserialize;

/// How a dependency is treated when building a source distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendorPolicy {
    /// No viable system package exists; vendored in every mode.
    Always,
    /// Vendored in every mode, with the system copy switched off by a
    /// configure flag.
    DisableSystem,
    /// Expected from the host system unless fully vendored.
    FullyVendoredOnly,
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyDescriptor {
    pub name: String,
    pub policy: VendorPolicy,
}

impl DependencyDescriptor {
    pub fn new(name: impl Into<String>, policy: VendorPolicy) -> Self {
        DependencyDescriptor {
            name: name.into(),
            policy,
        }
    }

    /// Vendored regardless of mode, with no configure flag.
    pub fn always_vendored(&self) -> bool {
        self.policy == VendorPolicy::Always
    }

    /// Vendored only in fully-vendored mode.
    pub fn fully_vendored_only(&self) -> bool {
        self.policy == VendorPolicy::FullyVendoredOnly
    }

    /// Name as used in CMake variables (`sdl_audiolib` -> `SDL_AUDIOLIB`).
    pub fn cmake_name(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Ordered, immutable set of dependency descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    deps: Vec<DependencyDescriptor>,
}

impl Catalog {
    pub fn new(deps: Vec<DependencyDescriptor>) -> Self {
        Catalog { deps }
    }

    /// All descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyDescriptor> {
        self.deps.iter()
    }

    /// Descriptors with the given policy, in catalog order.
    pub fn with_policy(&self, policy: VendorPolicy) -> impl Iterator<Item = &DependencyDescriptor> {
        self.deps.iter().filter(move |d| d.policy == policy)
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&DependencyDescriptor> {
        self.deps.iter().find(|d| d.name == name)
    }

    /// First name that appears more than once, if any.
    pub fn duplicate_name(&self) -> Option<&str> {
        self.deps.iter().enumerate().find_map(|(i, dep)| {
            self.deps[..i]
                .iter()
                .any(|prev| prev.name == dep.name)
                .then_some(dep.name.as_str())
        })
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}
