//! Per-parameter dependency descriptors and their extraction.

use crate::forward_ref::InjectKey;

/// Scoping rule for a lookup.
///
/// Used both as the visibility of a single dependency slot and as the flags
/// argument of [`Injector::get_with`](crate::Injector::get_with):
///
/// - `Default`: resolve locally, then walk the ancestor chain.
/// - `SelfOnly`: resolve within the current container only.
/// - `SkipSelf`: skip exactly the current container, then resolve normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Default,
    SelfOnly,
    SkipSelf,
}

/// One modifier attached to a dependency slot.
///
/// Modifiers are orthogonal attributes scanned in declaration order by
/// [`normalize_deps`]; see [`DependencySpec::Modifiers`].
#[derive(Debug, Clone)]
pub enum DepModifier {
    /// Explicit token override
    Inject(InjectKey),
    /// Resolve within the declaring container only
    SelfOnly,
    /// Skip the declaring container, resolve from ancestors
    SkipSelf,
    /// Substitute the caller's fallback instead of failing when unresolved
    Optional,
    /// Bare token (no wrapper)
    Key(InjectKey),
}

/// Raw per-parameter dependency specification, as written in a provider's
/// `deps` list or registered as class metadata.
#[derive(Debug, Clone)]
pub enum DependencySpec {
    /// A bare token
    Key(InjectKey),
    /// A modifier list mixing markers and at most one effective token
    Modifiers(Vec<DepModifier>),
}

impl From<InjectKey> for DependencySpec {
    fn from(key: InjectKey) -> Self {
        DependencySpec::Key(key)
    }
}

impl From<crate::token::Token> for DependencySpec {
    fn from(token: crate::token::Token) -> Self {
        DependencySpec::Key(token.into())
    }
}

/// Normalized descriptor for one constructor/factory parameter.
#[derive(Debug, Clone)]
pub struct ReflectiveDependency {
    /// The token to look up; `None` when a modifier list never named one
    pub inject_key: Option<InjectKey>,
    pub visibility: Visibility,
    pub optional: bool,
}

/// Normalizes one raw dependency spec into a [`ReflectiveDependency`].
///
/// A bare key becomes the inject key directly. A modifier list is scanned
/// once, front to back; conflicting or duplicate modifiers are not rejected,
/// the last write wins.
pub fn normalize_dep(spec: DependencySpec) -> ReflectiveDependency {
    let mut dep = ReflectiveDependency {
        inject_key: None,
        visibility: Visibility::Default,
        optional: false,
    };
    match spec {
        DependencySpec::Key(key) => dep.inject_key = Some(key),
        DependencySpec::Modifiers(items) => {
            for item in items {
                match item {
                    DepModifier::Inject(key) => dep.inject_key = Some(key),
                    DepModifier::SelfOnly => dep.visibility = Visibility::SelfOnly,
                    DepModifier::SkipSelf => dep.visibility = Visibility::SkipSelf,
                    DepModifier::Optional => dep.optional = true,
                    DepModifier::Key(key) => dep.inject_key = Some(key),
                }
            }
        }
    }
    dep
}

/// Normalizes a whole `deps` list, preserving order.
pub fn normalize_deps(specs: Vec<DependencySpec>) -> Vec<ReflectiveDependency> {
    specs.into_iter().map(normalize_dep).collect()
}
