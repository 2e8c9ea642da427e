//! Process-global class metadata registry.
//!
//! The injector core never derives constructor parameters on its own; it asks
//! this registry. Applications (or code generators) register a class's
//! parameter specs and property-injection callbacks up front, keyed by the
//! class token, and the provider normalizer consumes them when a class
//! provider carries no explicit `deps` list.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::dependency::DependencySpec;
use crate::injector::Injector;
use crate::token::Token;
use crate::value::Value;

/// A property-injection declaration for a class.
///
/// The callback runs right after an instance is constructed, receiving the
/// fresh instance, the property key it was registered under, and the
/// container the resolution is running in. Field injection therefore resolves
/// against the current container, not the one that eventually serves the
/// class's own token. Instances are shared (`Arc`), so the target field needs
/// interior mutability (`once_cell::sync::OnceCell` works well).
#[derive(Clone)]
pub struct PropMetadata {
    pub property_key: &'static str,
    pub context_callback: Arc<dyn Fn(&Value, &'static str, &dyn Injector) + Send + Sync>,
}

impl std::fmt::Debug for PropMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropMetadata")
            .field("property_key", &self.property_key)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct ClassAnnotations {
    params: Option<Vec<DependencySpec>>,
    // Key order preserved for deterministic prop-injection order.
    prop_keys: Vec<&'static str>,
    props: HashMap<&'static str, Vec<PropMetadata>>,
}

static REGISTRY: Lazy<RwLock<HashMap<Token, ClassAnnotations>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a class's constructor parameter specs.
///
/// Registering again for the same token replaces the previous list. An empty
/// list is a valid registration (a class with no dependencies), distinct from
/// not being registered at all.
pub fn register_class(token: Token, params: Vec<DependencySpec>) {
    let mut registry = REGISTRY.write();
    registry.entry(token).or_default().params = Some(params);
}

/// Appends a property-injection declaration for a class.
pub fn register_prop(token: Token, prop: PropMetadata) {
    let mut registry = REGISTRY.write();
    let entry = registry.entry(token).or_default();
    if !entry.prop_keys.contains(&prop.property_key) {
        entry.prop_keys.push(prop.property_key);
    }
    entry.props.entry(prop.property_key).or_default().push(prop);
}

/// The registered constructor parameter specs, or `None` when the class has
/// no usable metadata at all.
pub fn class_params(token: &Token) -> Option<Vec<DependencySpec>> {
    REGISTRY.read().get(token).and_then(|a| a.params.clone())
}

/// The property keys with registered injection metadata, in registration order.
pub fn prop_metadata_keys(token: &Token) -> Vec<&'static str> {
    REGISTRY
        .read()
        .get(token)
        .map(|a| a.prop_keys.clone())
        .unwrap_or_default()
}

/// The injection declarations registered under one property key.
pub fn prop_metadata(token: &Token, key: &'static str) -> Vec<PropMetadata> {
    REGISTRY
        .read()
        .get(token)
        .and_then(|a| a.props.get(key).cloned())
        .unwrap_or_default()
}
