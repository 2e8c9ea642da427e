//! The hierarchical container and its resolution algorithm.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dependency::{ReflectiveDependency, Visibility};
use crate::error::{InjectError, InjectResult};
use crate::injector::Injector;
use crate::provider::{normalize_providers, NormalizedProvider, Provider};
use crate::token::Token;
use crate::value::{is_falsy, is_not_found, throw_if_not_found, Null, Value};

/// Hierarchical dependency-resolution container.
///
/// Holds an ordered, immutable list of normalized providers, a write-once
/// resolution cache, and an optional parent. Lookups check the cache, then
/// scan providers in declaration order (first match wins), then fall back to
/// the parent chain.
///
/// Resolution is synchronous and recursive. There is no cycle detection: a
/// provider that (directly or transitively) depends on its own token recurses
/// until the stack is exhausted.
///
/// # Examples
///
/// ```rust
/// use reflective_di::{Ctor, Provider, ReflectiveInjector, Token, TokenResolver, value};
///
/// struct Config {
///     url: String,
/// }
/// struct Client {
///     config_url: String,
/// }
///
/// let injector = ReflectiveInjector::resolve_and_create(vec![
///     Provider::Value {
///         provide: Token::of::<Config>(),
///         use_value: value(Config { url: "postgres://localhost".into() }),
///     },
///     Provider::Constructor {
///         provide: Ctor::of::<Client, _>(|args| Client {
///             config_url: args[0].downcast_ref::<Config>().unwrap().url.clone(),
///         }),
///         deps: Some(vec![Token::of::<Config>().into()]),
///     },
/// ])
/// .unwrap();
///
/// let client = injector.get_type::<Client>().unwrap();
/// assert_eq!(client.config_url, "postgres://localhost");
/// ```
pub struct ReflectiveInjector {
    parent: Option<Arc<dyn Injector>>,
    providers: Vec<NormalizedProvider>,
    cache: Mutex<HashMap<Token, Value>>,
}

impl ReflectiveInjector {
    /// Creates a container from a provider list and an optional parent.
    ///
    /// Normalization happens here, once; a class provider without explicit
    /// deps and without registered metadata fails with
    /// [`InjectError::MissingMetadata`].
    pub fn new(
        parent: Option<Arc<dyn Injector>>,
        providers: Vec<Provider>,
    ) -> InjectResult<Self> {
        Ok(Self {
            parent,
            providers: normalize_providers(providers)?,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a root container (no parent).
    pub fn resolve_and_create(providers: Vec<Provider>) -> InjectResult<Self> {
        Self::new(None, providers)
    }

    /// Creates a child container delegating unresolved tokens to `parent`.
    pub fn resolve_and_create_child(
        parent: Arc<dyn Injector>,
        providers: Vec<Provider>,
    ) -> InjectResult<Self> {
        Self::new(Some(parent), providers)
    }

    /// The parent container, if any.
    pub fn parent(&self) -> Option<&Arc<dyn Injector>> {
        self.parent.as_ref()
    }

    /// Resolves each dependency descriptor into the argument passed to the
    /// factory at that position.
    fn resolve_deps(
        &self,
        deps: &[ReflectiveDependency],
        not_found: &Value,
    ) -> InjectResult<Vec<Value>> {
        let mut args = Vec::with_capacity(deps.len());
        for dep in deps {
            let token = match &dep.inject_key {
                // Forward references are dereferenced here, at point of use.
                Some(key) => key.resolve(),
                None => return Err(InjectError::NotFound("<unspecified dependency>")),
            };
            let obtained = match dep.visibility {
                Visibility::SelfOnly => {
                    absorb_not_found(self.get_with(&token, not_found.clone(), Visibility::SelfOnly))?
                }
                Visibility::SkipSelf => match &self.parent {
                    // Exactly one level is skipped; the parent searches its
                    // own chain normally.
                    Some(parent) => absorb_not_found(parent.get_with(
                        &token,
                        not_found.clone(),
                        Visibility::Default,
                    ))?,
                    None => return Err(InjectError::NotFound(token.display_name())),
                },
                Visibility::Default => {
                    // Documented quirk: the fallback to the parent triggers on
                    // any falsy local value, not on a proper not-found check.
                    let local = absorb_not_found(self.get(&token))?;
                    if !is_not_found(&local) && is_falsy(&local) {
                        match &self.parent {
                            Some(parent) => absorb_not_found(parent.get(&token))?,
                            None => local,
                        }
                    } else {
                        local
                    }
                }
            };
            if is_not_found(&obtained) {
                if dep.optional {
                    args.push(not_found.clone());
                    continue;
                }
                return Err(InjectError::NotFound(token.display_name()));
            }
            args.push(obtained);
        }
        Ok(args)
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Reflective Injector Debug ===\n");
        s.push_str("Providers:\n");
        for provider in &self.providers {
            s.push_str(&format!(
                "  {} ({} deps)\n",
                provider.provide.display_name(),
                provider.deps.len()
            ));
        }
        s.push_str(&format!("Cached tokens: {}\n", self.cache.lock().len()));
        s.push_str(&format!("Has parent: {}\n", self.parent.is_some()));
        s
    }
}

impl Injector for ReflectiveInjector {
    fn get_with(
        &self,
        token: &Token,
        not_found: Value,
        visibility: Visibility,
    ) -> InjectResult<Value> {
        if visibility == Visibility::SkipSelf {
            // Reaching SkipSelf with no parent is always fatal, even when a
            // fallback was supplied.
            return match &self.parent {
                Some(parent) => parent.get_with(token, not_found, Visibility::Default),
                None => Err(InjectError::NotFound(token.display_name())),
            };
        }

        if let Some(hit) = self.cache.lock().get(token) {
            return Ok(hit.clone());
        }

        let mut resolved = not_found.clone();
        for provider in &self.providers {
            if provider.provide == *token {
                let args = self.resolve_deps(&provider.deps, &not_found)?;
                let cache_hook = |t: Token, v: Value| {
                    self.cache.lock().insert(t, v);
                };
                let produced = (provider.factory)(self, &cache_hook, args)?;
                self.cache.lock().insert(token.clone(), produced.clone());
                resolved = produced;
                // First match wins; later providers for this token are dead.
                break;
            }
        }

        if Arc::ptr_eq(&resolved, &not_found) {
            if visibility == Visibility::SelfOnly && is_not_found(&resolved) {
                return Err(InjectError::NotFound(token.display_name()));
            }
            if let Some(parent) = &self.parent {
                return parent.get_with(token, not_found, visibility);
            }
            return Err(InjectError::NotFound(token.display_name()));
        }
        if resolved.downcast_ref::<Null>().is_some() {
            return Err(InjectError::NullValue(token.display_name()));
        }
        Ok(resolved)
    }
}

// Dependency lookups model "not found" as the throw sentinel so the optional
// short-circuit in resolve_deps can convert it to the caller's fallback.
fn absorb_not_found(result: InjectResult<Value>) -> InjectResult<Value> {
    match result {
        Err(InjectError::NotFound(_)) => Ok(throw_if_not_found()),
        other => other,
    }
}
