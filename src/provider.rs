//! Provider declarations and their normalization into executable form.
//!
//! Six declaration shapes all normalize into the same
//! `{provide, deps, factory}` record; the injector only ever sees the
//! normalized form. Normalization runs once, at container construction, and
//! preserves declaration order. Order is load-bearing, the first matching
//! provider wins at resolution time.

use std::fmt;
use std::sync::Arc;

use crate::dependency::{normalize_deps, DependencySpec, ReflectiveDependency};
use crate::error::{InjectError, InjectResult};
use crate::injector::Injector;
use crate::reflection;
use crate::token::Token;
use crate::value::Value;

/// A constructible type: a token plus a type-erased constructor.
///
/// This is the "class" side of a class provider. The constructor closure
/// receives the resolved dependency values in declaration order and returns
/// the new instance.
///
/// # Examples
///
/// ```rust
/// use reflective_di::Ctor;
///
/// struct Greeter {
///     name: String,
/// }
///
/// let ctor = Ctor::of::<Greeter, _>(|args| Greeter {
///     name: args[0].downcast_ref::<String>().cloned().unwrap_or_default(),
/// });
/// assert!(ctor.token().display_name().ends_with("Greeter"));
/// ```
#[derive(Clone)]
pub struct Ctor {
    token: Token,
    construct: Arc<dyn Fn(Vec<Value>) -> Value + Send + Sync>,
}

impl Ctor {
    /// Builds the constructible handle for `T` from a plain constructor
    /// closure taking the resolved dependency values.
    pub fn of<T, F>(construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Vec<Value>) -> T + Send + Sync + 'static,
    {
        Self {
            token: Token::of::<T>(),
            construct: Arc::new(move |args| Arc::new(construct(args)) as Value),
        }
    }

    /// The token identifying the concrete type this constructs.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub(crate) fn construct(&self, args: Vec<Value>) -> Value {
        (self.construct)(args)
    }
}

impl fmt::Debug for Ctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ctor").field(&self.token).finish()
    }
}

/// User-supplied factory function for a factory provider.
pub type FactoryFn = Arc<dyn Fn(Vec<Value>) -> Value + Send + Sync>;

/// A provider declaration: one of six mutually exclusive shapes.
///
/// | Shape | Meaning |
/// |---|---|
/// | `Value` | token resolves to a fixed value |
/// | `Class` | token resolves to a constructed instance of `use_class` |
/// | `Existing` | token is an alias resolved by looking up another token |
/// | `Factory` | token resolves to the result of invoking a function |
/// | `Constructor` | token and implementation are the same constructible type |
/// | `Type` | bare constructible type, no explicit config |
#[derive(Clone)]
pub enum Provider {
    Value {
        provide: Token,
        use_value: Value,
    },
    Class {
        provide: Token,
        use_class: Ctor,
        deps: Option<Vec<DependencySpec>>,
    },
    Existing {
        provide: Token,
        use_existing: Token,
    },
    Factory {
        provide: Token,
        use_factory: FactoryFn,
        deps: Option<Vec<DependencySpec>>,
    },
    Constructor {
        provide: Ctor,
        deps: Option<Vec<DependencySpec>>,
    },
    Type(Ctor),
}

impl Provider {
    /// The token this declaration provides.
    pub fn provide_token(&self) -> Token {
        match self {
            Provider::Value { provide, .. }
            | Provider::Class { provide, .. }
            | Provider::Existing { provide, .. }
            | Provider::Factory { provide, .. } => provide.clone(),
            Provider::Constructor { provide, .. } => provide.token().clone(),
            Provider::Type(ctor) => ctor.token().clone(),
        }
    }
}

// The executable form of a provider's recipe. Receives the container doing
// the resolving, the cache hook writing into that container, and the already
// resolved dependency values.
pub(crate) type ProviderFactory =
    Arc<dyn Fn(&dyn Injector, &dyn Fn(Token, Value), Vec<Value>) -> InjectResult<Value> + Send + Sync>;

/// Uniform executable record produced by normalization.
pub(crate) struct NormalizedProvider {
    pub(crate) provide: Token,
    pub(crate) deps: Vec<ReflectiveDependency>,
    pub(crate) factory: ProviderFactory,
}

impl std::fmt::Debug for NormalizedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedProvider")
            .field("provide", &self.provide)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Normalizes a declaration list, preserving order.
pub(crate) fn normalize_providers(
    providers: Vec<Provider>,
) -> InjectResult<Vec<NormalizedProvider>> {
    providers.into_iter().map(normalize_provider).collect()
}

fn normalize_provider(provider: Provider) -> InjectResult<NormalizedProvider> {
    match provider {
        Provider::Value { provide, use_value } => Ok(normalize_value(provide, use_value)),
        Provider::Class {
            provide,
            use_class,
            deps,
        } => normalize_class(provide, use_class, deps),
        Provider::Existing {
            provide,
            use_existing,
        } => Ok(normalize_existing(provide, use_existing)),
        Provider::Factory {
            provide,
            use_factory,
            deps,
        } => Ok(normalize_factory(provide, use_factory, deps)),
        // Constructor shorthand: token and implementation are the same type.
        Provider::Constructor { provide, deps } => {
            let token = provide.token().clone();
            normalize_class(token, provide, deps)
        }
        Provider::Type(ctor) => {
            let token = ctor.token().clone();
            normalize_class(token, ctor, None)
        }
    }
}

fn normalize_value(provide: Token, use_value: Value) -> NormalizedProvider {
    NormalizedProvider {
        provide,
        deps: Vec::new(),
        factory: Arc::new(move |_injector, _cache, _args| Ok(use_value.clone())),
    }
}

fn normalize_class(
    provide: Token,
    use_class: Ctor,
    deps: Option<Vec<DependencySpec>>,
) -> InjectResult<NormalizedProvider> {
    let deps = match deps {
        Some(explicit) => normalize_deps(explicit),
        None => normalize_deps(resolve_class_params(use_class.token())?),
    };
    let class_token = use_class.token().clone();
    let factory: ProviderFactory = Arc::new(move |injector, cache, args| {
        let instance = use_class.construct(args);
        // Declarative field injection runs against the current container,
        // not the one that eventually serves the provider's token.
        for key in reflection::prop_metadata_keys(&class_token) {
            for item in reflection::prop_metadata(&class_token, key) {
                (item.context_callback)(&instance, item.property_key, injector);
            }
        }
        // Also cache under the concrete implementation type, so a later
        // lookup by the class itself hits the cache directly.
        cache(class_token.clone(), instance.clone());
        Ok(instance)
    });
    Ok(NormalizedProvider {
        provide,
        deps,
        factory,
    })
}

fn normalize_existing(provide: Token, use_existing: Token) -> NormalizedProvider {
    NormalizedProvider {
        provide,
        deps: Vec::new(),
        // The alias resolves fresh against the container the factory runs in;
        // the outer get caches the alias token, so this body runs at most once.
        factory: Arc::new(move |injector, _cache, _args| injector.get(&use_existing)),
    }
}

fn normalize_factory(
    provide: Token,
    use_factory: FactoryFn,
    deps: Option<Vec<DependencySpec>>,
) -> NormalizedProvider {
    // No implicit metadata lookup for plain functions: explicit deps only.
    let deps = normalize_deps(deps.unwrap_or_default());
    NormalizedProvider {
        provide,
        deps,
        factory: Arc::new(move |_injector, _cache, args| Ok(use_factory(args))),
    }
}

fn resolve_class_params(class: &Token) -> InjectResult<Vec<DependencySpec>> {
    reflection::class_params(class)
        .ok_or(InjectError::MissingMetadata(class.display_name()))
}
