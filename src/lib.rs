//! # reflective-di
//!
//! Hierarchical, reflective dependency injection: declarative provider lists,
//! lazily constructed values, and visibility-scoped lookups along a chain of
//! parent containers.
//!
//! ## Features
//!
//! - **Six provider shapes**: value, class, existing (alias), factory,
//!   constructor shorthand, and bare type
//! - **Hierarchical containers**: lookups fall back to the parent chain,
//!   with `SelfOnly` and `SkipSelf` scoping per dependency
//! - **Write-once caching**: a token resolves at most once per container
//! - **Forward references**: providers may reference tokens declared later
//! - **Metadata-driven classes**: constructor parameters and property
//!   injection come from a process-global registry when not written by hand
//!
//! ## Quick Start
//!
//! ```rust
//! use reflective_di::{Ctor, Provider, ReflectiveInjector, Token, TokenResolver, value};
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db_url: String,
//! }
//!
//! let injector = ReflectiveInjector::resolve_and_create(vec![
//!     Provider::Value {
//!         provide: Token::of::<Database>(),
//!         use_value: value(Database {
//!             connection_string: "postgres://localhost".to_string(),
//!         }),
//!     },
//!     Provider::Constructor {
//!         provide: Ctor::of::<UserService, _>(|args| UserService {
//!             db_url: args[0]
//!                 .downcast_ref::<Database>()
//!                 .unwrap()
//!                 .connection_string
//!                 .clone(),
//!         }),
//!         deps: Some(vec![Token::of::<Database>().into()]),
//!     },
//! ])
//! .unwrap();
//!
//! let service = injector.get_type::<UserService>().unwrap();
//! assert_eq!(service.db_url, "postgres://localhost");
//! ```
//!
//! ## Container hierarchies
//!
//! ```rust
//! use std::sync::Arc;
//! use reflective_di::{Provider, ReflectiveInjector, Token, TokenResolver, value};
//!
//! struct AppName(&'static str);
//!
//! let root = Arc::new(
//!     ReflectiveInjector::resolve_and_create(vec![Provider::Value {
//!         provide: Token::of::<AppName>(),
//!         use_value: value(AppName("root")),
//!     }])
//!     .unwrap(),
//! );
//! let child = ReflectiveInjector::resolve_and_create_child(root, vec![]).unwrap();
//!
//! // The child has no provider for AppName; the lookup delegates upward.
//! let name = child.get_type::<AppName>().unwrap();
//! assert_eq!(name.0, "root");
//! ```
//!
//! ## Visibility and optionality
//!
//! Each dependency slot may carry modifiers: an explicit token override
//! (`Inject`), a visibility marker (`SelfOnly`, `SkipSelf`), or `Optional`.
//! Optional dependencies that resolve nowhere substitute the caller's
//! fallback value (or the shared not-found sentinel when none was supplied)
//! instead of failing.

// Module declarations
pub mod dependency;
pub mod error;
pub mod forward_ref;
pub mod injector;
pub mod provider;
pub mod reflection;
pub mod reflective_injector;
pub mod token;
pub mod value;

// Re-export core types
pub use dependency::{
    normalize_dep, normalize_deps, DepModifier, DependencySpec, ReflectiveDependency, Visibility,
};
pub use error::{InjectError, InjectResult};
pub use forward_ref::{ForwardRef, InjectKey};
pub use injector::{Injector, NullInjector, TokenResolver};
pub use provider::{Ctor, FactoryFn, Provider};
pub use reflection::{
    class_params, prop_metadata, prop_metadata_keys, register_class, register_prop, PropMetadata,
};
pub use reflective_injector::ReflectiveInjector;
pub use token::{InjectionToken, Token};
pub use value::{is_falsy, is_not_found, throw_if_not_found, value, Null, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_value_resolution() {
        let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
            provide: Token::of::<usize>(),
            use_value: value(42usize),
        }])
        .unwrap();

        let a = injector.get_type::<usize>().unwrap();
        let b = injector.get_type::<usize>().unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_existing_alias_resolution() {
        let alias: InjectionToken<String> = InjectionToken::new("alias");
        let injector = ReflectiveInjector::resolve_and_create(vec![
            Provider::Value {
                provide: Token::of::<String>(),
                use_value: value("target".to_string()),
            },
            Provider::Existing {
                provide: alias.token(),
                use_existing: Token::of::<String>(),
            },
        ])
        .unwrap();

        let direct = injector.get_type::<String>().unwrap();
        let aliased = injector.get_token(&alias).unwrap();
        assert!(Arc::ptr_eq(&direct, &aliased));
    }

    #[test]
    fn test_factory_provider_with_deps() {
        let doubled: InjectionToken<u32> = InjectionToken::new("doubled");
        let injector = ReflectiveInjector::resolve_and_create(vec![
            Provider::Value {
                provide: Token::of::<u32>(),
                use_value: value(21u32),
            },
            Provider::Factory {
                provide: doubled.token(),
                use_factory: Arc::new(|args| value(args[0].downcast_ref::<u32>().unwrap() * 2)),
                deps: Some(vec![Token::of::<u32>().into()]),
            },
        ])
        .unwrap();

        assert_eq!(*injector.get_token(&doubled).unwrap(), 42);
    }

    #[test]
    fn test_type_mismatch_error() {
        let token: InjectionToken<String> = InjectionToken::new("mismatch");
        let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
            provide: token.token(),
            use_value: value(1u32),
        }])
        .unwrap();

        assert_eq!(
            injector.get_token(&token).unwrap_err(),
            InjectError::TypeMismatch("mismatch")
        );
    }
}
