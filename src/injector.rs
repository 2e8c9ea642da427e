//! The injector abstraction and the null injector sentinel.

use std::sync::Arc;

use crate::dependency::Visibility;
use crate::error::{InjectError, InjectResult};
use crate::token::{InjectionToken, Token};
use crate::value::{is_not_found, throw_if_not_found, Value};

/// Object-safe container interface.
///
/// A container answers "give me the value for this token", either from its
/// own providers or by delegating along its parent chain. Concrete
/// containers ([`ReflectiveInjector`](crate::ReflectiveInjector)) and the
/// terminal [`NullInjector`] both implement this; parents are held as
/// `Arc<dyn Injector>`.
pub trait Injector: Send + Sync {
    /// Resolves `token` with an explicit fallback and visibility.
    ///
    /// `not_found` is returned (for optional dependencies) or used as the
    /// absence marker during resolution; pass
    /// [`throw_if_not_found`](crate::throw_if_not_found) (or call
    /// [`get`](Self::get)) to make failed lookups error instead.
    fn get_with(
        &self,
        token: &Token,
        not_found: Value,
        visibility: Visibility,
    ) -> InjectResult<Value>;

    /// Resolves `token` with no fallback and default visibility.
    fn get(&self, token: &Token) -> InjectResult<Value> {
        self.get_with(token, throw_if_not_found(), Visibility::Default)
    }
}

/// Terminal injector used where no parent exists.
///
/// Honors the fallback contract: a lookup with a real fallback returns that
/// fallback, a lookup with the throw sentinel fails with
/// [`InjectError::NotFound`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInjector;

impl Injector for NullInjector {
    fn get_with(
        &self,
        token: &Token,
        not_found: Value,
        _visibility: Visibility,
    ) -> InjectResult<Value> {
        if is_not_found(&not_found) {
            Err(InjectError::NotFound(token.display_name()))
        } else {
            Ok(not_found)
        }
    }
}

/// Typed resolution helpers layered over [`Injector`].
///
/// Blanket-implemented for every injector (including trait objects), this is
/// where type-erased [`Value`]s turn back into `Arc<T>`.
///
/// # Examples
///
/// ```rust
/// use reflective_di::{Provider, ReflectiveInjector, TokenResolver, value, Token};
///
/// struct Config {
///     port: u16,
/// }
///
/// let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
///     provide: Token::of::<Config>(),
///     use_value: value(Config { port: 8080 }),
/// }])
/// .unwrap();
///
/// let config = injector.get_type::<Config>().unwrap();
/// assert_eq!(config.port, 8080);
/// ```
pub trait TokenResolver: Injector {
    /// Resolves a concrete type by its type token and downcasts the result.
    fn get_type<T: Send + Sync + 'static>(&self) -> InjectResult<Arc<T>> {
        let any = self.get(&Token::of::<T>())?;
        any.downcast::<T>()
            .map_err(|_| InjectError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves an explicit injection token and downcasts to its declared type.
    fn get_token<T: Send + Sync + 'static>(
        &self,
        token: &InjectionToken<T>,
    ) -> InjectResult<Arc<T>> {
        let any = self.get(&token.token())?;
        any.downcast::<T>()
            .map_err(|_| InjectError::TypeMismatch(token.description()))
    }
}

impl<I: Injector + ?Sized> TokenResolver for I {}
