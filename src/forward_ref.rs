//! Deferred token references for mutually referencing providers.

use std::fmt;
use std::sync::Arc;

use crate::token::Token;

/// A token reference resolved lazily at the point of use.
///
/// Lets two provider declarations reference each other's token before both
/// exist: the wrapped closure is not invoked at declaration time, only when
/// the dependency is actually being resolved.
///
/// # Examples
///
/// ```rust
/// use once_cell::sync::Lazy;
/// use reflective_di::{ForwardRef, InjectionToken, Token};
///
/// static GREETING: Lazy<InjectionToken<String>> =
///     Lazy::new(|| InjectionToken::new("greeting"));
///
/// let deferred = ForwardRef::new(|| GREETING.token());
/// assert_eq!(deferred.resolve(), GREETING.token());
/// ```
#[derive(Clone)]
pub struct ForwardRef {
    resolver: Arc<dyn Fn() -> Token + Send + Sync>,
}

impl ForwardRef {
    /// Wraps a resolver closure; the closure runs on every [`resolve`](Self::resolve).
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn() -> Token + Send + Sync + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Dereferences the forward reference now.
    pub fn resolve(&self) -> Token {
        (self.resolver)()
    }
}

impl fmt::Debug for ForwardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ForwardRef(..)")
    }
}

/// The key slot of a dependency descriptor: a token, or a forward reference
/// to one.
#[derive(Debug, Clone)]
pub enum InjectKey {
    Token(Token),
    Forward(ForwardRef),
}

impl InjectKey {
    /// The concrete token, dereferencing a forward reference if needed.
    pub fn resolve(&self) -> Token {
        match self {
            InjectKey::Token(token) => token.clone(),
            InjectKey::Forward(fwd) => fwd.resolve(),
        }
    }
}

impl From<Token> for InjectKey {
    fn from(token: Token) -> Self {
        InjectKey::Token(token)
    }
}

impl From<ForwardRef> for InjectKey {
    fn from(fwd: ForwardRef) -> Self {
        InjectKey::Forward(fwd)
    }
}
