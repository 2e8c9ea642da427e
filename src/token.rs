//! Token types used as lookup keys in the injector.

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity key for provider storage and lookup.
///
/// Tokens are compared by identity, never by structural equality or
/// subtyping: a `Type` token is its `TypeId`, an `Injection` token is the
/// unique id minted when the corresponding [`InjectionToken`] was created.
/// The carried name is diagnostic only and takes no part in equality or
/// hashing.
///
/// # Examples
///
/// ```rust
/// use reflective_di::{Token, InjectionToken};
///
/// struct Database;
///
/// let by_type = Token::of::<Database>();
/// assert_eq!(by_type, Token::of::<Database>());
///
/// let port: InjectionToken<u16> = InjectionToken::new("server.port");
/// let other: InjectionToken<u16> = InjectionToken::new("server.port");
/// // Two tokens with the same description are still distinct identities.
/// assert_ne!(port.token(), other.token());
/// ```
#[derive(Debug, Clone)]
pub enum Token {
    /// Concrete type token with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Explicit injection-token value with unique id and description
    Injection(u64, &'static str),
}

impl Token {
    /// Creates the token for a concrete type.
    #[inline(always)]
    pub fn of<T: 'static>() -> Token {
        Token::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Get the type name or token description for display.
    ///
    /// Used only in error messages and debug dumps.
    pub fn display_name(&self) -> &'static str {
        match self {
            Token::Type(_, name) => name,
            Token::Injection(_, desc) => desc,
        }
    }
}

// Identity comparison: the display string is ignored.
impl PartialEq for Token {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Type(a, _), Token::Type(b, _)) => a == b,
            (Token::Injection(a, _), Token::Injection(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Token::Type(id, _) => {
                0u8.hash(state); // Discriminant
                id.hash(state);
            }
            Token::Injection(id, _) => {
                1u8.hash(state);
                id.hash(state);
            }
        }
    }
}

static NEXT_INJECTION_ID: AtomicU64 = AtomicU64::new(0);

/// Typed handle for an explicit injection-token value.
///
/// An `InjectionToken<T>` mints a fresh [`Token`] identity when created, so
/// providers can be registered under keys that are not concrete types (config
/// values, interface-like slots). The `T` parameter only drives the typed
/// resolution helper [`TokenResolver::get_token`](crate::TokenResolver::get_token);
/// it is not checked at registration time.
///
/// # Examples
///
/// ```rust
/// use reflective_di::{InjectionToken, Provider, ReflectiveInjector, TokenResolver, value};
///
/// let base_url: InjectionToken<String> = InjectionToken::new("api.base_url");
/// let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
///     provide: base_url.token(),
///     use_value: value("https://api.example.com".to_string()),
/// }])
/// .unwrap();
///
/// let url = injector.get_token(&base_url).unwrap();
/// assert_eq!(&*url, "https://api.example.com");
/// ```
#[derive(Debug)]
pub struct InjectionToken<T: ?Sized> {
    id: u64,
    desc: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> InjectionToken<T> {
    /// Creates a new injection token with a fresh identity.
    pub fn new(desc: &'static str) -> Self {
        Self {
            id: NEXT_INJECTION_ID.fetch_add(1, Ordering::Relaxed),
            desc,
            _marker: PhantomData,
        }
    }

    /// The underlying identity key for this token.
    pub fn token(&self) -> Token {
        Token::Injection(self.id, self.desc)
    }

    /// The description supplied at creation, for diagnostics.
    pub fn description(&self) -> &'static str {
        self.desc
    }
}

// Cloning preserves identity: a clone resolves the same registrations.
impl<T: ?Sized> Clone for InjectionToken<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            desc: self.desc,
            _marker: PhantomData,
        }
    }
}
