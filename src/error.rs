//! Error types for the reflective injector.

use std::fmt;

/// Resolution and normalization errors
///
/// Represents the error conditions that can occur while normalizing provider
/// declarations or resolving tokens. Every variant carries the display name
/// of the token (or class) involved.
///
/// # Examples
///
/// ```rust
/// use reflective_di::{InjectError, Injector, ReflectiveInjector, Token};
///
/// let injector = ReflectiveInjector::resolve_and_create(vec![]).unwrap();
/// match injector.get(&Token::of::<String>()) {
///     Err(InjectError::NotFound(name)) => {
///         assert_eq!(name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// No provider for the token in the searched scope(s)
    NotFound(&'static str),
    /// A provider resolved but produced the explicit nothing-marker
    NullValue(&'static str),
    /// A class provider had neither explicit deps nor registered metadata
    MissingMetadata(&'static str),
    /// Typed downcast of a resolved value failed
    TypeMismatch(&'static str),
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::NotFound(name) => write!(f, "No provider for {}", name),
            InjectError::NullValue(name) => write!(f, "Provider for {} produced no value", name),
            InjectError::MissingMetadata(name) => {
                write!(f, "No constructor metadata registered for {}", name)
            }
            InjectError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for InjectError {}

/// Result type for injector operations
pub type InjectResult<T> = Result<T, InjectError>;
