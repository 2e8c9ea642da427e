//! Type-erased resolved values and the shared not-found sentinel.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::Lazy;

/// A resolved value held by the container.
///
/// Everything an injector hands out is an `Arc<dyn Any + Send + Sync>`;
/// callers downcast through the typed helpers on
/// [`TokenResolver`](crate::TokenResolver) or directly with `downcast_ref`.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value for registration or as a resolution fallback.
///
/// # Examples
///
/// ```rust
/// use reflective_di::value;
///
/// let v = value(8080u16);
/// assert_eq!(v.downcast_ref::<u16>(), Some(&8080));
/// ```
pub fn value<T: Send + Sync + 'static>(v: T) -> Value {
    Arc::new(v)
}

/// Explicit nothing-marker.
///
/// A provider that resolves to `Null` is treated as having produced no value:
/// the resolving `get` fails with [`InjectError::NullValue`](crate::InjectError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

// Private marker behind the process-wide throw sentinel. Identity matters,
// the type itself is never exposed.
struct ThrowMarker;

static THROW_IF_NOT_FOUND: Lazy<Value> = Lazy::new(|| Arc::new(ThrowMarker));

/// The process-wide "no fallback supplied" sentinel.
///
/// Passing this to [`Injector::get_with`](crate::Injector::get_with) (and it
/// is the default used by [`Injector::get`](crate::Injector::get)) means a
/// failed lookup must surface as an error rather than return a fallback.
/// All containers share the one sentinel instance; it is recognized by
/// identity via [`is_not_found`], so a caller-supplied fallback can never
/// collide with it.
pub fn throw_if_not_found() -> Value {
    THROW_IF_NOT_FOUND.clone()
}

/// Whether `value` is the shared throw sentinel.
///
/// An optional dependency that could not be resolved is substituted with the
/// caller's fallback; when no fallback was supplied that substitute is the
/// sentinel itself, and factories can use this check to detect absence.
#[inline]
pub fn is_not_found(value: &Value) -> bool {
    Arc::ptr_eq(value, &THROW_IF_NOT_FOUND)
}

macro_rules! zero_check {
    ($value:expr, $($ty:ty),+) => {
        $(
            if let Some(n) = $value.downcast_ref::<$ty>() {
                return *n == 0 as $ty;
            }
        )+
    };
}

/// Loose emptiness test used by the Default-visibility parent fallback.
///
/// Treats `false`, numeric zeros, empty strings, `()` and [`Null`] as falsy;
/// every other value (including any type not listed here) is truthy. This
/// feeds the documented fallback rule where a falsy locally resolved
/// dependency triggers a second lookup against the parent container.
pub fn is_falsy(value: &Value) -> bool {
    if value.downcast_ref::<Null>().is_some() || value.downcast_ref::<()>().is_some() {
        return true;
    }
    if let Some(b) = value.downcast_ref::<bool>() {
        return !b;
    }
    zero_check!(value, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    if let Some(f) = value.downcast_ref::<f32>() {
        return *f == 0.0;
    }
    if let Some(f) = value.downcast_ref::<f64>() {
        return *f == 0.0;
    }
    if let Some(s) = value.downcast_ref::<String>() {
        return s.is_empty();
    }
    if let Some(s) = value.downcast_ref::<&'static str>() {
        return s.is_empty();
    }
    false
}
