//! Newtype IDs for type-safe entity references.
//!
//! Every table in the shop uses an `INTEGER` surrogate key. Wrapping those
//! keys in distinct types stops a `CartLineId` from being passed where a
//! `ProductId` is expected.

/// Define a type-safe ID wrapper around `i32`.
///
/// The generated type:
/// - serializes transparently (a JSON number)
/// - implements `Display`, `From<i32>` and `Into<i32>`
/// - offers `from_positive` / `parse_positive` for untrusted request input
/// - derives `sqlx::Type` as a transparent `INTEGER` when the `postgres`
///   feature of the expanding crate is enabled
///
/// # Example
///
/// ```rust
/// # use eco_friendly_core::define_id;
/// define_id!(WidgetId);
///
/// assert_eq!(WidgetId::from_positive(7), Some(WidgetId::new(7)));
/// assert_eq!(WidgetId::parse_positive(" 12 "), Some(WidgetId::new(12)));
/// assert_eq!(WidgetId::from_positive(0), None);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type), sqlx(transparent))]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Accept a key from request input. Zero, negative and
            /// out-of-range values are rejected.
            #[must_use]
            pub fn from_positive(raw: i64) -> Option<Self> {
                i32::try_from(raw).ok().filter(|id| *id > 0).map(Self)
            }

            /// Parse a key from text (query strings, JSON strings).
            #[must_use]
            pub fn parse_positive(raw: &str) -> Option<Self> {
                raw.trim().parse::<i64>().ok().and_then(Self::from_positive)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(CartLineId);
define_id!(OrderId);
define_id!(OrderLineId);
define_id!(ContactId);
