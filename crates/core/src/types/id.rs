//! Newtype IDs for backend record references.
//!
//! The recipe backend hands out integer primary keys for every collection.
//! Wrapping them keeps a chef's user ID from being passed where a recipe ID is
//! expected.

/// Macro to define a type-safe record ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `Display`, `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use plate_palette_core::define_id;
/// define_id!(MenuId);
/// define_id!(TagId);
///
/// let menu = MenuId::new(7);
/// assert_eq!(menu.to_string(), "7");
///
/// // These are different types, so this won't compile:
/// // let _: MenuId = TagId::new(7);
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
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
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

// Backend collections
define_id!(UserId);
define_id!(RecipeId);
define_id!(ReviewId);
define_id!(CategoryId);
define_id!(OrderId);
