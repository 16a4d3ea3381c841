//! Newtype IDs for type-safe page references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing node handles with timer or listener handles.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `usize` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `index()`
/// - `From<usize>` and `Into<usize>` implementations
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(RowId);
/// define_id!(ColumnId);
///
/// let row = RowId::new(1);
/// let column = ColumnId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: RowId = column;
/// assert_eq!(row.index(), column.index());
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
        pub struct $name(usize);

        impl $name {
            /// Create a new ID from a `usize` value.
            #[must_use]
            pub const fn new(id: usize) -> Self {
                Self(id)
            }

            /// Get the underlying `usize` value.
            #[must_use]
            pub const fn index(&self) -> usize {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            fn from(id: usize) -> Self {
                Self(id)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Handles into the page model
define_id!(NodeId);
define_id!(ListenerId);
define_id!(TaskId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip_through_usize() {
        let id = NodeId::from(7);
        assert_eq!(usize::from(id), 7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TaskId::new(42).to_string(), "42");
    }

    #[test]
    fn test_ids_order_by_value() {
        assert!(ListenerId::new(1) < ListenerId::new(2));
    }
}
