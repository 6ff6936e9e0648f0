//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where a LineId is expected. All of them
//! serialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(LineId);
define_id!(CategoryId);

impl LineId {
    /// Build the conventional line id for a product/variant pair.
    ///
    /// `"<product>-<variant>"`, or just `"<product>"` when no variant is
    /// selected.
    pub fn compose(product_id: &ProductId, variant_id: Option<&VariantId>) -> Self {
        match variant_id {
            Some(variant) => Self(format!("{}-{}", product_id, variant)),
            None => Self(product_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
    }

    #[test]
    fn test_id_display() {
        let id = VariantId::new("256GB-blue");
        assert_eq!(format!("{}", id), "256GB-blue");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = LineId::new("line-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""line-1""#);
        let back: LineId = serde_json::from_str(r#""line-1""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_line_id_compose() {
        let product = ProductId::new("42");
        let variant = VariantId::new("256GB-black");

        assert_eq!(LineId::compose(&product, Some(&variant)).as_str(), "42-256GB-black");
        assert_eq!(LineId::compose(&product, None).as_str(), "42");
    }
}
