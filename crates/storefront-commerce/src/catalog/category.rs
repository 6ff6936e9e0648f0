//! Category records for product organization.

use crate::catalog::product::{null_default, Edge, MediaImage};
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category as listed by the CMS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "null_default")]
    pub database_id: i64,
    /// URL-friendly slug.
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of published products in this category.
    #[serde(default, deserialize_with = "null_default")]
    pub count: i64,
    #[serde(default)]
    pub image: Option<MediaImage>,
    /// Parent category (None for root categories).
    #[serde(default)]
    pub parent: Option<Edge<CategoryRef>>,
}

impl Category {
    pub fn id(&self) -> CategoryId {
        CategoryId::new(self.database_id.to_string())
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent_slug(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.node.slug.as_str())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.source_url.as_str())
    }

    /// Direct children of `parent_slug` within `categories`.
    pub fn children_of<'a>(categories: &'a [Category], parent_slug: &str) -> Vec<&'a Category> {
        categories
            .iter()
            .filter(|c| c.parent_slug() == Some(parent_slug))
            .collect()
    }
}

/// A short category reference embedded in product and category records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default)]
    pub database_id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub slug: String,
    #[serde(default)]
    pub image: Option<MediaImage>,
}
