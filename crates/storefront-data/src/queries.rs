//! GraphQL documents issued against the CMS.

/// Paginated product listing.
pub const GET_PRODUCTS: &str = r#"
  query GetProducts($first: Int = 12, $after: String) {
    products(first: $first, after: $after, where: { status: "publish" }) {
      nodes {
        databaseId
        slug
        name
        shortDescription
        description
        onSale
        featured
        totalSales
        image { sourceUrl altText }
        galleryImages { nodes { sourceUrl altText } }
        productCategories { nodes { databaseId name slug } }
        ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on VariableProduct {
          price regularPrice salePrice stockStatus stockQuantity
          variations {
            nodes { databaseId name price regularPrice salePrice stockStatus stockQuantity }
          }
        }
        ... on ExternalProduct { price regularPrice salePrice }
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    }
  }
"#;

/// Products currently on sale, for the flash sale strip.
pub const GET_FLASH_SALE_PRODUCTS: &str = r#"
  query GetFlashSaleProducts($first: Int = 8) {
    products(first: $first, where: { status: "publish", onSale: true }) {
      nodes {
        databaseId
        slug
        name
        shortDescription
        onSale
        featured
        totalSales
        image { sourceUrl altText }
        productCategories(first: 1) { nodes { name slug } }
        ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on VariableProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on ExternalProduct { price regularPrice salePrice }
      }
    }
  }
"#;

/// Featured products, with ratings.
pub const GET_FEATURED_PRODUCTS: &str = r#"
  query GetFeaturedProducts($first: Int = 8) {
    products(first: $first, where: { status: "publish", featured: true }) {
      nodes {
        databaseId
        slug
        name
        shortDescription
        onSale
        featured
        totalSales
        averageRating
        reviewCount
        image { sourceUrl altText }
        productCategories(first: 1) { nodes { name slug } }
        ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on VariableProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on ExternalProduct { price regularPrice salePrice }
      }
    }
  }
"#;

/// Paginated products of one category.
pub const GET_PRODUCTS_BY_CATEGORY: &str = r#"
  query GetProductsByCategory($categoryId: Int!, $first: Int = 12, $after: String) {
    products(
      first: $first,
      after: $after,
      where: { status: "publish", categoryId: $categoryId }
    ) {
      nodes {
        databaseId
        slug
        name
        shortDescription
        onSale
        featured
        totalSales
        image { sourceUrl altText }
        productCategories { nodes { databaseId name slug } }
        ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on VariableProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on ExternalProduct { price regularPrice salePrice }
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    }
  }
"#;

/// One product with variations, for the detail page.
pub const GET_PRODUCT_BY_SLUG: &str = r#"
  query GetProductBySlug($slug: ID!) {
    product(id: $slug, idType: SLUG) {
      databaseId
      slug
      name
      shortDescription
      description
      onSale
      featured
      totalSales
      averageRating
      reviewCount
      image { sourceUrl altText }
      galleryImages { nodes { sourceUrl altText } }
      productCategories { nodes { databaseId name slug } }
      ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
      ... on VariableProduct {
        price regularPrice salePrice stockStatus stockQuantity
        variations {
          nodes {
            databaseId
            name
            price
            regularPrice
            salePrice
            stockStatus
            stockQuantity
            attributes { nodes { name value } }
          }
        }
      }
      ... on ExternalProduct { price regularPrice salePrice }
    }
  }
"#;

/// Full-text product search.
pub const SEARCH_PRODUCTS: &str = r#"
  query SearchProducts($search: String!, $first: Int = 20) {
    products(first: $first, where: { status: "publish", search: $search }) {
      nodes {
        databaseId
        slug
        name
        shortDescription
        onSale
        featured
        image { sourceUrl altText }
        productCategories(first: 1) { nodes { name slug } }
        ... on SimpleProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on VariableProduct { price regularPrice salePrice stockStatus stockQuantity }
        ... on ExternalProduct { price regularPrice salePrice }
      }
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    }
  }
"#;

/// Non-empty product categories.
pub const GET_PRODUCT_CATEGORIES: &str = r#"
  query GetProductCategories($first: Int = 20) {
    productCategories(first: $first, where: { hideEmpty: true }) {
      nodes {
        databaseId
        slug
        name
        description
        count
        image { sourceUrl altText }
        parent { node { slug name } }
      }
    }
  }
"#;
