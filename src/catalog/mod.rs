//! Catalog module
//!
//! The lists and detail records the site renders, and where the backend
//! serves each one.
//!
//! | List kind             | Path                         | Params        | Size | Stop            |
//! |-----------------------|------------------------------|---------------|------|-----------------|
//! | `store-products`      | `products/ready?store_id=`   | `size`/`from` | 24   | short or total  |
//! | `collection-products` | `collections/{id}/products`  | `limit`/`offset` | 24 | short or total |
//! | `collection-stores`   | `collections/{id}/stores`    | `limit`/`offset` | 20 | short page     |
//! | `user-collections`    | `collections/user/{id}`      | `limit`/`offset` | 21 | short page     |
//! | `related-products`    | `products/related/{id}`      | `limit`/`offset` | 20 | short page     |

mod kinds;
mod models;

pub use kinds::{DetailEndpoint, DetailKind, ListEndpoint, ListKind};
pub use models::{
    BrandTag, CollectionDetail, CollectionSummary, ExternalProfile, Outfit, OutfitImage,
    OutfitProduct, OutfitUser, Price, ProductDetail, ProductImage, ProductSummary,
    ProductWithRelated, StoreSummary,
};
