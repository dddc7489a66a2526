//! Wire models for backend records
//!
//! Field names follow the backend, which mixes snake_case (product and store
//! listings) with camelCase (collections, outfits, profiles). Everything the
//! backend may omit is optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price, sent either as a number or as a decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric value, parsing text prices
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{amount:.2}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// List items
// ============================================================================

/// Product card shown in product grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(alias = "id")]
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub stock: Option<bool>,
}

/// Store card and store page header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default, rename = "isAdded")]
    pub is_added: Option<bool>,
}

/// Collection card in a user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "user_id", alias = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub preview_images: Vec<String>,
    #[serde(default)]
    pub owner_user_name: Option<String>,
    #[serde(default)]
    pub owner_profile_picture: Option<String>,
}

// ============================================================================
// Detail records
// ============================================================================

/// Product image with optional intrinsic size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Full product page record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub store_logo: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub promotional_price: Option<Price>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub stock: Option<bool>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductDetail {
    /// Price a shopper pays: the promotional price when it is lower
    pub fn effective_price(&self) -> Option<f64> {
        let regular = self.price.as_ref().and_then(Price::amount);
        let promo = self.promotional_price.as_ref().and_then(Price::amount);
        match (regular, promo) {
            (Some(r), Some(p)) => Some(r.min(p)),
            (r, p) => r.or(p),
        }
    }
}

/// Product page response: the product plus its first related page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithRelated {
    #[serde(default)]
    pub product: Option<ProductDetail>,
    #[serde(default)]
    pub related_products: Vec<ProductSummary>,
}

/// Curated collection header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub stores_count: Option<u64>,
    #[serde(default)]
    pub products_count: Option<u64>,
}

/// Brand tag placed on an outfit image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandTag {
    pub id: String,
    pub brand_id: String,
    pub brand_name: String,
    #[serde(default)]
    pub brand_logo: Option<String>,
    pub x_coord: f64,
    pub y_coord: f64,
    #[serde(default)]
    pub url: Option<String>,
}

/// Outfit image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub relevance: Option<f64>,
    #[serde(default)]
    pub brand_tags: Vec<BrandTag>,
}

/// Author of an outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitUser {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Product shown under an outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitProduct {
    pub product_id: String,
    pub name: String,
    pub price: Price,
    pub image_url: String,
}

/// Outfit post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub images: Vec<OutfitImage>,
    #[serde(default)]
    pub user: Option<OutfitUser>,
    #[serde(default)]
    pub similar_products: Vec<OutfitProduct>,
}

/// Public profile of an app user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProfile {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub products_count: Option<u64>,
    #[serde(default)]
    pub stores_count: Option<u64>,
}

impl ExternalProfile {
    /// Best available display name: full name, then either username field
    pub fn display_name(&self) -> Option<&str> {
        [&self.name, &self.user_name, &self.username]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    /// Handle for `@mentions`
    pub fn handle(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.user_name.as_deref())
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
    }
}
