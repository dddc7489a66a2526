//! List and detail kinds with their backend endpoints

use crate::decode::{Envelope, ROOT_PATH};
use crate::error::{Error, Result};
use crate::pagination::{OffsetPaginator, StopCondition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TOTAL_ALIASES: [&str; 4] = ["total", "count", "productsCount", "pagination.total"];

// ============================================================================
// List kinds
// ============================================================================

/// A paginated list bound to a parent entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListKind {
    /// Products sold by a store
    StoreProducts,
    /// Products in a curated collection
    CollectionProducts,
    /// Stores in a curated collection
    CollectionStores,
    /// Collections owned by a user
    UserCollections,
    /// Products related to a product
    RelatedProducts,
}

impl ListKind {
    /// Every list kind
    pub const ALL: [ListKind; 5] = [
        ListKind::StoreProducts,
        ListKind::CollectionProducts,
        ListKind::CollectionStores,
        ListKind::UserCollections,
        ListKind::RelatedProducts,
    ];

    /// Kebab-case name used on the command line and in server routes
    pub fn name(self) -> &'static str {
        match self {
            Self::StoreProducts => "store-products",
            Self::CollectionProducts => "collection-products",
            Self::CollectionStores => "collection-stores",
            Self::UserCollections => "user-collections",
            Self::RelatedProducts => "related-products",
        }
    }

    /// Page size the site uses for this list
    pub fn default_page_size(self) -> u32 {
        match self {
            Self::StoreProducts | Self::CollectionProducts => 24,
            Self::CollectionStores | Self::RelatedProducts => 20,
            Self::UserCollections => 21,
        }
    }

    /// Whether a reported total ends this list
    pub fn stop_condition(self) -> StopCondition {
        match self {
            Self::StoreProducts | Self::CollectionProducts => StopCondition::ShortPageOrTotal,
            Self::CollectionStores | Self::UserCollections | Self::RelatedProducts => {
                StopCondition::ShortPage
            }
        }
    }

    /// Paginator with this list's parameter names and default page size
    pub fn paginator(self) -> OffsetPaginator {
        let (limit_param, offset_param) = match self {
            Self::StoreProducts => ("size", "from"),
            _ => ("limit", "offset"),
        };
        OffsetPaginator::new(
            limit_param,
            offset_param,
            self.default_page_size(),
            self.stop_condition(),
        )
    }

    /// Where items and totals sit in the response body
    pub fn envelope(self) -> Envelope {
        match self {
            Self::StoreProducts => Envelope::items(["data", "products"]).with_total(TOTAL_ALIASES),
            Self::CollectionProducts => {
                Envelope::items(["products", "data"]).with_total(TOTAL_ALIASES)
            }
            Self::CollectionStores => Envelope::items(["stores", "data"]).with_total(TOTAL_ALIASES),
            Self::UserCollections => {
                Envelope::items(["collections", "data"]).with_total(TOTAL_ALIASES)
            }
            Self::RelatedProducts => {
                Envelope::items(["relatedProducts", "data", ROOT_PATH]).with_total(TOTAL_ALIASES)
            }
        }
    }

    /// Resolve the endpoint for one parent
    pub fn endpoint(self, parent_id: &str) -> Result<ListEndpoint> {
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Err(Error::invalid_request(format!(
                "{} requires a parent id",
                self.name()
            )));
        }

        let id = parent_id.to_string();
        let (segments, query): (Vec<String>, Vec<(String, String)>) = match self {
            Self::StoreProducts => (
                vec!["products".into(), "ready".into()],
                vec![("store_id".to_string(), id)],
            ),
            Self::CollectionProducts => (
                vec!["collections".into(), id, "products".into()],
                Vec::new(),
            ),
            Self::CollectionStores => (
                vec!["collections".into(), id, "stores".into()],
                Vec::new(),
            ),
            Self::UserCollections => (
                vec!["collections".into(), "user".into(), id],
                Vec::new(),
            ),
            Self::RelatedProducts => (
                vec!["products".into(), "related".into(), id],
                Vec::new(),
            ),
        };

        Ok(ListEndpoint {
            kind: self,
            parent_id: parent_id.to_string(),
            segments,
            query,
            paginator: self.paginator(),
            envelope: self.envelope(),
        })
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ListKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| Error::unknown_kind(s))
    }
}

/// A list request target: path, fixed query, paging and envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEndpoint {
    /// List kind
    pub kind: ListKind,
    /// Parent entity id
    pub parent_id: String,
    /// Unencoded path segments under the base URL
    pub segments: Vec<String>,
    /// Query parameters sent with every page
    pub query: Vec<(String, String)>,
    /// Paging parameters and stop condition
    pub paginator: OffsetPaginator,
    /// Response envelope
    pub envelope: Envelope,
}

impl ListEndpoint {
    /// Override the page size
    #[must_use]
    pub fn with_page_size(mut self, limit: u32) -> Self {
        self.paginator = self.paginator.with_limit(limit);
        self
    }

    /// Page size for this endpoint
    pub fn page_size(&self) -> u32 {
        self.paginator.limit
    }

    /// Full query for one page: fixed params first, then paging params
    pub fn page_query(&self, limit: u32, offset: u64) -> Vec<(String, String)> {
        let mut query = self.query.clone();
        query.extend(self.paginator.params(limit, offset));
        query
    }

    /// Slash-joined path, for logs
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

// ============================================================================
// Detail kinds
// ============================================================================

/// A single record the site renders a page for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailKind {
    /// Store page
    Store,
    /// Product page, with related products
    Product,
    /// Curated collection
    Collection,
    /// Outfit post
    Outfit,
    /// External user profile
    ExternalProfile,
}

impl DetailKind {
    /// Every detail kind
    pub const ALL: [DetailKind; 5] = [
        DetailKind::Store,
        DetailKind::Product,
        DetailKind::Collection,
        DetailKind::Outfit,
        DetailKind::ExternalProfile,
    ];

    /// Kebab-case name used on the command line and in server routes
    pub fn name(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Product => "product",
            Self::Collection => "collection",
            Self::Outfit => "outfit",
            Self::ExternalProfile => "external-profile",
        }
    }

    /// Resolve the endpoint for one id
    pub fn endpoint(self, id: &str) -> Result<DetailEndpoint> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::invalid_request(format!("{} requires an id", self.name())));
        }
        let id = id.to_string();

        let (segments, query, field): (Vec<String>, Vec<(&str, &str)>, Option<&'static str>) =
            match self {
                Self::Store => (vec!["stores".into(), id], Vec::new(), Some("store")),
                Self::Product => (
                    vec!["products".into(), id],
                    vec![
                        ("related", "true"),
                        ("product", "true"),
                        ("relatedLimit", "20"),
                        ("relatedOffset", "0"),
                    ],
                    None,
                ),
                Self::Collection => (
                    vec!["collections".into(), "ready".into(), id],
                    Vec::new(),
                    Some("collection"),
                ),
                Self::Outfit => (
                    vec!["outfits".into(), id],
                    vec![("includeProducts", "true"), ("limit", "24"), ("offset", "0")],
                    Some("outfit"),
                ),
                Self::ExternalProfile => {
                    (vec!["user".into(), "account".into(), id], Vec::new(), None)
                }
            };

        Ok(DetailEndpoint {
            kind: self,
            segments,
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            field,
        })
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DetailKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| Error::unknown_kind(s))
    }
}

/// A detail request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEndpoint {
    /// Detail kind
    pub kind: DetailKind,
    /// Unencoded path segments under the base URL
    pub segments: Vec<String>,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Envelope field holding the record, or the whole body
    pub field: Option<&'static str>,
}
