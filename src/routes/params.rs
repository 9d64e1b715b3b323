use std::str::FromStr;

use sea_orm::ActiveEnum;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::{AdType, ItemCondition, parse_enum};

// Query strings arrive as text, and `#[serde(flatten)]` hides the original
// types from serde_urlencoded, so every typed parameter goes through these.
// Values that do not parse are treated as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<T>().ok()))
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: ActiveEnum<Value = String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_enum))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, alias = "limit", deserialize_with = "lenient")]
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        self.normalize_with(20)
    }

    pub fn normalize_with(&self, default_per_page: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdSort {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    Views,
    Featured,
}

impl FromStr for AdSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(AdSort::Newest),
            "oldest" => Ok(AdSort::Oldest),
            "price_low" | "price_asc" => Ok(AdSort::PriceLow),
            "price_high" | "price_desc" => Ok(AdSort::PriceHigh),
            "views" | "most_viewed" => Ok(AdSort::Views),
            "featured" => Ok(AdSort::Featured),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Category slug.
    pub category: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_enum")]
    pub type_param: Option<AdType>,
    #[serde(rename = "adType", default, deserialize_with = "lenient_enum")]
    pub ad_type_param: Option<AdType>,
    pub search: Option<String>,
    pub q: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub condition: Option<ItemCondition>,
    pub featured: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sort: Option<AdSort>,
}

impl AdQuery {
    pub const DEFAULT_PER_PAGE: i64 = 12;

    pub fn ad_type(&self) -> Option<AdType> {
        self.ad_type_param.or(self.type_param)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .or(self.q.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn category_slug(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn featured_only(&self) -> bool {
        self.featured.as_deref() == Some("true")
    }

    pub fn sort(&self) -> AdSort {
        self.sort.unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MessageQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Restrict to the conversation with this user.
    #[serde(default, deserialize_with = "lenient")]
    pub with: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlaceholderQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    fn parse<T: serde::de::DeserializeOwned>(uri: &str) -> T {
        let uri: Uri = uri.parse().unwrap();
        Query::<T>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn parses_full_listing_query() {
        let q: AdQuery = parse(
            "/api/ads?category=cars&type=sale&search=%20corolla%20&min_price=100&max_price=900.5\
             &condition=used&featured=true&sort=price_low&page=2&limit=5",
        );
        assert_eq!(q.category_slug(), Some("cars"));
        assert_eq!(q.ad_type(), Some(AdType::Sale));
        assert_eq!(q.search_term(), Some("corolla"));
        assert_eq!(q.min_price, Some(100.0));
        assert_eq!(q.max_price, Some(900.5));
        assert_eq!(q.condition, Some(ItemCondition::Used));
        assert!(q.featured_only());
        assert_eq!(q.sort(), AdSort::PriceLow);
        assert_eq!(q.pagination.normalize_with(AdQuery::DEFAULT_PER_PAGE), (2, 5, 5));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let q: AdQuery =
            parse("/api/ads?page=abc&limit=-&min_price=cheap&type=AUCTION&sort=random&featured=1");
        assert_eq!(q.pagination.normalize_with(AdQuery::DEFAULT_PER_PAGE), (1, 12, 0));
        assert_eq!(q.min_price, None);
        assert_eq!(q.ad_type(), None);
        assert_eq!(q.sort(), AdSort::Newest);
        assert!(!q.featured_only());
    }

    #[test]
    fn ad_type_camel_case_wins_over_type() {
        let q: AdQuery = parse("/api/ads?type=RENT&adType=WANTED");
        assert_eq!(q.ad_type(), Some(AdType::Wanted));
    }

    #[test]
    fn pagination_is_clamped() {
        let p = Pagination::new(0, 1000);
        assert_eq!(p.normalize(), (1, 100, 0));
        let p = Pagination::default();
        assert_eq!(p.normalize(), (1, 20, 0));
    }

    #[test]
    fn message_query_ignores_invalid_uuid() {
        let q: MessageQuery = parse("/api/messages?with=not-a-uuid&page=3");
        assert_eq!(q.with, None);
        assert_eq!(q.pagination.page, Some(3));
    }
}
