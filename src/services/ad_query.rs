//! Listing reads over `ads`: filter/sort construction and batch loading of the
//! relations every listing carries (category, seller with profile, media,
//! favorite and review counts).

use std::collections::HashMap;

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use crate::{
    dto::ads::AdList,
    entity::{
        ad_media::{self, Entity as AdMedia},
        ads::{self, Column, Entity as Ads},
        categories::{self, Entity as Categories},
        favorites::{self, Entity as Favorites},
        profiles::Entity as Profiles,
        reviews::{self, Entity as Reviews},
        users::{self, Entity as Users},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Ad, AdCounts, Category, Media, Seller},
    response::{ApiResponse, Meta},
    routes::params::{AdQuery, AdSort, Pagination},
    state::AppState,
};

/// Which media rows to attach to each listed ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaScope {
    All,
    PrimaryOnly,
}

/// Escapes `ILIKE` wildcards so user input matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Builds the filtered, ordered select for the public listing. Only active ads
/// are listed; featured ads always come first.
pub fn listing_select(query: &AdQuery) -> Select<Ads> {
    let mut condition = Condition::all().add(Column::IsActive.eq(true));
    let mut finder = Ads::find();

    if let Some(slug) = query.category_slug() {
        finder = finder.join(JoinType::InnerJoin, ads::Relation::Categories.def());
        condition = condition.add(categories::Column::Slug.eq(slug));
    }

    if let Some(ad_type) = query.ad_type() {
        condition = condition.add(Column::AdType.eq(ad_type));
    }

    if let Some(term) = query.search_term() {
        let pattern = like_pattern(term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Ads, Column::Title)).ilike(pattern.clone()))
                .add(Expr::col((Ads, Column::Description)).ilike(pattern.clone()))
                .add(Expr::col((Ads, Column::Location)).ilike(pattern)),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    if let Some(item_condition) = query.condition {
        condition = condition.add(Column::Condition.eq(item_condition));
    }

    if query.featured_only() {
        condition = condition.add(Column::IsFeatured.eq(true));
    }

    apply_sort(finder.filter(condition), query.sort())
}

pub fn apply_sort(finder: Select<Ads>, sort: AdSort) -> Select<Ads> {
    let finder = finder.order_by_desc(Column::IsFeatured);
    let finder = match sort {
        AdSort::Newest | AdSort::Featured => finder.order_by_desc(Column::CreatedAt),
        AdSort::Oldest => finder.order_by_asc(Column::CreatedAt),
        AdSort::PriceLow => finder.order_by_asc(Column::Price),
        AdSort::PriceHigh => finder.order_by_desc(Column::Price),
        AdSort::Views => finder.order_by_desc(Column::ViewsCount),
    };
    finder.order_by_asc(Column::Id)
}

pub async fn list_ads(state: &AppState, query: AdQuery) -> AppResult<ApiResponse<AdList>> {
    let (page, limit, offset) = query
        .pagination
        .normalize_with(AdQuery::DEFAULT_PER_PAGE);
    let finder = listing_select(&query);

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    tracing::debug!(
        category = ?query.category_slug(),
        ad_type = ?query.ad_type(),
        returned = rows.len(),
        total,
        "listed ads"
    );

    let items = hydrate(&state.orm, rows, MediaScope::All).await?;
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Ads", AdList { items }, Some(meta)))
}

/// Every ad owned by the caller, inactive ones included.
/// Every ad owned by `user_id`, active or not.
pub fn user_ads_select(user_id: Uuid) -> Select<Ads> {
    Ads::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::IsFeatured)
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id)
}

pub async fn list_user_ads(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AdList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = user_ads_select(user.user_id);

    let total = finder.clone().count(&state.orm).await? as i64;
    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = hydrate(&state.orm, rows, MediaScope::PrimaryOnly).await?;
    Ok(ApiResponse::success(
        "User ads",
        AdList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

#[derive(Debug, FromQueryResult)]
struct AdCountRow {
    ad_id: Uuid,
    count: i64,
}

async fn favorite_counts<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, i64>> {
    let rows = Favorites::find()
        .select_only()
        .column(favorites::Column::AdId)
        .column_as(Expr::col(favorites::Column::Id).count(), "count")
        .filter(favorites::Column::AdId.is_in(ids.iter().copied()))
        .group_by(favorites::Column::AdId)
        .into_model::<AdCountRow>()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.ad_id, r.count)).collect())
}

async fn review_counts<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, i64>> {
    let rows = Reviews::find()
        .select_only()
        .column(reviews::Column::AdId)
        .column_as(Expr::col(reviews::Column::Id).count(), "count")
        .filter(reviews::Column::AdId.is_in(ids.iter().copied()))
        .filter(reviews::Column::IsApproved.eq(true))
        .group_by(reviews::Column::AdId)
        .into_model::<AdCountRow>()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| (r.ad_id, r.count)).collect())
}

/// Loads sellers with their profiles, keyed by user id.
pub async fn load_sellers<C: ConnectionTrait>(
    db: &C,
    user_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Seller>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Users::find()
        .filter(users::Column::Id.is_in(user_ids))
        .find_also_related(Profiles)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(user, profile)| (user.id, Seller::from_entity(user, profile)))
        .collect())
}

/// Attaches relations to a page of ads with one query per relation.
pub async fn hydrate<C: ConnectionTrait>(
    db: &C,
    rows: Vec<ads::Model>,
    scope: MediaScope,
) -> AppResult<Vec<Ad>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|a| a.id).collect();
    let mut category_ids: Vec<Uuid> = rows.iter().map(|a| a.category_id).collect();
    category_ids.sort();
    category_ids.dedup();
    let mut user_ids: Vec<Uuid> = rows.iter().map(|a| a.user_id).collect();
    user_ids.sort();
    user_ids.dedup();

    let categories: HashMap<Uuid, Category> = Categories::find()
        .filter(categories::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, Category::from(c)))
        .collect();

    let sellers = load_sellers(db, user_ids).await?;

    let mut media_finder = AdMedia::find().filter(ad_media::Column::AdId.is_in(ids.clone()));
    if scope == MediaScope::PrimaryOnly {
        media_finder = media_finder.filter(ad_media::Column::IsPrimary.eq(true));
    }
    let mut media: HashMap<Uuid, Vec<Media>> = HashMap::new();
    for row in media_finder
        .order_by_asc(ad_media::Column::SortOrder)
        .all(db)
        .await?
    {
        media.entry(row.ad_id).or_default().push(Media::from(row));
    }

    let favorites = favorite_counts(db, &ids).await?;
    let reviews = review_counts(db, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            let category = categories.get(&row.category_id).cloned();
            let user = sellers.get(&row.user_id).cloned();
            let mut ad = Ad::from_entity(row);
            ad.category = category;
            ad.user = user;
            ad.media = media.remove(&id).unwrap_or_default();
            ad.counts = AdCounts {
                favorites: favorites.get(&id).copied().unwrap_or(0),
                reviews: reviews.get(&id).copied().unwrap_or(0),
            };
            ad
        })
        .collect())
}
