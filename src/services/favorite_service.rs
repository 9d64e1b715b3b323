use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        ads::AdList,
        favorites::{FavoriteState, ToggleFavoriteRequest},
    },
    entity::{
        ads::{self, Entity as Ads},
        favorites::{self, Entity as Favorites},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::ad_query::{MediaScope, hydrate},
    state::AppState,
};

/// Adds the ad to the caller's favorites, or removes it when already there.
pub async fn toggle_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: ToggleFavoriteRequest,
) -> AppResult<ApiResponse<FavoriteState>> {
    let ad_id = payload
        .ad_id
        .ok_or_else(|| AppError::bad_request("ad_id is required"))?;

    if Ads::find_by_id(ad_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let existing = Favorites::find()
        .filter(favorites::Column::UserId.eq(user.user_id))
        .filter(favorites::Column::AdId.eq(ad_id))
        .one(&state.orm)
        .await?;

    let favorited = match existing {
        Some(favorite) => {
            favorite.delete(&state.orm).await?;
            false
        }
        None => {
            // a concurrent toggle may have inserted the pair already
            Favorites::insert(favorites::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                ad_id: Set(ad_id),
                created_at: NotSet,
            })
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::AdId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&state.orm)
            .await?;
            true
        }
    };

    audit::record(
        &state.pool,
        Some(user.user_id),
        if favorited { "favorite_add" } else { "favorite_remove" },
        "favorites",
        serde_json::json!({ "ad_id": ad_id }),
    )
    .await;

    let message = if favorited {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    Ok(ApiResponse::success(
        message,
        FavoriteState { ad_id, favorited },
        Some(Meta::empty()),
    ))
}

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AdList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Favorites::find().filter(favorites::Column::UserId.eq(user.user_id));

    let total = finder.clone().count(&state.orm).await? as i64;
    let ad_ids: Vec<Uuid> = finder
        .order_by_desc(favorites::Column::CreatedAt)
        .order_by_desc(favorites::Column::Id)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|f| f.ad_id)
        .collect();

    let mut by_id: HashMap<Uuid, ads::Model> = if ad_ids.is_empty() {
        HashMap::new()
    } else {
        Ads::find()
            .filter(ads::Column::Id.is_in(ad_ids.clone()))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };
    let rows: Vec<ads::Model> = ad_ids.iter().filter_map(|id| by_id.remove(id)).collect();

    let items = hydrate(&state.orm, rows, MediaScope::PrimaryOnly).await?;
    Ok(ApiResponse::success(
        "Favorites",
        AdList { items },
        Some(Meta::new(page, limit, total)),
    ))
}
