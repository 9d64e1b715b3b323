use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::ads::CategoryList,
    entity::categories::{self, Entity as Categories},
    error::AppResult,
    models::Category,
    response::ApiResponse,
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = Categories::find()
        .filter(categories::Column::IsActive.eq(true))
        .order_by_asc(categories::Column::NameEn)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    Ok(ApiResponse::success("Categories", CategoryList { items }, None))
}
