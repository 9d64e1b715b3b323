use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::messages::{MessageList, SendMessageRequest},
    entity::{
        ads::{self, Entity as Ads},
        messages::{self, Column, Entity as Messages},
        users::{self, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{AdRef, Message, Participant},
    response::{ApiResponse, Meta},
    routes::params::MessageQuery,
    state::AppState,
};

/// Messages visible to `me`, optionally narrowed to the conversation with `with`.
pub fn inbox_select(me: Uuid, with: Option<Uuid>) -> Select<Messages> {
    let condition = match with {
        Some(other) => Condition::any()
            .add(
                Condition::all()
                    .add(Column::SenderId.eq(me))
                    .add(Column::RecipientId.eq(other)),
            )
            .add(
                Condition::all()
                    .add(Column::SenderId.eq(other))
                    .add(Column::RecipientId.eq(me)),
            ),
        None => Condition::any()
            .add(Column::SenderId.eq(me))
            .add(Column::RecipientId.eq(me)),
    };
    Messages::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

async fn attach_relations(state: &AppState, rows: Vec<messages::Model>) -> AppResult<Vec<Message>> {
    let mut user_ids: Vec<Uuid> = rows
        .iter()
        .flat_map(|m| [m.sender_id, m.recipient_id])
        .collect();
    user_ids.sort();
    user_ids.dedup();
    let mut ad_ids: Vec<Uuid> = rows.iter().filter_map(|m| m.ad_id).collect();
    ad_ids.sort();
    ad_ids.dedup();

    let users: HashMap<Uuid, Participant> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
            .iter()
            .map(|u| (u.id, Participant::from(u)))
            .collect()
    };

    let ads: HashMap<Uuid, AdRef> = if ad_ids.is_empty() {
        HashMap::new()
    } else {
        Ads::find()
            .filter(ads::Column::Id.is_in(ad_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|a| {
                (
                    a.id,
                    AdRef {
                        id: a.id,
                        title: a.title,
                    },
                )
            })
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|row| {
            let sender = users.get(&row.sender_id).cloned();
            let recipient = users.get(&row.recipient_id).cloned();
            let ad = row.ad_id.and_then(|id| ads.get(&id).cloned());
            let mut message = Message::from_entity(row);
            message.sender = sender;
            message.recipient = recipient;
            message.ad = ad;
            message
        })
        .collect())
}

pub async fn send_message(
    state: &AppState,
    user: &AuthUser,
    payload: SendMessageRequest,
) -> AppResult<ApiResponse<Message>> {
    let content = payload
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let (Some(recipient_id), Some(content)) = (payload.recipient_id, content) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    if recipient_id == user.user_id {
        return Err(AppError::bad_request("You cannot message yourself"));
    }

    if Users::find_by_id(recipient_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }
    if let Some(ad_id) = payload.ad_id {
        if Ads::find_by_id(ad_id).one(&state.orm).await?.is_none() {
            return Err(AppError::NotFound);
        }
    }

    let message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        sender_id: Set(user.user_id),
        recipient_id: Set(recipient_id),
        ad_id: Set(payload.ad_id),
        content: Set(content),
        is_read: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "message_send",
        "messages",
        serde_json::json!({ "message_id": message.id, "recipient_id": recipient_id }),
    )
    .await;

    let mut items = attach_relations(state, vec![message]).await?;
    let message = items.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Message sent", message, Some(Meta::empty())))
}

pub async fn list_messages(
    state: &AppState,
    user: &AuthUser,
    query: MessageQuery,
) -> AppResult<ApiResponse<MessageList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let finder = inbox_select(user.user_id, query.with);

    let total = finder.clone().count(&state.orm).await? as i64;
    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = attach_relations(state, rows).await?;
    Ok(ApiResponse::success(
        "Messages",
        MessageList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Only the recipient can mark a message read; anyone else sees 404.
pub async fn mark_read(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Message>> {
    let message = Messages::find_by_id(id)
        .filter(Column::RecipientId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let message = if message.is_read {
        message
    } else {
        let mut active: messages::ActiveModel = message.into();
        active.is_read = Set(true);
        active.update(&state.orm).await?
    };

    let mut items = attach_relations(state, vec![message]).await?;
    let message = items.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Message read", message, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn inbox_includes_sent_and_received() {
        let me = Uuid::nil();
        let sql = inbox_select(me, None).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""messages"."sender_id" = '00000000-0000-0000-0000-000000000000' OR "messages"."recipient_id" = '00000000-0000-0000-0000-000000000000'"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "messages"."created_at" DESC"#), "{sql}");
    }

    #[test]
    fn conversation_filter_matches_both_directions() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let sql = inbox_select(me, Some(other))
            .build(DbBackend::Postgres)
            .to_string();
        let forward = format!(
            r#"("messages"."sender_id" = '{me}' AND "messages"."recipient_id" = '{other}')"#
        );
        let backward = format!(
            r#"("messages"."sender_id" = '{other}' AND "messages"."recipient_id" = '{me}')"#
        );
        assert!(sql.contains(&forward), "{sql}");
        assert!(sql.contains(&backward), "{sql}");
    }
}
