#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use classifieds_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        categories::ActiveModel as CategoryActive,
        profiles::ActiveModel as ProfileActive,
        sea_orm_active_enums::ProfileType,
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

/// Allow skipping when no DB is configured in the environment.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE messages, favorites, reviews, ad_media, property_details, car_details, \
         ads, categories, profiles, audit_logs, users CASCADE",
    ))
    .await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_ttl_hours: 1,
        upload_dir: scratch_dir(),
        max_concurrency: 10,
    };

    Ok(AppState {
        pool,
        orm,
        config: Arc::new(config),
    })
}

pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("classifieds-test-{}", Uuid::new_v4()))
}

pub async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(email.split('@').next().unwrap_or(email).to_string()),
        email: Set(email.to_string()),
        phone: Set(None),
        password_hash: Set("dummy".into()),
        avatar: Set(None),
        role: Set(role.into()),
        is_verified: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    ProfileActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        profile_type: Set(ProfileType::Personal),
        company_name: Set(None),
        description: Set(None),
        location: Set(None),
        website: Set(None),
        rating: Set(0.0),
        total_reviews: Set(0),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: role.into(),
    })
}

pub async fn create_category(state: &AppState, slug: &str, name_en: &str) -> anyhow::Result<Uuid> {
    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug.into()),
        name_ar: Set(name_en.into()),
        name_en: Set(name_en.into()),
        icon: Set(None),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(category.id)
}
