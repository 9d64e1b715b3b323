use classifieds_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let real_estate = ensure_category(&pool, "real-estate", "عقارات", "Real Estate", "home").await?;
    let cars = ensure_category(&pool, "cars", "سيارات", "Cars", "car").await?;

    let admin_id = ensure_user(
        &pool,
        SeedUser {
            name: "Admin",
            email: "admin@example.com",
            phone: "+963900000001",
            password: "admin123",
            role: "admin",
            profile_type: "ADMIN",
        },
    )
    .await?;
    let user_id = ensure_user(
        &pool,
        SeedUser {
            name: "Demo Seller",
            email: "user@example.com",
            phone: "+963900000002",
            password: "user123",
            role: "user",
            profile_type: "PERSONAL",
        },
    )
    .await?;

    seed_ads(&pool, user_id, real_estate, cars).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

struct SeedUser<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    password: &'a str,
    role: &'a str,
    profile_type: &'a str,
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    slug: &str,
    name_ar: &str,
    name_en: &str,
    icon: &str,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO categories (id, slug, name_ar, name_en, icon)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (slug) DO UPDATE SET name_ar = EXCLUDED.name_ar, name_en = EXCLUDED.name_en
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(name_ar)
    .bind(name_en)
    .bind(icon)
    .fetch_one(pool)
    .await?;

    println!("Ensured category {slug}");
    Ok(id)
}

async fn ensure_user(pool: &sqlx::PgPool, user: SeedUser<'_>) -> anyhow::Result<Uuid> {
    let password_hash =
        hash_password(user.password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, phone, password_hash, role, is_verified)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.name)
    .bind(user.email)
    .bind(user.phone)
    .bind(password_hash)
    .bind(user.role)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO profiles (id, user_id, profile_type)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(user.profile_type)
    .execute(pool)
    .await?;

    println!("Ensured user {} (role={})", user.email, user.role);
    Ok(user_id)
}

async fn seed_ads(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    real_estate: Uuid,
    cars: Uuid,
) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ads WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Sample ads already present, skipping");
        return Ok(());
    }

    let properties = [
        ("شقة للبيع في المزة", "Apartment", "SALE", 85_000_000.0, "دمشق - المزة", true, 3, 140),
        ("فيلا للإيجار في يعفور", "Villa", "RENT", 2_500_000.0, "ريف دمشق - يعفور", false, 5, 400),
        ("مكتب في الشعلان", "Office", "RENT", 900_000.0, "دمشق - الشعلان", false, 0, 80),
    ];
    for (title, kind, ad_type, price, location, featured, bedrooms, area) in properties {
        let ad_id = insert_ad(pool, user_id, real_estate, title, ad_type, price, location, featured).await?;
        sqlx::query(
            r#"
            INSERT INTO property_details (id, ad_id, property_type, area, bedrooms, furnished)
            VALUES ($1, $2, $3, $4, $5, 'UNFURNISHED')
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ad_id)
        .bind(kind.to_uppercase())
        .bind(area)
        .bind(bedrooms)
        .execute(pool)
        .await?;
    }

    let vehicles = [
        ("تويوتا كورولا 2018", "Toyota", "Corolla", 2018, 12_000_000.0, "SALE", true, "AUTOMATIC"),
        ("هيونداي توسان 2020", "Hyundai", "Tucson", 2020, 21_500_000.0, "SALE", false, "AUTOMATIC"),
        ("كيا ريو 2012", "Kia", "Rio", 2012, 5_800_000.0, "SALE", false, "MANUAL"),
    ];
    for (title, brand, model, year, price, ad_type, featured, transmission) in vehicles {
        let ad_id = insert_ad(pool, user_id, cars, title, ad_type, price, "حلب", featured).await?;
        sqlx::query(
            r#"
            INSERT INTO car_details (id, ad_id, brand, model, year, transmission)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ad_id)
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(transmission)
        .execute(pool)
        .await?;
    }

    println!("Seeded sample ads");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn insert_ad(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    category_id: Uuid,
    title: &str,
    ad_type: &str,
    price: f64,
    location: &str,
    featured: bool,
) -> anyhow::Result<Uuid> {
    let ad_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO ads (id, user_id, category_id, title, description, ad_type, condition,
                         price, location, contact_phone, is_featured)
        VALUES ($1, $2, $3, $4, $4, $5, 'GOOD', $6, $7, '+963900000002', $8)
        "#,
    )
    .bind(ad_id)
    .bind(user_id)
    .bind(category_id)
    .bind(title)
    .bind(ad_type)
    .bind(price)
    .bind(location)
    .bind(featured)
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO ad_media (id, ad_id, file_path, media_type, is_primary, sort_order)
        VALUES ($1, $2, '/api/placeholder?width=800&height=600', 'IMAGE', TRUE, 0)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ad_id)
    .execute(pool)
    .await?;

    Ok(ad_id)
}
