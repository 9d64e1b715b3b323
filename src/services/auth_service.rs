use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, SigninRequest, SigninResponse, SignupRequest},
    entity::{
        profiles::{self, Entity as Profiles},
        sea_orm_active_enums::{ProfileType, parse_enum},
        users::{self, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::ROLE_USER,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 6;
const IDENTITY_TAKEN: &str = "Email or phone is already taken";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSignup {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub profile_type: ProfileType,
    pub company_name: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn validate_signup(payload: SignupRequest) -> AppResult<ValidatedSignup> {
    let (Some(name), Some(email), Some(password), Some(profile_type)) = (
        trimmed(payload.name),
        trimmed(payload.email),
        payload.password.filter(|p| !p.is_empty()),
        trimmed(payload.profile_type),
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if !email.contains('@') {
        return Err(AppError::bad_request("Invalid email"));
    }

    // ADMIN profiles are only created by the seed binary
    let profile_type = match parse_enum::<ProfileType>(&profile_type) {
        Some(kind @ (ProfileType::Personal | ProfileType::Company)) => kind,
        _ => return Err(AppError::bad_request("Invalid profile type")),
    };

    let company_name = match profile_type {
        ProfileType::Company => trimmed(payload.company_name),
        _ => None,
    };

    Ok(ValidatedSignup {
        name,
        email: email.to_lowercase(),
        phone: trimmed(payload.phone),
        password,
        profile_type,
        company_name,
    })
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: Uuid, role: &str, secret: &str, ttl_hours: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<User>> {
    let signup = validate_signup(payload)?;

    let mut taken = Condition::any().add(users::Column::Email.eq(signup.email.as_str()));
    if let Some(phone) = &signup.phone {
        taken = taken.add(users::Column::Phone.eq(phone.as_str()));
    }
    if Users::find().filter(taken).one(&state.orm).await?.is_some() {
        return Err(AppError::bad_request(IDENTITY_TAKEN));
    }

    let password_hash = hash_password(&signup.password)?;

    let txn = state.orm.begin().await?;

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(signup.name),
        email: Set(signup.email),
        phone: Set(signup.phone),
        password_hash: Set(password_hash),
        avatar: Set(None),
        role: Set(ROLE_USER.to_string()),
        is_verified: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::unique_violation(e, IDENTITY_TAKEN))?;

    let profile = profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        profile_type: Set(signup.profile_type),
        company_name: Set(signup.company_name),
        description: Set(None),
        location: Set(None),
        website: Set(None),
        rating: Set(0.0),
        total_reviews: Set(0),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = %user.id, "user signed up");
    audit::record(
        &state.pool,
        Some(user.id),
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        User::from_entity(user, Some(profile)),
        Some(Meta::empty()),
    ))
}

pub async fn signin(
    state: &AppState,
    payload: SigninRequest,
) -> AppResult<ApiResponse<SigninResponse>> {
    let SigninRequest { email, password } = payload;
    let user = Users::find()
        .filter(users::Column::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(
        user.id,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_ttl_hours,
    )?;

    let profile = user.find_related(Profiles).one(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_signin",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = SigninResponse {
        token: format!("Bearer {}", token),
        user: User::from_entity(user, profile),
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    fn request() -> SignupRequest {
        SignupRequest {
            name: Some(" Rami ".into()),
            email: Some("Rami@Example.com".into()),
            phone: Some("".into()),
            password: Some("secret1".into()),
            profile_type: Some("personal".into()),
            company_name: Some("Ignored LLC".into()),
        }
    }

    #[test]
    fn signup_is_normalized() {
        let valid = validate_signup(request()).unwrap();
        assert_eq!(valid.name, "Rami");
        assert_eq!(valid.email, "rami@example.com");
        assert_eq!(valid.phone, None);
        assert_eq!(valid.profile_type, ProfileType::Personal);
        assert_eq!(valid.company_name, None);
    }

    #[test]
    fn company_keeps_company_name() {
        let mut req = request();
        req.profile_type = Some("COMPANY".into());
        let valid = validate_signup(req).unwrap();
        assert_eq!(valid.company_name.as_deref(), Some("Ignored LLC"));
    }

    #[test]
    fn signup_rejects_short_password_and_admin_profile() {
        let mut req = request();
        req.password = Some("12345".into());
        assert!(validate_signup(req).is_err());

        let mut req = request();
        req.profile_type = Some("ADMIN".into());
        assert!(validate_signup(req).is_err());

        let mut req = request();
        req.name = None;
        assert!(matches!(
            validate_signup(req),
            Err(AppError::BadRequest(ref m)) if m == "Missing required fields"
        ));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
    }

    #[test]
    fn issued_token_decodes_to_same_user() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "admin", "test-secret", 1).unwrap();
        let user = decode_token(&token, "test-secret").unwrap();
        assert_eq!(user.user_id, id);
        assert!(user.is_admin());
        assert!(decode_token(&token, "other-secret").is_err());
    }
}
