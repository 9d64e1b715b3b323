use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        ads::{AdList, CarInput, CategoryList, CreateAdRequest, MediaInput, NumberInput, PropertyInput, UpdateAdRequest},
        auth::{SigninRequest, SigninResponse, SignupRequest},
        favorites::{FavoriteState, ToggleFavoriteRequest},
        messages::{MessageList, SendMessageRequest},
        reviews::CreateReviewRequest,
        upload::UploadResponse,
    },
    entity::sea_orm_active_enums::{
        AdType, BodyType, DrivetrainType, FuelType, FurnishedType, HeatingType, ItemCondition,
        MediaType, ProfileType, PropertyType, TransmissionType,
    },
    models::{
        Ad, AdCounts, AdDetail, AdRef, CarDetails, Category, Media, Message, Participant,
        Profile, PropertyDetails, Review, Reviewer, Seller, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        ads, auth, categories, favorites, health, messages, params, placeholder, reviews, upload,
        user,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::signin,
        categories::list_categories,
        ads::list_ads,
        ads::create_ad,
        ads::get_ad,
        ads::update_ad,
        ads::delete_ad,
        ads::create_review,
        reviews::approve_review,
        favorites::list_favorites,
        favorites::toggle_favorite,
        user::list_user_ads,
        messages::list_messages,
        messages::send_message,
        messages::mark_read,
        upload::upload_file,
        upload::delete_file,
        placeholder::placeholder
    ),
    components(
        schemas(
            User,
            Profile,
            Seller,
            Category,
            Ad,
            AdCounts,
            AdDetail,
            Media,
            PropertyDetails,
            CarDetails,
            Review,
            Reviewer,
            Message,
            Participant,
            AdRef,
            AdType,
            ItemCondition,
            MediaType,
            ProfileType,
            PropertyType,
            FurnishedType,
            HeatingType,
            FuelType,
            TransmissionType,
            BodyType,
            DrivetrainType,
            NumberInput,
            MediaInput,
            PropertyInput,
            CarInput,
            CreateAdRequest,
            UpdateAdRequest,
            AdList,
            CategoryList,
            SignupRequest,
            SigninRequest,
            SigninResponse,
            ToggleFavoriteRequest,
            FavoriteState,
            SendMessageRequest,
            MessageList,
            CreateReviewRequest,
            UploadResponse,
            params::Pagination,
            params::AdQuery,
            params::AdSort,
            params::MessageQuery,
            params::PlaceholderQuery,
            health::HealthData,
            Meta,
            ApiResponse<AdDetail>,
            ApiResponse<AdList>,
            ApiResponse<User>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-up and sign-in"),
        (name = "Categories", description = "Ad categories"),
        (name = "Ads", description = "Listing, creation and management of ads"),
        (name = "Reviews", description = "Seller reviews"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "User", description = "The caller's own ads"),
        (name = "Messages", description = "Buyer/seller messaging"),
        (name = "Upload", description = "Media upload to local storage"),
        (name = "Placeholder", description = "Placeholder images"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
