pub mod ad_media;
pub mod ads;
pub mod audit_logs;
pub mod car_details;
pub mod categories;
pub mod favorites;
pub mod messages;
pub mod profiles;
pub mod property_details;
pub mod reviews;
pub mod sea_orm_active_enums;
pub mod users;

pub use ad_media::Entity as AdMedia;
pub use ads::Entity as Ads;
pub use audit_logs::Entity as AuditLogs;
pub use car_details::Entity as CarDetails;
pub use categories::Entity as Categories;
pub use favorites::Entity as Favorites;
pub use messages::Entity as Messages;
pub use profiles::Entity as Profiles;
pub use property_details::Entity as PropertyDetails;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
