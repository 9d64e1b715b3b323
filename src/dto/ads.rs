use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Ad, Category};

/// A number that clients may send either as JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Integer view; fractional parts are truncated.
    pub fn as_i32(&self) -> Option<i32> {
        let value = self.as_f64()?.trunc();
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return None;
        }
        Some(value as i32)
    }
}

/// Reference to a file already stored through the upload endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MediaInput {
    pub url: String,
    /// MIME type reported by the upload; `video/*` marks a video.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub name: Option<String>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PropertyInput {
    #[serde(alias = "propertyType")]
    pub property_type: Option<String>,
    pub area: Option<NumberInput>,
    pub bedrooms: Option<NumberInput>,
    pub bathrooms: Option<NumberInput>,
    pub floor: Option<NumberInput>,
    #[serde(alias = "totalFloors")]
    pub total_floors: Option<NumberInput>,
    #[serde(alias = "buildYear")]
    pub build_year: Option<NumberInput>,
    #[serde(alias = "hasGarage")]
    pub has_garage: Option<bool>,
    #[serde(alias = "hasGarden")]
    pub has_garden: Option<bool>,
    #[serde(alias = "hasElevator")]
    pub has_elevator: Option<bool>,
    #[serde(alias = "hasSecurity")]
    pub has_security: Option<bool>,
    #[serde(alias = "hasPool")]
    pub has_pool: Option<bool>,
    #[serde(alias = "hasBalcony")]
    pub has_balcony: Option<bool>,
    pub furnished: Option<bool>,
    #[serde(alias = "heatingType")]
    pub heating_type: Option<String>,
    /// Older clients only say whether there is heating; maps to CENTRAL.
    pub heating: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CarInput {
    #[serde(alias = "make")]
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<NumberInput>,
    pub mileage: Option<NumberInput>,
    #[serde(alias = "fuelType")]
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    #[serde(alias = "engineSize")]
    pub engine_size: Option<NumberInput>,
    #[serde(alias = "horsePower")]
    pub horse_power: Option<NumberInput>,
    pub color: Option<String>,
    #[serde(alias = "bodyType")]
    pub body_type: Option<String>,
    pub drivetrain: Option<String>,
    #[serde(alias = "hasAirConditioning")]
    pub has_air_conditioning: Option<bool>,
    #[serde(alias = "hasLeatherSeats")]
    pub has_leather_seats: Option<bool>,
    #[serde(alias = "hasSunroof")]
    pub has_sunroof: Option<bool>,
    #[serde(alias = "hasNavigationSystem")]
    pub has_navigation_system: Option<bool>,
    #[serde(alias = "hasBluetoothConnectivity")]
    pub has_bluetooth_connectivity: Option<bool>,
    #[serde(alias = "hasParkingSensors")]
    pub has_parking_sensors: Option<bool>,
    #[serde(alias = "hasBackupCamera")]
    pub has_backup_camera: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Category slug or id.
    pub category: Option<String>,
    #[serde(alias = "adType")]
    pub ad_type: Option<String>,
    pub condition: Option<String>,
    pub price: Option<NumberInput>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaInput>,
    #[serde(alias = "propertyData")]
    pub property_data: Option<PropertyInput>,
    #[serde(alias = "carData")]
    pub car_data: Option<CarInput>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ad_type: Option<String>,
    pub condition: Option<String>,
    pub price: Option<NumberInput>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
    /// Admins only.
    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdList {
    pub items: Vec<Ad>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_from_json_numbers_and_text() {
        let n: NumberInput = serde_json::from_str("250000").unwrap();
        assert_eq!(n.as_f64(), Some(250000.0));

        let t: NumberInput = serde_json::from_str("\" 1500.5 \"").unwrap();
        assert_eq!(t.as_f64(), Some(1500.5));
        assert_eq!(t.as_i32(), Some(1500));

        let bad: NumberInput = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(bad.as_f64(), None);
        assert_eq!(bad.as_i32(), None);
    }

    #[test]
    fn out_of_range_integers_are_dropped() {
        let big = NumberInput::Number(1e12);
        assert_eq!(big.as_i32(), None);
    }

    #[test]
    fn create_request_accepts_camel_case_sections_and_make_alias() {
        let body = serde_json::json!({
            "title": "Toyota Corolla 2018",
            "adType": "SALE",
            "price": "12000000",
            "carData": {
                "make": "Toyota",
                "year": "2018",
                "fuelType": "HYBRID",
                "hasBackupCamera": true
            },
            "propertyData": { "totalFloors": 9, "hasBalcony": true, "heating": true },
            "media": [{ "url": "/uploads/a.jpg", "type": "image/jpeg" }]
        });
        let req: CreateAdRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.ad_type.as_deref(), Some("SALE"));
        let car = req.car_data.unwrap();
        assert_eq!(car.brand.as_deref(), Some("Toyota"));
        assert_eq!(car.year.and_then(|y| y.as_i32()), Some(2018));
        assert_eq!(car.fuel_type.as_deref(), Some("HYBRID"));
        assert_eq!(car.has_backup_camera, Some(true));
        let property = req.property_data.unwrap();
        assert_eq!(property.total_floors.and_then(|f| f.as_i32()), Some(9));
        assert_eq!(property.has_balcony, Some(true));
        assert_eq!(property.heating, Some(true));
        assert_eq!(req.media[0].content_type.as_deref(), Some("image/jpeg"));
        assert!(req.features.is_empty());
    }
}
