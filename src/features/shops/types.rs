//! Types for the shop directory and the barber's own shop.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    /// Minutes.
    pub duration: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOwner {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub barber: Option<ShopOwner>,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// Form payload for creating or updating a shop.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShopsResponse {
    #[serde(default)]
    pub shops: Vec<Shop>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShopEnvelope {
    #[serde(default)]
    pub shop: Option<Shop>,
}

#[cfg(test)]
mod tests {
    use super::{Shop, ShopPayload};

    #[test]
    fn shop_deserializes_with_sparse_fields() {
        let shop: Shop = serde_json::from_str(
            r#"{"id":"s1","name":"Fade Factory","address":"12 High St","city":"Leeds"}"#,
        )
        .unwrap();
        assert_eq!(shop.rating, 0.0);
        assert!(shop.services.is_empty());
        assert!(shop.barber.is_none());
    }

    #[test]
    fn payload_omits_unset_optionals_and_uses_camel_case() {
        let payload = ShopPayload {
            name: "Fade Factory".to_string(),
            address: "12 High St".to_string(),
            city: "Leeds".to_string(),
            zip_code: Some("LS1 4AP".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""zipCode":"LS1 4AP""#));
        assert!(!json.contains("latitude"));
        assert!(!json.contains("services"));
    }
}
