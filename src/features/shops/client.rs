//! Client wrappers for the shop endpoints: the public directory plus the
//! signed-in barber's own shop.

use crate::app_lib::{ApiClient, AppError};
use crate::features::shops::types::{Service, Shop, ShopEnvelope, ShopPayload, ShopsResponse};

/// Public directory listing, filtered by free-text search and/or city.
pub async fn list_shops(api: &ApiClient, search: &str, city: &str) -> Result<Vec<Shop>, AppError> {
    let response: ShopsResponse = api.get(&browse_path(search, city)).await?;
    Ok(response.shops)
}

/// The signed-in barber's shop; `None` until one has been created.
pub async fn my_shop(api: &ApiClient) -> Result<Option<Shop>, AppError> {
    let envelope: Option<ShopEnvelope> = api.get_optional("/barber/shop").await?;
    Ok(envelope.and_then(|envelope| envelope.shop))
}

pub async fn create_shop(api: &ApiClient, payload: &ShopPayload) -> Result<(), AppError> {
    api.post_empty("/shops", payload).await
}

pub async fn update_shop(api: &ApiClient, id: &str, payload: &ShopPayload) -> Result<(), AppError> {
    api.put_empty(&format!("/shops/{id}"), payload).await
}

pub async fn add_service(api: &ApiClient, shop_id: &str, service: &Service) -> Result<(), AppError> {
    api.post_empty(&format!("/shops/{shop_id}/services"), service).await
}

fn browse_path(search: &str, city: &str) -> String {
    let mut query = Vec::new();
    if !city.trim().is_empty() {
        query.push(format!("city={}", urlencoding::encode(city.trim())));
    }
    if !search.trim().is_empty() {
        query.push(format!("search={}", urlencoding::encode(search.trim())));
    }

    if query.is_empty() {
        "/shops".to_string()
    } else {
        format!("/shops?{}", query.join("&"))
    }
}
