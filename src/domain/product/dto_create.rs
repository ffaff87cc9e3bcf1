/// Payload for publishing a product. `owner_id` always comes from the
/// verified session token, never from the request body.
#[derive(Debug, Clone)]
pub struct CreateProductDto {
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_ref: Option<String>,
}
