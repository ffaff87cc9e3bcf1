/// Payload for submitting a review. `author_id` always comes from the
/// verified session token.
#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub product_id: String,
    pub author_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}
