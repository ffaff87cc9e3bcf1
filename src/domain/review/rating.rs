//! Rating aggregation
//!
//! The aggregate is derived on every read and never persisted. Both the
//! catalog listing and the product detail page go through this one function
//! so the two views cannot drift apart.

/// Arithmetic mean of the given ratings, `None` for an empty slice.
pub fn aggregate_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_known_ratings() {
        assert_eq!(aggregate_rating(&[5, 3, 4]), Some(4.0));
    }

    #[test]
    fn single_rating_is_its_own_mean() {
        assert_eq!(aggregate_rating(&[2]), Some(2.0));
    }

    #[test]
    fn empty_list_has_no_aggregate() {
        assert_eq!(aggregate_rating(&[]), None);
    }

    #[test]
    fn non_integer_mean() {
        assert_eq!(aggregate_rating(&[4, 5]), Some(4.5));
    }
}
