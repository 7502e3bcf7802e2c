use super::ApiError;

/// Parses a movie id path segment. Anything that isn't a positive integer
/// is treated as a missing page rather than a bad request.
pub fn parse_movie_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::not_found("Movie", raw)),
    }
}
