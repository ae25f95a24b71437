use super::ApiError;

pub fn validate_id(id: i32, resource: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            resource, id
        )));
    }
    Ok(id)
}

pub fn validate_link_ids(ids: &[i32]) -> Result<(), ApiError> {
    const MAX_LINKS: usize = 500;

    if ids.len() > MAX_LINKS {
        return Err(ApiError::validation(format!(
            "At most {} ids can be linked at once",
            MAX_LINKS
        )));
    }

    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(ApiError::validation(format!(
            "Invalid id: {}. IDs must be positive integers",
            bad
        )));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<&str, ApiError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Slug cannot be empty"));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::validation(
            "Slug can only contain letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(trimmed)
}

/// Trimmed filter text; blank input means no filter.
#[must_use]
pub fn filter_term(query: Option<String>) -> Option<String> {
    query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1, "episode").is_ok());
        assert!(validate_id(12345, "season").is_ok());
        assert!(validate_id(0, "episode").is_err());
        assert!(validate_id(-1, "season").is_err());
    }

    #[test]
    fn test_validate_link_ids() {
        assert!(validate_link_ids(&[]).is_ok());
        assert!(validate_link_ids(&[1, 2, 3]).is_ok());
        assert!(validate_link_ids(&[1, 0]).is_err());
        assert!(validate_link_ids(&vec![1; 501]).is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert_eq!(validate_slug(" crash-landing-on-you ").unwrap(), "crash-landing-on-you");
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("slash/slug").is_err());
    }

    #[test]
    fn test_filter_term() {
        assert_eq!(filter_term(Some("  love ".to_string())), Some("love".to_string()));
        assert_eq!(filter_term(Some("   ".to_string())), None);
        assert_eq!(filter_term(None), None);
    }
}
