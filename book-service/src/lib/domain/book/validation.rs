use super::errors::BookError;

pub fn is_valid_id(id: i64) -> bool {
    id > 0
}

pub fn is_valid_author(author: &str) -> bool {
    !author.is_empty()
}

pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty()
}

/// Author is checked before title.
pub fn validate_fields(author: &str, title: &str) -> Result<(), BookError> {
    if !is_valid_author(author) {
        return Err(BookError::InvalidAuthor);
    }
    if !is_valid_title(title) {
        return Err(BookError::InvalidTitle);
    }
    Ok(())
}
