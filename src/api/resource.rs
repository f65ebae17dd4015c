//
//  trello-api
//  api/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Path templates shared by resource wrappers.
//!
//! A resource is bound to a relative path such as `cards/#id#/labels`; the
//! `#id#` placeholder is replaced with the entity id, encoded as a single
//! path segment.

use super::encoding::encode_path_segment;
use super::ApiError;

/// Placeholder replaced by the entity id.
pub const ID_PLACEHOLDER: &str = "#id#";

/// Encodes an id as one path segment.
///
/// Empty ids and the dot segments `.` and `..` are rejected: URL resolution
/// would collapse them and the request would reach another resource.
///
/// # Example
///
/// ```rust
/// use trello_api::api::resource::path_segment;
///
/// assert_eq!(path_segment("label one")?, "label%20one");
/// assert!(path_segment("..").is_err());
/// # Ok::<(), trello_api::api::ApiError>(())
/// ```
pub fn path_segment(id: &str) -> Result<String, ApiError> {
    match id {
        "" => Err(ApiError::Validation("An id is required.".to_string())),
        "." | ".." => Err(ApiError::Validation(format!("Invalid id \"{}\".", id))),
        _ => Ok(encode_path_segment(id)),
    }
}

/// Fills the `#id#` placeholder of a path template.
///
/// # Example
///
/// ```rust
/// use trello_api::api::resource::expand_path;
///
/// assert_eq!(expand_path("cards/#id#/labels", "5f1a")?, "cards/5f1a/labels");
/// assert_eq!(expand_path("boards/#id#", "a/b")?, "boards/a%2Fb");
/// assert!(expand_path("boards/#id#", "").is_err());
/// # Ok::<(), trello_api::api::ApiError>(())
/// ```
pub fn expand_path(template: &str, id: &str) -> Result<String, ApiError> {
    Ok(template.replace(ID_PLACEHOLDER, &path_segment(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_segments_are_rejected() {
        for id in ["", ".", ".."] {
            assert!(matches!(
                expand_path("cards/#id#/labels", id),
                Err(ApiError::Validation(_))
            ));
        }
        assert_eq!(path_segment("...").unwrap(), "...");
        assert_eq!(path_segment(".a").unwrap(), ".a");
    }
}
