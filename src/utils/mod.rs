//! Project-specific utilities live here.

use serde_json::{json, Value};

/// Image shown for books without a cover
pub const NO_IMAGE: &str = "no-image.jpg";

const BOOK_IMAGE_DIR: &str = "/images/books";

/// Cover file name, falling back to the placeholder when absent or blank.
pub fn image_or_placeholder(image: Option<&str>) -> String {
    match image {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => NO_IMAGE.to_string(),
    }
}

/// Public path of a book cover under the static image directory.
pub fn book_image_path(image: Option<&str>) -> String {
    format!("{}/{}", BOOK_IMAGE_DIR, image_or_placeholder(image))
}

/// OpenAPI fragment for a JSON response described by `schema`.
pub fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

/// OpenAPI fragment for the shared error envelope.
pub fn error_response(description: &str) -> Value {
    json_response(
        description,
        json!({ "$ref": "#/components/schemas/ErrorResponse" }),
    )
}

pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_images_use_the_placeholder() {
        assert_eq!(image_or_placeholder(None), "no-image.jpg");
        assert_eq!(image_or_placeholder(Some("")), "no-image.jpg");
        assert_eq!(image_or_placeholder(Some("dune.jpg")), "dune.jpg");
    }

    #[test]
    fn image_paths_live_under_books_dir() {
        assert_eq!(book_image_path(Some("dune.jpg")), "/images/books/dune.jpg");
        assert_eq!(book_image_path(None), "/images/books/no-image.jpg");
    }

    #[test]
    fn error_response_points_at_envelope_schema() {
        let fragment = error_response("Not found");
        assert_eq!(
            fragment["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorResponse"
        );
    }
}
