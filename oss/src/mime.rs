use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for an upload, guessed from the extension of the local file
/// first and the object name second.
pub fn content_type_for(object: &str, file: Option<&Path>) -> String {
    file.and_then(|file| mime_guess::from_path(file).first_raw())
        .or_else(|| mime_guess::from_path(object).first_raw())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_name_extension() {
        assert_eq!(content_type_for("notes.txt", None), "text/plain");
        assert_eq!(content_type_for("photos/cat.JPG", None), "image/jpeg");
    }

    #[test]
    fn file_name_wins() {
        assert_eq!(
            content_type_for("renamed.txt", Some(Path::new("/tmp/upload/cat.png"))),
            "image/png"
        );
        assert_eq!(
            content_type_for("cat.png", Some(Path::new("/tmp/upload/no-extension"))),
            "image/png"
        );
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(content_type_for("blob", None), DEFAULT_CONTENT_TYPE);
        assert_eq!(
            content_type_for("data.zzzunknown", Some(Path::new("also.qqqunknown"))),
            DEFAULT_CONTENT_TYPE
        );
    }
}
