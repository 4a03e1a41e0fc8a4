//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use bingogen::BingoError;
    use bingogen::io::error::{ErrorContext, WithContext, invalid_config, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining for wrapped errors
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = BingoError::ConfigRead {
            path: "content.yaml".into(),
            source: io_error,
        };
        assert!(error.source().is_some());
        assert!(BingoError::NoGenerators.source().is_none());
    }

    // Tests board shape messages name the size and tile count
    // Verified by swapping width and height in the message
    #[test]
    fn test_board_shape_error() {
        let error = BingoError::BoardShape {
            expected: (5, 3),
            actual: 14,
        };
        let message = error.to_string();
        assert!(message.contains("5x3"));
        assert!(message.contains("15 tiles"));
        assert!(message.contains("got 14"));
    }

    // Tests helper constructors keep every field
    // Verified by omitting value from message
    #[test]
    fn test_error_helpers() {
        let error = invalid_parameter("width", &0, &"must be positive");
        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));

        let error = invalid_config(&"category 'A' is declared twice");
        assert!(error.to_string().contains("declared twice"));
        assert!(
            BingoError::UnknownCategory {
                name: "Ghost".to_string()
            }
            .to_string()
            .contains("Ghost")
        );
    }

    // Tests context replaces the placeholder path and operation
    // Verified by ignoring the operation in the context
    #[test]
    fn test_with_context() {
        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("denied"));
        let result = failed.with_context(ErrorContext {
            path: Some(PathBuf::from("board.json")),
            operation: Some("read board"),
        });

        match result {
            Err(BingoError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, PathBuf::from("board.json"));
                assert_eq!(operation, "read board");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    // Tests conversions from YAML and JSON errors
    // Verified by mapping YAML errors to the file system variant
    #[test]
    fn test_error_conversions() {
        let yaml: Result<serde_yaml::Value, _> = serde_yaml::from_str("a: [unclosed");
        let error = yaml.with_path("content.yaml");
        match error {
            Err(BingoError::ConfigParse { path, .. }) => {
                assert_eq!(path, PathBuf::from("content.yaml"));
            }
            other => panic!("unexpected result {other:?}"),
        }

        let json: Result<serde_json::Value, serde_json::Error> = serde_json::from_str("{");
        let error: Option<BingoError> = json.err().map(Into::into);
        assert!(matches!(error, Some(BingoError::BoardFormat { .. })));
    }
}
