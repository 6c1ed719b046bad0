//! Small shared helpers

/// Current UTC time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new row identifier (UUID v4)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check that a string parses as a UUID
pub fn is_uuid(value: &str) -> bool {
    uuid::Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_uuid() {
        assert!(is_uuid(&new_id()));
    }

    #[test]
    fn test_is_uuid_rejects_garbage() {
        assert!(!is_uuid("not-a-uuid"));
        assert!(!is_uuid(""));
    }
}
