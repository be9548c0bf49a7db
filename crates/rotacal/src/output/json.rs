//! JSON output formatting.

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotacal_core::calendar::ShiftKind;

    #[test]
    fn test_shift_serializes_as_label() {
        assert_eq!(format_json(&ShiftKind::Split), r#""split""#);
    }
}
