//! Validation utilities for invocation descriptor fields

/// Validate that a descriptor field is neither empty nor whitespace-only.
pub fn require_non_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("value cannot be empty or whitespace-only".to_string())
    } else {
        Ok(())
    }
}
