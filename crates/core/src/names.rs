//! Name normalization shared by roles and permissions.
//!
//! Names are compared and stored in a canonical form: leading and trailing
//! whitespace removed, lowercased. The unique index on `name` only holds
//! if every write goes through [`normalize_name`].

use crate::error::CoreError;

/// Trim and lowercase a role or permission name.
///
/// Rejects values that are empty or whitespace-only.
///
/// ```
/// use rbac_core::names::normalize_name;
///
/// assert_eq!(normalize_name("  Admin  ").unwrap(), "admin");
/// assert!(normalize_name("   ").is_err());
/// ```
pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    Ok(trimmed.to_lowercase())
}

/// Normalize an optional substring filter.
///
/// A filter that is blank after trimming matches everything, so it is
/// collapsed to `None`.
pub fn normalize_filter(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Escape `LIKE` metacharacters so a filter matches literally.
///
/// The result is meant to be wrapped in `%...%` with `ESCAPE '\'`.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
