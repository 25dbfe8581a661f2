//! Utility functions

/// Masks the local part of an email so it can be written to logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let keep = if local.chars().count() <= 2 { 1 } else { 2 };
            let prefix: String = local.chars().take(keep).collect();
            format!("{}***@{}", prefix, domain)
        }
        _ => "***".to_string(),
    }
}

/// Trims surrounding whitespace and maps an empty result to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("admin@acme.com"), "ad***@acme.com");
        assert_eq!(mask_email("a@acme.com"), "a***@acme.com");
        assert_eq!(mask_email("ünï@acme.com"), "ün***@acme.com");
    }

    #[test]
    fn test_mask_email_without_local_part() {
        assert_eq!(mask_email("@acme.com"), "***");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  acme.com ")), Some("acme.com".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
