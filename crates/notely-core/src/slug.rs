//! Tenant slug derivation.
//!
//! Slugs are lowercase ASCII letters, digits and single hyphens, never starting
//! or ending with a hyphen. Anything else collapses into a separator.

/// Turn a free-form tenant name into a slug. Returns an empty string when the
/// input has no usable characters.
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_hyphen = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen && !result.is_empty() {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.trim_end_matches('-').to_string()
}

/// Slug from the first label of an email's domain: `jo@acme.example.com` -> `acme`.
pub fn slug_from_email(email: &str) -> Option<String> {
    let (_, domain) = email.rsplit_once('@')?;
    let label = domain.split('.').next()?;
    let slug = slugify(label);
    (!slug.is_empty()).then_some(slug)
}

/// Display name for a tenant created from an email domain: `acme` -> `Acme`.
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Globex  Industries  "), "globex-industries");
    }

    #[test]
    fn test_slugify_collapses_symbols() {
        assert_eq!(slugify("R&D -- Labs!"), "r-d-labs");
        assert_eq!(slugify("__init__"), "init");
        assert_eq!(slugify("Team 42"), "team-42");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_from_email() {
        assert_eq!(slug_from_email("admin@acme.test"), Some("acme".to_string()));
        assert_eq!(
            slug_from_email("jo@Globex.co.uk"),
            Some("globex".to_string())
        );
        assert_eq!(slug_from_email("no-at-sign"), None);
        assert_eq!(slug_from_email("x@.com"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("acme"), "Acme");
        assert_eq!(title_case("acme-corp"), "Acme Corp");
    }
}
