/// Derives the URL-safe booking slug for a business name.
///
/// The result is lower-cased, contains only `[a-z0-9-]`, and never has a
/// leading, trailing or doubled hyphen. Apostrophes and other punctuation are
/// dropped rather than turned into separators, so `"Maria's Hair Salon"`
/// becomes `"marias-hair-salon"`.
pub fn slugify(name: &str) -> String {
    let mut slug = normalize_input(name);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Lenient variant used while the user is typing in the slug field.
///
/// Same character rules as [`slugify`], but a single trailing hyphen is kept
/// so that `"my-"` can still become `"my-salon"` on the next keystroke.
pub fn normalize_input(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }

    if pending_hyphen && !slug.is_empty() {
        slug.push('-');
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn test_onboarding_example() {
        assert_eq!(slugify("Maria's Hair Salon"), "marias-hair-salon");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(slugify("  Barber -- Shop  "), "barber-shop");
        assert_eq!(slugify("Nails\t&\tSpa"), "nails-spa");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Zoë 24"), "caf-zo-24");
    }

    #[test]
    fn test_slug_properties_hold_for_awkward_names() {
        let names = [
            "",
            "-leading",
            "trailing-",
            "UPPER lower",
            "a--b",
            "  !!  ",
            "O'Brien & Sons, Ltd.",
            "123 Main St.",
            "ÄÖÜ salon",
        ];

        for name in names {
            let slug = slugify(name);
            assert!(is_well_formed(&slug), "bad slug {slug:?} for {name:?}");
            assert_eq!(slug, slugify(name), "slug must be deterministic");
        }
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("The Best  Salon");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_normalize_input_keeps_typing_hyphen() {
        assert_eq!(normalize_input("my-"), "my-");
        assert_eq!(normalize_input("My Salon "), "my-salon-");
        assert_eq!(normalize_input("-"), "");
    }
}
