//! Conversions between naming conventions.
//!
//! Placeholders in component trees may be spelled in camelCase, kebab-case or
//! with a hyphenated numeric suffix (`breadcrumb-1`). These helpers convert
//! between the spellings. They are ASCII-only: anything they do not recognise
//! passes through unchanged.

/// Convert kebab-case to camelCase.
///
/// `-x` (lowercase letter) becomes `X`, then `-d` (digit) becomes `d`.
/// The two passes run one after the other, so `breadcrumb-1` becomes
/// `breadcrumb1` and `nav-item-2-color` becomes `navItem2Color`.
pub fn kebab_to_camel(s: &str) -> String {
    let letters = collapse_hyphens(s, |next| next.is_ascii_lowercase(), |c| c.to_ascii_uppercase());
    collapse_hyphens(&letters, |next| next.is_ascii_digit(), |c| c)
}

/// Convert camelCase to kebab-case.
///
/// Inserts `-` before every ASCII uppercase letter and lowercases the result.
/// Not the inverse of [`kebab_to_camel`] for inputs with leading uppercase
/// letters or acronyms (`URLPath` becomes `-u-r-l-path`).
pub fn camel_to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Split a `<letters><digits>` name into its two parts.
///
/// Returns `None` unless the whole string is one or more ASCII letters
/// followed by one or more ASCII digits.
pub fn split_numbered(s: &str) -> Option<(&str, &str)> {
    let split = s.find(|c: char| !c.is_ascii_alphabetic())?;
    let (base, digits) = s.split_at(split);
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, digits))
}

/// Hyphenated form of a numbered name: `breadcrumb1` -> `breadcrumb-1`.
pub fn numbered_to_kebab(s: &str) -> Option<String> {
    split_numbered(s).map(|(base, digits)| format!("{}-{}", base, digits))
}

/// Convert a definition file stem into a PascalCase component name.
///
/// The first character and every letter following `-` or `_` are uppercased
/// and the separators are dropped: `hero-section` -> `HeroSection`,
/// `navigation_bar` -> `NavigationBar`. A separator in front of a digit is
/// dropped too, so the result stays a valid identifier.
pub fn component_name_from_file_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut upper_next = true;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

fn collapse_hyphens(
    s: &str,
    matches: impl Fn(char) -> bool,
    map: impl Fn(char) -> char,
) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if matches(next) {
                    chars.next();
                    out.push(map(next));
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_kebab_to_camel() {
        assert_eq!(kebab_to_camel("button-bg-color"), "buttonBgColor");
        assert_eq!(kebab_to_camel("breadcrumb-1"), "breadcrumb1");
        assert_eq!(kebab_to_camel("nav-item-2-color"), "navItem2Color");
        assert_eq!(kebab_to_camel("alreadyCamel"), "alreadyCamel");
    }

    #[test]
    fn test_kebab_to_camel_passes_through_malformed_input() {
        assert_eq!(kebab_to_camel("trailing-"), "trailing-");
        assert_eq!(kebab_to_camel("upper-Case"), "upper-Case");
        assert_eq!(kebab_to_camel("a--b"), "a-B");
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("buttonBgColor"), "button-bg-color");
        assert_eq!(camel_to_kebab("breadcrumb1"), "breadcrumb1");
        assert_eq!(camel_to_kebab("zIndex"), "z-index");
    }

    #[test]
    fn test_uppercase_input_does_not_round_trip() {
        assert_eq!(camel_to_kebab("URLPath"), "-u-r-l-path");
        assert_ne!(camel_to_kebab(&kebab_to_camel("URLPath")), "URLPath");
        assert_ne!(camel_to_kebab(&kebab_to_camel("Upper")), "Upper");
    }

    #[test]
    fn test_split_numbered() {
        assert_eq!(split_numbered("breadcrumb1"), Some(("breadcrumb", "1")));
        assert_eq!(split_numbered("navItem12"), Some(("navItem", "12")));
        assert_eq!(split_numbered("navItem1Color"), None);
        assert_eq!(split_numbered("plain"), None);
        assert_eq!(split_numbered("42"), None);
        assert_eq!(numbered_to_kebab("breadcrumb3").as_deref(), Some("breadcrumb-3"));
    }

    #[test]
    fn test_component_name_from_file_stem() {
        assert_eq!(component_name_from_file_stem("button"), "Button");
        assert_eq!(component_name_from_file_stem("hero-section"), "HeroSection");
        assert_eq!(component_name_from_file_stem("navigation_bar"), "NavigationBar");
        assert_eq!(component_name_from_file_stem("HeroSection"), "HeroSection");
        assert_eq!(component_name_from_file_stem("step-2"), "Step2");
    }

    proptest! {
        #[test]
        fn prop_kebab_round_trips(s in "[a-z][a-z0-9]{0,6}(-[a-z][a-z0-9]{0,6}){0,4}") {
            prop_assert_eq!(camel_to_kebab(&kebab_to_camel(&s)), s);
        }

        #[test]
        fn prop_kebab_to_camel_is_idempotent(s in "[a-z][a-zA-Z0-9]{0,12}") {
            let once = kebab_to_camel(&s);
            prop_assert_eq!(kebab_to_camel(&once), once.clone());
        }
    }
}
