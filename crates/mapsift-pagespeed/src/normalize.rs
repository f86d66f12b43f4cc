//! Target URL normalization and retry-variant generation.
//!
//! [`clean_url`] always prefers the `www.`-prefixed https form as canonical,
//! while [`url_variants`] separately tries the www-toggled form. The two
//! overlap on purpose — both behaviors are kept as observed in production
//! traffic rather than collapsed into one.

use reqwest::Url;

/// Normalizes a target URL: trims, strips trailing slashes, upgrades
/// `http://` to `https://`, and prefixes the host with `www.` when missing.
///
/// Root-path URLs are rendered without a trailing slash:
/// `clean_url("http://example.com/")` is `"https://www.example.com"`.
///
/// Input that does not parse as a URL is returned trimmed and slash-stripped
/// but otherwise verbatim — normalization never fails.
#[must_use]
pub fn clean_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }

    let https = match trimmed.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => trimmed.to_owned(),
    };

    let Ok(mut parsed) = Url::parse(&https) else {
        return trimmed.to_owned();
    };

    if let Some(host) = parsed.host_str() {
        if !host.starts_with("www.") {
            let prefixed = format!("www.{host}");
            if parsed.set_host(Some(&prefixed)).is_err() {
                return trimmed.to_owned();
            }
        }
    }

    let rendered = parsed.to_string();
    if parsed.path() == "/" && parsed.query().is_none() && parsed.fragment().is_none() {
        // Url always renders a root path as "…/"; drop it to keep the
        // canonical form slash-free.
        rendered.trim_end_matches('/').to_owned()
    } else {
        rendered
    }
}

/// Builds the retry variants for a target URL, in the order they are tried:
/// the original, a www-toggled form, and a trailing-slash form.
///
/// Input that does not parse as a URL gets a single variant — itself.
#[must_use]
pub fn url_variants(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return vec![url.to_owned()];
    };

    let toggled = if parsed.host_str().is_some_and(|host| host.starts_with("www.")) {
        url.replacen("www.", "", 1)
    } else {
        url.replacen("//", "//www.", 1)
    };

    vec![url.to_owned(), toggled, format!("{url}/")]
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // clean_url
    // -----------------------------------------------------------------------

    #[test]
    fn upgrades_scheme_adds_www_and_strips_slash() {
        assert_eq!(clean_url("http://example.com/"), "https://www.example.com");
    }

    #[test]
    fn keeps_existing_www() {
        assert_eq!(
            clean_url("https://www.example.com"),
            "https://www.example.com"
        );
    }

    #[test]
    fn strips_repeated_trailing_slashes() {
        assert_eq!(
            clean_url("https://www.example.com///"),
            "https://www.example.com"
        );
    }

    #[test]
    fn preserves_non_root_path() {
        assert_eq!(
            clean_url("http://example.com/about/"),
            "https://www.example.com/about"
        );
    }

    #[test]
    fn unparseable_input_is_returned_trimmed() {
        assert_eq!(clean_url("not a url"), "not a url");
        // Trailing slashes go, but interior text is untouched.
        assert_eq!(clean_url(" not a url// "), "not a url");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_url(""), "");
        assert_eq!(clean_url("   "), "");
    }

    // -----------------------------------------------------------------------
    // url_variants
    // -----------------------------------------------------------------------

    #[test]
    fn www_host_variants_toggle_www_off() {
        assert_eq!(
            url_variants("https://www.example.com"),
            vec![
                "https://www.example.com".to_owned(),
                "https://example.com".to_owned(),
                "https://www.example.com/".to_owned(),
            ]
        );
    }

    #[test]
    fn bare_host_variants_toggle_www_on() {
        assert_eq!(
            url_variants("https://example.com"),
            vec![
                "https://example.com".to_owned(),
                "https://www.example.com".to_owned(),
                "https://example.com/".to_owned(),
            ]
        );
    }

    #[test]
    fn unparseable_input_has_a_single_variant() {
        assert_eq!(url_variants("not a url"), vec!["not a url".to_owned()]);
    }
}
