// src/utils/url.rs

//! URL manipulation utilities.

/// Resolve a potentially relative link against the page it was found on.
///
/// Unresolvable input is returned as-is; the caller decides whether a
/// broken link is worth keeping.
pub fn resolve(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match url::Url::parse(base).and_then(|b| b.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Extract the last path segment of a URL, for use as an upload filename.
pub fn file_name(url_str: &str) -> Option<String> {
    let parsed = url::Url::parse(url_str).ok()?;
    let last = parsed.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    Some(last.to_string())
}

/// Extract the lowercase file extension from a URL path, ignoring any query.
pub fn extension(url_str: &str) -> Option<String> {
    let path = match url::Url::parse(url_str) {
        Ok(parsed) => parsed.path().to_string(),
        // Tolerate bare paths that are not absolute URLs
        Err(_) => url_str.split(['?', '#']).next().unwrap_or("").to_string(),
    };
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve("https://example.com/path/", "https://other.com/page"),
            "https://other.com/page"
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(
            resolve("https://example.com/ir/reports", "/files/q3.pdf"),
            "https://example.com/files/q3.pdf"
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve("https://example.com/ir/", "q3.pdf"),
            "https://example.com/ir/q3.pdf"
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name("https://example.com/files/q3.pdf"),
            Some("q3.pdf".to_string())
        );
        assert_eq!(
            file_name("https://example.com/files/q3.pdf?dl=1"),
            Some("q3.pdf".to_string())
        );
        assert_eq!(file_name("https://example.com/"), None);
    }

    #[test]
    fn test_extension() {
        assert_eq!(
            extension("https://example.com/q3.PDF"),
            Some("pdf".to_string())
        );
        assert_eq!(
            extension("https://example.com/q3.pdf?download=true"),
            Some("pdf".to_string())
        );
        assert_eq!(extension("https://example.com/reports"), None);
        assert_eq!(extension("https://example.com/"), None);
    }
}
