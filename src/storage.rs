//! Storage reference resolution
//!
//! Image records carry an opaque storage reference: either a cloud-storage
//! locator like `s3://bucket/path/to/image.jpg` or a plain URL. This module
//! turns that reference into something a HTTP client can actually fetch.

/// Scheme prefix for cloud-storage locators
const S3_SCHEME: &str = "s3://";

/// Resolves opaque storage references into fetchable HTTPS URLs.
///
/// The storage domain (e.g. a region-qualified S3 host) comes from the
/// config file, not from the call site.
#[derive(Debug, Clone)]
pub struct StorageRefResolver {
    /// Public hostname the bucket is reachable under,
    /// e.g. "s3.us-east-1.amazonaws.com"
    domain: String,
}

impl StorageRefResolver {
    /// Create a resolver for the given storage domain
    pub fn new(domain: impl Into<String>) -> Self {
        StorageRefResolver {
            domain: domain.into(),
        }
    }

    /// Resolve a storage reference into a displayable URL.
    ///
    /// - Empty reference → empty string (the renderer shows the placeholder)
    /// - `s3://bucket/key` → `https://{bucket}.{domain}/{key}`
    /// - Anything else is assumed to already be a usable URL
    pub fn resolve(&self, storage_ref: &str) -> String {
        if storage_ref.is_empty() {
            return String::new();
        }

        if let Some(path) = storage_ref.strip_prefix(S3_SCHEME) {
            // First separator splits bucket from key; the key may itself
            // contain further slashes
            let (bucket, key) = path.split_once('/').unwrap_or((path, ""));
            return format!("https://{}.{}/{}", bucket, self.domain, key);
        }

        storage_ref.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StorageRefResolver {
        StorageRefResolver::new("s3.us-east-1.amazonaws.com")
    }

    #[test]
    fn test_empty_ref_resolves_to_empty_string() {
        assert_eq!(resolver().resolve(""), "");
    }

    #[test]
    fn test_s3_ref_composes_public_url() {
        let url = resolver().resolve("s3://my-bucket/photos/sunset.jpg");
        assert_eq!(
            url,
            "https://my-bucket.s3.us-east-1.amazonaws.com/photos/sunset.jpg"
        );
    }

    #[test]
    fn test_s3_ref_key_keeps_nested_path() {
        let url = resolver().resolve("s3://b/a/very/deep/key.png");
        assert_eq!(url, "https://b.s3.us-east-1.amazonaws.com/a/very/deep/key.png");
    }

    #[test]
    fn test_s3_ref_without_key() {
        // Degenerate locator: bucket only, no separator
        let url = resolver().resolve("s3://lonely-bucket");
        assert_eq!(url, "https://lonely-bucket.s3.us-east-1.amazonaws.com/");
    }

    #[test]
    fn test_direct_url_passes_through_unchanged() {
        let direct = "https://example.com/cat.jpg";
        assert_eq!(resolver().resolve(direct), direct);
    }

    #[test]
    fn test_domain_is_not_hardcoded() {
        let eu = StorageRefResolver::new("s3.eu-west-1.amazonaws.com");
        assert_eq!(
            eu.resolve("s3://b/k.jpg"),
            "https://b.s3.eu-west-1.amazonaws.com/k.jpg"
        );
    }

    #[test]
    fn test_non_empty_ref_never_resolves_empty() {
        for r in ["s3://b/k", "http://x/y", "relative/path.jpg"] {
            assert!(!resolver().resolve(r).is_empty());
        }
    }
}
