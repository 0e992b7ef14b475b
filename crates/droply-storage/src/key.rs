//! Blob key derivation from content URLs and storage paths.

/// Derive the blob key from a content URL: drop the query string, then take
/// the last path segment. `None` when that segment is empty.
pub fn resolve_key(file_url: &str) -> Option<String> {
    let without_query = file_url.split('?').next().unwrap_or_default();
    without_query
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Last segment of a storage path, used when the URL yields no key.
pub fn key_from_path(storage_path: &str) -> Option<String> {
    storage_path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
