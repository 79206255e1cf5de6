//! Public URLs
//!
//! Builds the externally visible URL of a stored file.

use std::path::{Component, Path};
use url::Url;

/// Append the route prefix and each segment of `relative` to `base`.
///
/// Segments are percent-encoded. Returns `None` for a base that cannot carry
/// a path (e.g. `mailto:`).
pub fn public_url(base: &Url, prefix: &str, relative: &Path) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push(prefix);
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                segments.push(&segment.to_string_lossy());
            }
        }
    }
    Some(url)
}
