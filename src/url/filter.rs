use crate::url::site::same_site;
use url::Url;

/// Path substrings that mark non-content pages
const EXCLUDED_PATH_PATTERNS: [&str; 4] = ["/api/", "/download", "/login", "/signup"];

/// File extensions that never hold crawlable documentation
const EXCLUDED_EXTENSIONS: [&str; 8] = [
    ".pdf", ".zip", ".exe", ".dmg", ".jpg", ".png", ".gif", ".svg",
];

/// Decides whether a discovered link may be followed from the given seed
///
/// A candidate is admissible when all of the following hold:
/// - the scheme is `http` or `https`
/// - it is on the same site as the seed (see [`same_site`])
/// - it carries no fragment
/// - its path matches no exclusion pattern and ends in no excluded
///   extension (case-insensitive)
///
/// Relative links must already be resolved to absolute URLs; candidates
/// that failed to parse never reach this function and are dropped at the
/// resolution step.
pub fn is_admissible(candidate: &Url, seed: &Url) -> bool {
    if candidate.scheme() != "http" && candidate.scheme() != "https" {
        return false;
    }

    if !same_site(candidate, seed) {
        return false;
    }

    if candidate.fragment().is_some() {
        return false;
    }

    let path = candidate.path().to_lowercase();

    if EXCLUDED_PATH_PATTERNS
        .iter()
        .any(|pattern| path.contains(pattern))
    {
        return false;
    }

    if EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    true
}
