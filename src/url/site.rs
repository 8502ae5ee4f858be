use url::Url;

/// Checks whether two URLs point at the same site
///
/// Site identity is the host plus the port as parsed, which mirrors the
/// authority component of the URL: `127.0.0.1:8001` and `127.0.0.1:8002` are
/// different sites, and a subdomain never matches its parent domain. The
/// `url` crate strips default ports during parsing, so `http://example.com`
/// and `http://example.com:80` compare equal.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use modmap::url::same_site;
///
/// let a = Url::parse("https://example.com/docs").unwrap();
/// let b = Url::parse("https://example.com/api").unwrap();
/// let c = Url::parse("https://sub.example.com/").unwrap();
/// assert!(same_site(&a, &b));
/// assert!(!same_site(&a, &c));
/// ```
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(host_a), Some(host_b)) => host_a == host_b && a.port() == b.port(),
        _ => false,
    }
}
