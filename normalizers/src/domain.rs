/// Reduces a website URL to a bare domain: scheme and a leading `www.` are
/// stripped, as is everything from the first `/`.
///
/// ```
/// assert_eq!(
///     normalizers::company_domain("https://www.acme.com/about"),
///     Some("acme.com".to_string())
/// );
/// ```
pub fn company_domain(website: &str) -> Option<String> {
    let trimmed = website.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    let domain = host.split('/').next().unwrap_or_default().trim();

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}
