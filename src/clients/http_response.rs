//! Parsers for Shopify-specific response headers.

/// REST call-limit header, `made/allowed`.
pub const CALL_LIMIT_HEADER: &str = "x-shopify-shop-api-call-limit";
/// RFC 5988 pagination header.
pub const LINK_HEADER: &str = "link";
/// Request id quoted in error reports.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Set when the called endpoint or version is deprecated.
pub const DEPRECATED_REASON_HEADER: &str = "x-shopify-api-deprecated-reason";
/// Seconds to wait before retrying a 429.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// REST call-limit usage from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// # Example
///
/// ```rust
/// use shopify_client::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("39/40").unwrap();
/// assert_eq!(limit.made, 39);
/// assert_eq!(limit.allowed, 40);
/// assert!(limit.ratio() >= 0.8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls counted against the bucket.
    pub made: u32,
    /// Bucket size.
    pub allowed: u32,
}

impl ApiCallLimit {
    /// Parses a `made/allowed` header value.
    ///
    /// Returns `None` for malformed values and for a zero bucket size.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (made, allowed) = header_value.trim().split_once('/')?;
        let made = made.trim().parse().ok()?;
        let allowed: u32 = allowed.trim().parse().ok()?;
        if allowed == 0 {
            return None;
        }
        Some(Self { made, allowed })
    }

    /// Returns `made / allowed`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.made) / f64::from(self.allowed)
    }
}

/// Cursor pagination state parsed from a `Link` header.
///
/// # Example
///
/// ```rust
/// use shopify_client::PaginationInfo;
///
/// let link = r#"<https://x/a?page_info=abc123>; rel="next", <https://x/a?page_info=xyz999>; rel="previous""#;
/// let info = PaginationInfo::parse_link_header(link);
/// assert_eq!(info.next_page_info.as_deref(), Some("abc123"));
/// assert_eq!(info.prev_page_info.as_deref(), Some("xyz999"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Cursor for the previous page.
    pub prev_page_info: Option<String>,
    /// Cursor for the next page.
    pub next_page_info: Option<String>,
}

impl PaginationInfo {
    /// Parses both cursors from a `Link` header value.
    ///
    /// `previous` and `prev` both fill the previous-page slot.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        Self {
            prev_page_info: parse_link(header_value, "previous")
                .or_else(|| parse_link(header_value, "prev")),
            next_page_info: parse_link(header_value, "next"),
        }
    }

    /// Returns `true` if neither cursor is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.prev_page_info.is_none() && self.next_page_info.is_none()
    }
}

/// Returns the `page_info` cursor of the `Link` entry whose relation is `rel`.
///
/// Relation names match case-insensitively and may be quoted or bare. An
/// entry whose URL has no `page_info` parameter yields `None`.
///
/// # Example
///
/// ```rust
/// use shopify_client::clients::parse_link;
///
/// let link = "<https://x/a?limit=5&page_info=abc123>; rel=NEXT";
/// assert_eq!(parse_link(link, "next").as_deref(), Some("abc123"));
/// assert_eq!(parse_link(link, "previous"), None);
/// ```
#[must_use]
pub fn parse_link(header_value: &str, rel: &str) -> Option<String> {
    let mut rest = header_value;

    // The URL is delimited by `<...>` and may itself contain `,` or `;`.
    while let Some(open) = rest.find('<') {
        let entry = &rest[open + 1..];
        let close = entry.find('>')?;
        let url = &entry[..close];

        let tail = &entry[close + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];
        rest = &tail[params_end..];

        let matches_rel = params.split([';', ',']).any(|param| {
            param.split_once('=').is_some_and(|(name, value)| {
                name.trim().eq_ignore_ascii_case("rel")
                    && value
                        .trim()
                        .trim_matches('"')
                        .split_whitespace()
                        .any(|r| r.eq_ignore_ascii_case(rel))
            })
        });

        if matches_rel {
            if let Some(page_info) = extract_page_info(url) {
                return Some(page_info);
            }
        }
    }

    None
}

fn extract_page_info(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| *key == "page_info")
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: &str = r#"<https://x/a?page_info=abc123>; rel="next", <https://x/a?page_info=xyz999>; rel="previous""#;

    // ========================================================================
    // ApiCallLimit
    // ========================================================================

    #[test]
    fn test_api_call_limit_parsing() {
        assert_eq!(
            ApiCallLimit::parse("39/40"),
            Some(ApiCallLimit { made: 39, allowed: 40 })
        );
        assert_eq!(
            ApiCallLimit::parse(" 1 / 80 "),
            Some(ApiCallLimit { made: 1, allowed: 80 })
        );

        assert!(ApiCallLimit::parse("invalid").is_none());
        assert!(ApiCallLimit::parse("40").is_none());
        assert!(ApiCallLimit::parse("40/").is_none());
        assert!(ApiCallLimit::parse("/80").is_none());
        assert!(ApiCallLimit::parse("abc/def").is_none());
        assert!(ApiCallLimit::parse("1/0").is_none());
    }

    #[test]
    fn test_api_call_limit_ratio() {
        let high = ApiCallLimit::parse("39/40").unwrap();
        assert!((high.ratio() - 0.975).abs() < f64::EPSILON);

        let low = ApiCallLimit::parse("10/40").unwrap();
        assert!((low.ratio() - 0.25).abs() < f64::EPSILON);
    }

    // ========================================================================
    // Link header
    // ========================================================================

    #[test]
    fn test_parse_link_by_relation() {
        assert_eq!(parse_link(BOTH, "next").as_deref(), Some("abc123"));
        assert_eq!(parse_link(BOTH, "previous").as_deref(), Some("xyz999"));
        assert_eq!(parse_link(BOTH, "last"), None);
    }

    #[test]
    fn test_parse_link_tolerates_unquoted_and_mixed_case() {
        let link = "<https://x/a?page_info=n1>; rel=Next, <https://x/a?page_info=p1>; REL=\"PREVIOUS\"";
        assert_eq!(parse_link(link, "next").as_deref(), Some("n1"));
        assert_eq!(parse_link(link, "Previous").as_deref(), Some("p1"));
    }

    #[test]
    fn test_parse_link_without_page_info() {
        assert_eq!(parse_link("<https://x/a?limit=50>; rel=\"next\"", "next"), None);
        assert_eq!(parse_link("<https://x/a>; rel=\"next\"", "next"), None);
    }

    #[test]
    fn test_parse_link_with_other_query_params() {
        let link = r#"<https://shop.myshopify.com/admin/api/2021-07/products.json?limit=3&page_info=eyJsYXN0X2lkIjo0fQ>; rel="next""#;
        assert_eq!(parse_link(link, "next").as_deref(), Some("eyJsYXN0X2lkIjo0fQ"));
    }

    #[test]
    fn test_parse_link_with_commas_and_semicolons_in_url() {
        let link = r#"<https://x/a.json?fields=id,title&limit=2&page_info=p1>; rel="previous", <https://x/a.json?fields=id,title&sort=a;b&limit=2&page_info=n1>; rel="next""#;
        assert_eq!(parse_link(link, "next").as_deref(), Some("n1"));
        assert_eq!(parse_link(link, "previous").as_deref(), Some("p1"));

        let info = PaginationInfo::parse_link_header(link);
        assert_eq!(info.next_page_info.as_deref(), Some("n1"));
        assert_eq!(info.prev_page_info.as_deref(), Some("p1"));
    }

    #[test]
    fn test_parse_link_ignores_unterminated_entry() {
        assert_eq!(parse_link("<https://x/a?page_info=n1; rel=\"next\"", "next"), None);
    }

    #[test]
    fn test_pagination_info_from_header() {
        let info = PaginationInfo::parse_link_header(BOTH);
        assert_eq!(info.next_page_info.as_deref(), Some("abc123"));
        assert_eq!(info.prev_page_info.as_deref(), Some("xyz999"));
        assert!(!info.is_empty());

        let next_only = PaginationInfo::parse_link_header("<https://x/a?page_info=n>; rel=\"next\"");
        assert_eq!(next_only.next_page_info.as_deref(), Some("n"));
        assert!(next_only.prev_page_info.is_none());

        let prev_short = PaginationInfo::parse_link_header("<https://x/a?page_info=p>; rel=prev");
        assert_eq!(prev_short.prev_page_info.as_deref(), Some("p"));
    }

    #[test]
    fn test_empty_header_yields_no_cursors() {
        assert!(PaginationInfo::parse_link_header("").is_empty());
    }
}
