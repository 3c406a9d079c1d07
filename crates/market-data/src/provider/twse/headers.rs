//! HTTP headers for the TWSE endpoints

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

/// Headers for TWSE requests. The MIS endpoint rejects requests without a
/// browser-like referer.
pub fn twse_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-TW,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://mis.twse.com.tw/stock/index.jsp"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twse_headers_has_required_fields() {
        let headers = twse_headers();
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(REFERER));
        assert!(headers.contains_key(USER_AGENT));
    }
}
