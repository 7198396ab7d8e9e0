use parking_lot::RwLock;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static CSRF_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[name=csrf-token]").expect("Invalid csrf selector"));

#[derive(Debug, Clone, Default)]
struct Session {
    cookie_header: String,
    csrf_token: String,
}

/// Short-lived anti-bot state scraped from one bootstrap response.
///
/// Both fields are replaced together on every bootstrap fetch and
/// read-shared by all write-request constructors. Concurrent bootstrap
/// fetches racing with in-flight write requests can interleave stale and
/// fresh pairs; that is accepted because write requests are idempotent
/// catalog queries, so no locking beyond the single `RwLock`.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: RwLock<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the cookie header and anti-forgery token from a bootstrap
    /// response, overwriting any previous pair.
    ///
    /// The cookie header is the `name=value` part of every `Set-Cookie`
    /// header joined with `"; "`; the token comes from the document's
    /// `csrf-token` meta tag, empty string when absent.
    pub fn record_from_bootstrap(&self, headers: &HeaderMap, body: &str) {
        let cookie_header = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).to_string())
            .collect::<Vec<_>>()
            .join("; ");

        let csrf_token = Html::parse_document(body)
            .select(&CSRF_META_SELECTOR)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .unwrap_or_default()
            .to_string();

        *self.inner.write() = Session {
            cookie_header,
            csrf_token,
        };
    }

    /// Attach the stored pair to an outgoing write request.
    ///
    /// Read-only fetches never go through here.
    pub fn attach_to_write_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        let session = self.inner.read().clone();
        request
            .header(COOKIE, session.cookie_header)
            .header("X-CSRF-TOKEN", session.csrf_token)
    }

    pub fn cookie_header(&self) -> String {
        self.inner.read().cookie_header.clone()
    }

    pub fn csrf_token(&self) -> String {
        self.inner.read().csrf_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_record_joins_cookie_pairs_and_reads_token() {
        let state = SessionState::new();

        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("XSRF-TOKEN=abc123; path=/; secure"),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session=def456; HttpOnly"),
        );

        let body = r#"<html><head><meta name="csrf-token" content="tok-789"></head></html>"#;
        state.record_from_bootstrap(&headers, body);

        assert_eq!(state.cookie_header(), "XSRF-TOKEN=abc123; session=def456");
        assert_eq!(state.csrf_token(), "tok-789");
    }

    #[test]
    fn test_record_overwrites_previous_pair() {
        let state = SessionState::new();

        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1; path=/"));
        state.record_from_bootstrap(&headers, r#"<meta name="csrf-token" content="one">"#);

        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        state.record_from_bootstrap(&headers, "<html></html>");

        assert_eq!(state.cookie_header(), "b=2");
        // Token absent in the second response: stored as empty, not kept
        assert_eq!(state.csrf_token(), "");
    }
}
