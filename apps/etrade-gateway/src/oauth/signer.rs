//! OAuth 1.0 request signing (HMAC-SHA1).
//!
//! Implements the signature base string and signing key construction from
//! RFC 5849 §3.4. Every provider call carries an `Authorization: OAuth ...`
//! header produced here; the token pair is absent only for the initial
//! request-token exchange.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode with the RFC 3986 unreserved set, as OAuth requires.
pub(crate) fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Signs outbound requests with a fixed consumer key pair.
#[derive(Clone)]
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl std::fmt::Debug for OAuth1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Signer")
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl OAuth1Signer {
    /// Create a signer for a consumer key pair.
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Get the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// `query` is the exact set of query pairs the request will carry, in
    /// raw (unencoded) form. `token` is the current token pair, absent for
    /// the request-token exchange. `extra_params` holds protocol parameters
    /// like `oauth_callback` or `oauth_verifier`.
    #[must_use]
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        query: &[(&'static str, String)],
        token: Option<(&str, &str)>,
        extra_params: &[(&str, &str)],
    ) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_at(method, url, query, token, extra_params, &nonce, timestamp)
    }

    #[allow(clippy::too_many_arguments)]
    fn authorization_header_at(
        &self,
        method: &str,
        url: &str,
        query: &[(&'static str, String)],
        token: Option<(&str, &str)>,
        extra_params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let mut oauth_params: Vec<(String, String)> = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        if let Some((token_value, _)) = token {
            oauth_params.push(("oauth_token".to_string(), token_value.to_string()));
        }
        for (key, value) in extra_params {
            oauth_params.push(((*key).to_string(), (*value).to_string()));
        }

        let mut signed_params = oauth_params.clone();
        signed_params.extend(
            query
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone())),
        );

        let token_secret = token.map(|(_, secret)| secret);
        let signature = self.signature(method, url, &signed_params, token_secret);

        let mut header = String::from("OAuth ");
        for (key, value) in &oauth_params {
            header.push_str(&format!("{key}=\"{}\", ", percent_encode(value)));
        }
        header.push_str(&format!("oauth_signature=\"{}\"", percent_encode(&signature)));
        header
    }

    /// Compute the base64 HMAC-SHA1 signature over the base string.
    #[allow(clippy::expect_used)] // HMAC accepts keys of any length
    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        token_secret: Option<&str>,
    ) -> String {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .map(|(key, value)| (percent_encode(key), percent_encode(value)))
            .collect();
        encoded.sort();

        let normalized = encoded
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(url),
            percent_encode(&normalized)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(token_secret.unwrap_or(""))
        );

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(base_string.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }
}
