use url::Url;

const REDACTED: &str = "***";

/// Redact secrets from a connection string before it is logged or embedded in an error.
///
/// Passwords in the authority and sensitive query parameters are replaced by
/// `***`. Strings that do not parse as URLs are redacted entirely.
pub fn redact_connection_string(conn: &str) -> String {
    let Ok(mut url) = Url::parse(conn) else {
        return REDACTED.to_string();
    };

    if url.password().is_some() && url.set_password(Some(REDACTED)).is_err() {
        return REDACTED.to_string();
    }

    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if is_sensitive_key(&key) {
                    REDACTED.to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "password" | "pass" | "token" | "api_key" | "apikey"
    )
}
