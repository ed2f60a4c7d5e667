use crate::compiler::RequestConfig;

/// Quote for a POSIX shell single-quoted string
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// URL with compiled params appended as a query string.
///
/// Unparseable URLs get the params appended textually so the preview still
/// shows them.
fn url_with_params(config: &RequestConfig) -> String {
    let Some(params) = config.params.as_ref() else {
        return config.url.clone();
    };

    if let Ok(mut parsed) = url::Url::parse(&config.url) {
        parsed.query_pairs_mut().extend_pairs(params.iter());
        return parsed.to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    let separator = if config.url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", config.url, separator, query)
}

/// Format a compiled configuration as a cURL command
pub fn to_curl(config: &RequestConfig) -> String {
    let mut parts = vec!["curl".to_string()];

    // Method
    // `-d` alone would turn GET into POST and conflicts with `-I`
    let method = config.method.to_ascii_uppercase();
    let has_data = config.data.is_some();
    if method == "HEAD" && !has_data {
        parts.push("-I".to_string());
    } else if method != "GET" || has_data {
        parts.push(format!("-X {}", method));
    }

    // URL
    parts.push(shell_quote(&url_with_params(config)));

    // Headers
    if let Some(headers) = &config.headers {
        for (key, value) in headers {
            parts.push(format!("-H {}", shell_quote(&format!("{}: {}", key, value))));
        }
    }
    let has_content_type = config
        .headers
        .as_ref()
        .is_some_and(|h| h.keys().any(|k| k.eq_ignore_ascii_case("content-type")));
    if has_data && !has_content_type {
        parts.push(format!("-H {}", shell_quote("Content-Type: application/json")));
    }

    // Auth
    if let Some(auth) = &config.auth {
        parts.push(format!(
            "-u {}",
            shell_quote(&format!("{}:{}", auth.username, auth.password))
        ));
    }

    // Body
    if let Some(data) = &config.data {
        parts.push(format!("-d {}", shell_quote(&data.to_string())));
    }

    parts.join(" \\\n  ")
}
