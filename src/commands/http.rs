use std::collections::HashMap;

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::USER_AGENT;

/// Request options sent by the webview
#[derive(Debug, Deserialize)]
pub struct HttpRequestOptions {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
}

/// Header value as the webview sees it: a name that appears once maps to a
/// string, a repeated name (e.g. set-cookie) maps to the list of values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Response body, shaped by the content type: JSON for JSON responses,
/// raw bytes for binary asset types, text for everything else
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HttpResponseBody {
    Json(Value),
    Binary(Vec<u8>),
    Text(String),
}

#[derive(Debug, Serialize)]
pub struct HttpResponseDto {
    pub status: u16,
    pub headers: HashMap<String, HeaderValue>,
    pub data: HttpResponseBody,
}

/// Generic HTTP request facility for the webview (which cannot hit the CDN
/// directly because of CORS). Returns status, headers and a typed body.
#[tauri::command]
pub async fn http_request(options: HttpRequestOptions) -> Result<HttpResponseDto, String> {
    let method = Method::from_bytes(options.method.as_deref().unwrap_or("GET").as_bytes())
        .map_err(|e| format!("Invalid HTTP method: {}", e))?;

    let client = Client::new();
    let mut request = client
        .request(method, &options.url)
        .header("User-Agent", USER_AGENT);

    if let Some(headers) = &options.headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }

    if let Some(body) = &options.body {
        request = match body {
            Value::String(text) => request.body(text.clone()),
            other => request.json(other),
        };
    }

    let response = request
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());

    let content_type = match headers.get("content-type") {
        Some(HeaderValue::Single(value)) => value.clone(),
        Some(HeaderValue::Multiple(values)) => values.first().cloned().unwrap_or_default(),
        None => String::new(),
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read response body: {}", e))?;

    let data = body_from(&content_type, &bytes)?;

    Ok(HttpResponseDto {
        status,
        headers,
        data,
    })
}

/// Flatten the response headers without losing repeated names
fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, HeaderValue> {
    let mut out = HashMap::new();

    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .collect();

        let entry = match values.len() {
            0 => continue,
            1 => HeaderValue::Single(values.into_iter().next().unwrap_or_default()),
            _ => HeaderValue::Multiple(values),
        };
        out.insert(name.as_str().to_string(), entry);
    }

    out
}

fn body_from(content_type: &str, bytes: &[u8]) -> Result<HttpResponseBody, String> {
    if content_type.contains("application/octet-stream") || content_type.contains("shockwave-flash")
    {
        return Ok(HttpResponseBody::Binary(bytes.to_vec()));
    }

    let text = String::from_utf8_lossy(bytes).to_string();

    if content_type.contains("application/json") {
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse JSON response: {}", e))?;
        return Ok(HttpResponseBody::Json(value));
    }

    Ok(HttpResponseBody::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_parses_body() {
        let body = body_from("application/json; charset=utf-8", b"{\"a\": 1}").unwrap();
        assert_eq!(body, HttpResponseBody::Json(serde_json::json!({"a": 1})));
    }

    #[test]
    fn binary_content_types_return_raw_bytes() {
        let swf = body_from("application/x-shockwave-flash", &[0x43, 0x57, 0x53]).unwrap();
        assert_eq!(swf, HttpResponseBody::Binary(vec![0x43, 0x57, 0x53]));

        let blob = body_from("application/octet-stream", &[0, 1, 2]).unwrap();
        assert_eq!(blob, HttpResponseBody::Binary(vec![0, 1, 2]));
    }

    #[test]
    fn everything_else_is_text() {
        let body = body_from("text/plain", b"hello").unwrap();
        assert_eq!(body, HttpResponseBody::Text("hello".to_string()));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(body_from("application/json", b"not json").is_err());
    }

    #[test]
    fn repeated_header_names_keep_every_value() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "content-type",
            reqwest::header::HeaderValue::from_static("text/plain"),
        );
        headers.append(
            "set-cookie",
            reqwest::header::HeaderValue::from_static("a=1"),
        );
        headers.append(
            "set-cookie",
            reqwest::header::HeaderValue::from_static("b=2"),
        );

        let collected = collect_headers(&headers);
        assert_eq!(
            collected.get("content-type"),
            Some(&HeaderValue::Single("text/plain".to_string()))
        );
        assert_eq!(
            collected.get("set-cookie"),
            Some(&HeaderValue::Multiple(vec!["a=1".to_string(), "b=2".to_string()]))
        );
    }
}
