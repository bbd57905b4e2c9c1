//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Read status, headers and body from a reqwest response.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, headers, body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the server's `message` field when the body is a
    /// JSON error object, otherwise the raw body text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let message = self
            .json::<ErrorBody>()
            .map(|b| b.message)
            .or_else(|_| self.text())
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_success_range() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_json() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Data {
            value: i32,
        }

        let resp = make_response(200, br#"{"value": 42}"#);
        assert_eq!(resp.json::<Data>().unwrap(), Data { value: 42 });
        assert!(make_response(200, b"not json").json::<Data>().is_err());
    }

    #[test]
    fn test_error_for_status_uses_json_message() {
        let resp = make_response(404, br#"{"message": "Product with id '999' not found"}"#);
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Product with id '999' not found");
            }
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_for_status_falls_back_to_text() {
        let err = make_response(502, b"Bad Gateway").error_for_status().unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 502, .. }));
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_error_for_status_success_passes_through() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }
}
