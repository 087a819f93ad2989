//! HTTP collaborator abstraction used by the remote checkers.

use serde_json::Value;

use crate::error::CheckError;

/// Performs blocking `GET` requests.
///
/// Implementations must not follow redirects: the open data checker treats a
/// redirect as "dataset not found".
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, CheckError>;
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, CheckError> {
        serde_json::from_str(&self.body).map_err(|e| CheckError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body() {
        let response = HttpResponse::new(200, r#"{"owner": "UtahAGRC"}"#);
        assert_eq!(response.json().unwrap()["owner"], "UtahAGRC");
    }

    #[test]
    fn test_invalid_json_body() {
        let response = HttpResponse::new(200, "<html></html>");
        assert!(matches!(
            response.json(),
            Err(CheckError::InvalidResponse(_))
        ));
    }
}
