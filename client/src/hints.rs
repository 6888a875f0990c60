//! Hint lookup for leftover letters.
//!
//! The hint generator runs server side; this client only asks it for words
//! that can be formed from the letters a composition left unused.
//!
//! Endpoint: `GET anagrams/{language_tag}/fetch/{leftover}/`
//!
//! Response: `{"status": "success", "hints_html": [...], "n_results": N, "recursions": M}`

use crate::http::HttpClient;
use anagram_core::{CollaboratorError, HintRequest, HintResponse, HintService, Result, Status};
use tracing::info;

pub struct HttpHintService {
    http: HttpClient,
}

impl HttpHintService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Endpoint path for `request`, with both segments percent-encoded.
    pub fn path(request: &HintRequest) -> String {
        format!(
            "anagrams/{}/fetch/{}/",
            urlencoding::encode(&request.language_tag),
            urlencoding::encode(&request.leftover_chars)
        )
    }
}

impl HintService for HttpHintService {
    fn fetch(&self, request: &HintRequest) -> Result<HintResponse> {
        if request.leftover_chars.is_empty() {
            return Err(CollaboratorError::Invalid(
                "no leftover characters to fetch hints for".into(),
            ));
        }
        let response: HintResponse = self.http.get(&Self::path(request))?;
        if response.status == Status::Error {
            return Err(CollaboratorError::rejected(
                response
                    .message
                    .unwrap_or_else(|| "hint service error".to_string()),
            ));
        }
        info!(
            results = response.result_count,
            recursions = response.recursion_count,
            "hints fetched"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn service() -> HttpHintService {
        HttpHintService::new(HttpClient::new(&ClientConfig::default()).unwrap())
    }

    #[test]
    fn test_path_encodes_segments() {
        let req = HintRequest {
            language_tag: "it".into(),
            leftover_chars: "cà p".into(),
        };
        assert_eq!(HttpHintService::path(&req), "anagrams/it/fetch/c%C3%A0%20p/");
    }

    #[test]
    fn test_empty_leftover_refused_without_network() {
        let req = HintRequest {
            language_tag: "it".into(),
            leftover_chars: String::new(),
        };
        assert!(matches!(
            service().fetch(&req),
            Err(CollaboratorError::Invalid(_))
        ));
    }
}
