//! Remote store for committed compositions.
//!
//! - `POST save-anagrams/` with `{"model", "anagrams"}`
//! - `POST delete-anagrams/` with `{"id"}`
//! - `GET my-anagrams` listing `{"status", "anagrams": [{id, model, anagrams}]}`
//!
//! All three answer `{"status": "success" | "error", "message"?}`.

use crate::http::HttpClient;
use anagram_core::{
    CompositionStore, DeleteRequest, PersistRequest, Result, SavedEntry, SavedListResponse,
    StatusResponse,
};
use tracing::info;

pub const SAVE_PATH: &str = "save-anagrams/";
pub const DELETE_PATH: &str = "delete-anagrams/";
pub const LIST_PATH: &str = "my-anagrams";

pub struct HttpCompositionStore {
    http: HttpClient,
}

impl HttpCompositionStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl CompositionStore for HttpCompositionStore {
    fn persist(&mut self, request: &PersistRequest) -> Result<()> {
        let resp: StatusResponse = self.http.post(SAVE_PATH, request)?;
        resp.into_result()?;
        info!(model = %request.model, "compositions saved remotely");
        Ok(())
    }

    fn delete(&mut self, request: DeleteRequest) -> Result<()> {
        let resp: StatusResponse = self.http.post(DELETE_PATH, &request)?;
        resp.into_result()
    }

    fn list(&self) -> Result<Vec<SavedEntry>> {
        let resp: SavedListResponse = self.http.get(LIST_PATH)?;
        StatusResponse {
            status: resp.status,
            message: resp.message,
        }
        .into_result()?;
        Ok(resp.anagrams)
    }
}
