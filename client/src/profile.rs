//! Remote settings profile.
//!
//! `GET anagrams/settings/?lang=xx` returns the profile snapshot including
//! `isAuthenticated`; `POST anagrams/settings/save/` stores the payload and
//! echoes what the server kept.

use crate::http::HttpClient;
use anagram_core::{
    AnagramSettings, CollaboratorError, ProfileSnapshot, ProfileStore, Result,
    SettingsSaveResponse, StatusResponse,
};

pub const SETTINGS_PATH: &str = "anagrams/settings/";
pub const SETTINGS_SAVE_PATH: &str = "anagrams/settings/save/";

pub struct HttpProfileStore {
    http: HttpClient,
}

impl HttpProfileStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn load_path(language_tag: &str) -> String {
        format!("{SETTINGS_PATH}?lang={}", urlencoding::encode(language_tag))
    }
}

impl ProfileStore for HttpProfileStore {
    fn load(&self, language_tag: &str) -> Result<ProfileSnapshot> {
        self.http.get(&Self::load_path(language_tag))
    }

    fn save(&mut self, settings: &AnagramSettings) -> Result<AnagramSettings> {
        let resp: SettingsSaveResponse = self.http.post(SETTINGS_SAVE_PATH, settings)?;
        settings_from(resp)
    }
}

fn settings_from(resp: SettingsSaveResponse) -> Result<AnagramSettings> {
    StatusResponse {
        status: resp.status,
        message: resp.message,
    }
    .into_result()?;
    resp.settings
        .ok_or_else(|| CollaboratorError::Malformed("settings missing from save response".into()))
}
