// ----------------------------
// LocalStorage helpers
// ----------------------------
pub const LS_API_KEY: &str = "dreamscape_ai_api_key";
pub const LS_IMAGE_MODEL: &str = "dreamscape_ai_image_model";
pub const LS_TEXT_MODEL: &str = "dreamscape_ai_text_model";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

pub fn load_local_storage(key: &str) -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(key).ok().flatten())
        .unwrap_or_default()
}

pub fn save_local_storage(key: &str, value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

pub fn remove_local_storage(key: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item(key);
    }
}

/// Connection settings for the generative-AI provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    pub image_model: String,
    pub text_model: String,
    pub endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: option_env!("GEMINI_API_KEY").unwrap_or_default().to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build-time defaults overridden by whatever the user saved.
    pub fn load() -> Self {
        Self::default().with_overrides(
            &load_local_storage(LS_API_KEY),
            &load_local_storage(LS_IMAGE_MODEL),
            &load_local_storage(LS_TEXT_MODEL),
        )
    }

    pub fn with_overrides(mut self, api_key: &str, image_model: &str, text_model: &str) -> Self {
        if !api_key.trim().is_empty() {
            self.api_key = api_key.trim().to_string();
        }
        if !image_model.trim().is_empty() {
            self.image_model = image_model.trim().to_string();
        }
        if !text_model.trim().is_empty() {
            self.text_model = text_model.trim().to_string();
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        )
    }
}
