use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://hands-on-iota.vercel.app".into(),
        }
    }
}

impl Settings {
    /// Host portion of the API base URL, shown in the header so it is
    /// obvious which deployment the dashboard is pointed at.
    pub fn service_host(&self) -> String {
        let trimmed = self
            .api_base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        match trimmed.split('/').next() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => self.api_base_url.clone(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    settings
}
