use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser.
    /// TOML: `cors.allow_origins`. Default: empty, meaning any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
}
