pub const API_KEY_ENV: &str = "PIPELAB_API_KEY";

pub struct DefaultsConfig {
    pub reasoning_enabled: bool,
    pub api_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            reasoning_enabled: true,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            timeout_secs: 30,
        }
    }
}
