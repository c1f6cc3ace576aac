use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub sessions_collection: String,
    pub submissions_collection: String,
    pub openai_api_key: SecretString,
    pub openai_base_url: String,
    pub candidate_models: Vec<String>,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "mathwords-local".to_string()),
            sessions_collection: env::var("SESSIONS_COLLECTION")
                .unwrap_or_else(|_| "sessions".to_string()),
            submissions_collection: env::var("SUBMISSIONS_COLLECTION")
                .unwrap_or_else(|_| "submissions".to_string()),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "sk-unset".to_string()),
            ),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            candidate_models: env::var("CANDIDATE_MODELS")
                .unwrap_or_else(|_| "gpt-4.1-mini,gpt-4.1-nano".to_string())
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the provider key is still the placeholder
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret() == "sk-unset" {
            panic!(
                "FATAL: OPENAI_API_KEY is not set! Problem and feedback generation cannot work without it."
            );
        }

        if self.candidate_models.is_empty() {
            panic!("FATAL: CANDIDATE_MODELS is empty! At least one model identifier is required.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "mathwords-test".to_string(),
            sessions_collection: "sessions".to_string(),
            submissions_collection: "submissions".to_string(),
            openai_api_key: SecretString::from("test-key".to_string()),
            openai_base_url: "http://localhost:1234".to_string(),
            candidate_models: vec!["model-a".to_string(), "model-b".to_string()],
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
