//! API server configuration.

/// Development frontends allowed by default.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Capability configuration for the service. Which optional collaborators are
/// present (completion credential, database URL) decides AI-augmented and
/// persistent-storage behavior at construction time; handlers never consult
/// the environment themselves.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL; absent means in-memory history only.
    pub database_url: Option<String>,
    /// OpenAI API key; absent or empty means keyword-fallback responses only.
    pub openai_api_key: Option<String>,
    /// Completion model identifier.
    pub openai_model: String,
    /// Origins admitted by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable          | Default                                        |
    /// |-------------------|------------------------------------------------|
    /// | `BIND_ADDR`       | `127.0.0.1:8000`                               |
    /// | `DATABASE_URL`    | unset → in-memory history                      |
    /// | `OPENAI_API_KEY`  | unset → keyword fallback only                  |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`                                |
    /// | `ALLOWED_ORIGINS` | `http://localhost:3000,http://127.0.0.1:3000`  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".into()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| {
                    DEFAULT_ALLOWED_ORIGINS
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
        }
    }
}
