use std::env;

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Secret used to sign flash message cookies. Empty when not configured.
    pub secret: String,
    pub templates_dir: String,
}

impl ServerConfig {
    /// Build the configuration from environment variables, falling back to
    /// development defaults for anything missing or malformed.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
        let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let secret = env::var("SECRET_KEY").unwrap_or_default();
        let templates_dir = env::var("TEMPLATES_DIR").unwrap_or("templates/**/*".to_string());

        Self {
            database_url,
            address,
            port,
            secret,
            templates_dir,
        }
    }
}
