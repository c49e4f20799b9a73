/// Demo fallback secret matching the original deployment; override with
/// `JWT_SECRET` in any real environment.
const DEFAULT_JWT_SECRET: &str = "clickereen-secret-key-2024";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_owned());
        let environment =
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_owned());
        Self {
            port,
            jwt_secret,
            environment,
        }
    }
}
