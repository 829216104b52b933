use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_cookie_name: String,
    pub cookie_secure: bool,

    pub flight_api_url: String,
    pub flight_api_key: String,

    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,

    pub cron_secret: String,
    pub base_url: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "farewatch".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());
    let jwt_cookie_name = env::var("JWT_COOKIE_NAME").unwrap_or_else(|_| "auth".to_string());

    let cookie_secure = env::var("COOKIE_SECURE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let flight_api_url = env::var("FLIGHT_API_URL")
        .unwrap_or_else(|_| "https://api.flightoffers.example/v1".to_string());
    let flight_api_key = env::var("FLIGHT_API_KEY").unwrap_or_default();

    let mail_api_url = env::var("MAIL_API_URL")
        .unwrap_or_else(|_| "https://api.mailprovider.example/v1".to_string());
    let mail_api_key = env::var("MAIL_API_KEY").unwrap_or_default();
    let mail_from = env::var("MAIL_FROM")
        .unwrap_or_else(|_| "alerts@farewatch.dev".to_string());

    let cron_secret = env::var("CRON_SECRET").unwrap_or_default();

    let base_url = env::var("BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        jwt_secret,
        jwt_cookie_name,
        cookie_secure,
        flight_api_url,
        flight_api_key,
        mail_api_url,
        mail_api_key,
        mail_from,
        cron_secret,
        base_url,
    }
}
