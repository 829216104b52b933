use std::net::SocketAddr;

use mongodb::Client;

use farewatch::{config, routes, services, AppState, RunGuards};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = services::db_init::ensure_indexes(&db).await {
        tracing::warn!("index setup failed: {e}");
    }

    let state = AppState {
        db,
        flights: services::flight_api::FlightApiClient::new(
            settings.flight_api_url.clone(),
            settings.flight_api_key.clone(),
        ),
        mail: services::mail::MailClient::new(
            settings.mail_api_url.clone(),
            settings.mail_api_key.clone(),
            settings.mail_from.clone(),
        ),
        runs: RunGuards::default(),
        settings,
    };

    let addr = SocketAddr::from((
        state.settings.host.parse::<std::net::IpAddr>().unwrap(),
        state.settings.port,
    ));

    let app = routes::app(state);

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
