use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct FlightApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FlightApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn offers(
        &self,
        origin: &str,
        destination: &str,
        depart_date: &str,
        return_date: Option<&str>,
    ) -> Result<OffersResponse, String> {
        if !self.has_key() {
            return Err("FLIGHT_API_KEY is missing in .env".to_string());
        }

        let url = format!("{}/offers", self.base_url.trim_end_matches('/'));

        let mut query: Vec<(&str, &str)> = vec![
            ("origin", origin),
            ("destination", destination),
            ("departDate", depart_date),
            ("token", &self.api_key),
        ];
        if let Some(rd) = return_date {
            query.push(("returnDate", rd));
        }

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("Flight offers request failed: {status} {body}"));
        }

        res.json::<OffersResponse>().await.map_err(|e| e.to_string())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OffersResponse {
    pub count: i64,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Offer {
    pub price: f64,
    pub currency: String,
    pub carrier: String,

    #[serde(rename = "departAt")]
    pub depart_at: String,
}
