use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct MailClient {
    http: Client,
    base_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl MailClient {
    pub fn new(base_url: String, api_key: String, from: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            from,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), String> {
        if !self.has_key() {
            return Err("MAIL_API_KEY is missing in .env".to_string());
        }

        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));

        let msg = OutboundMessage {
            from: &self.from,
            to,
            subject,
            text,
        };

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&msg)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("Mail send failed: {status} {body}"));
        }

        Ok(())
    }
}
