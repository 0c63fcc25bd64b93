use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::ExchangeApi;

/// Plain `GET` client shared by every provider. Requests carry no auth and no timeout.
pub struct HttpExchangeClient {
	inner: reqwest::Client,
}

impl HttpExchangeClient {
	pub fn new() -> Self {
		Self { inner: reqwest::Client::new() }
	}
}

impl Default for HttpExchangeClient {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ExchangeApi for HttpExchangeClient {
	async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
		let parsed = reqwest::Url::parse(url)
			.map_err(|e| ApiError::InvalidUrl { url: url.to_string(), reason: e.to_string() })?;

		let response = self
			.inner
			.get(parsed)
			.send()
			.await
			.map_err(|e| ApiError::Request { url: url.to_string(), reason: e.to_string() })?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await;
			return Err(ApiError::Status {
				url: url.to_string(),
				status: status.as_u16(),
				body: body.unwrap_or_else(|_| "Unknown".to_string()).trim().to_string(),
			});
		}

		response
			.json()
			.await
			.map_err(|e| ApiError::Decode { url: url.to_string(), reason: e.to_string() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_invalid_url_is_reported_without_a_request() {
		let client = HttpExchangeClient::new();

		let result = client.get_json("/kraken/Ticker?pair=BTCUSDT").await;

		match result {
			Err(ApiError::InvalidUrl { url, .. }) => assert_eq!(url, "/kraken/Ticker?pair=BTCUSDT"),
			other => panic!("expected an invalid URL error, got {:?}", other),
		}
	}
}
