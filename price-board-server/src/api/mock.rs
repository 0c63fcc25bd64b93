use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{ApiError, ExchangeApi};

enum MockResponse {
	Json(Value),
	Error(u16),
}

/// Canned responses keyed by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct MockExchange {
	responses: HashMap<String, MockResponse>,
	delay: Option<Duration>,
	requested: Mutex<Vec<String>>,
}

impl MockExchange {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_json(mut self, url: &str, body: Value) -> Self {
		self.responses.insert(url.to_string(), MockResponse::Json(body));
		self
	}

	pub fn with_error(mut self, url: &str, status: u16) -> Self {
		self.responses.insert(url.to_string(), MockResponse::Error(status));
		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn requested(&self) -> Vec<String> {
		self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
	}
}

#[async_trait]
impl ExchangeApi for MockExchange {
	async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
		if let Ok(mut urls) = self.requested.lock() {
			urls.push(url.to_string());
		}

		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}

		match self.responses.get(url) {
			Some(MockResponse::Json(body)) => Ok(body.clone()),
			Some(MockResponse::Error(status)) => Err(ApiError::Status {
				url: url.to_string(),
				status: *status,
				body: "mock failure".to_string(),
			}),
			None => Err(ApiError::Status {
				url: url.to_string(),
				status: 404,
				body: "Not Found".to_string(),
			}),
		}
	}
}
