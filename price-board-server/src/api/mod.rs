use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::provider::mapping::{map_asset_pairs, map_price, map_trades};
use crate::provider::ProviderDescriptor;
use crate::types::{AssetPair, NormalizedQuote, NormalizedTrade};

pub use error::ApiError;
pub use http::HttpExchangeClient;

mod error;
mod http;
#[cfg(test)]
pub mod mock;

#[async_trait]
pub trait ExchangeApi: Send + Sync {
	/// Fetches `url` and decodes the body as JSON.
	async fn get_json(&self, url: &str) -> Result<Value, ApiError>;
}

/// Fans requests out to every configured provider and normalizes what comes back.
#[derive(Clone)]
pub struct PriceBoardApi {
	api: Arc<dyn ExchangeApi>,
	providers: Arc<[ProviderDescriptor]>,
}

impl PriceBoardApi {
	pub fn new(api: Arc<dyn ExchangeApi>, providers: Vec<ProviderDescriptor>) -> Self {
		Self { api, providers: providers.into() }
	}

	pub fn providers(&self) -> &[ProviderDescriptor] {
		&self.providers
	}

	pub fn find_provider(&self, name: &str) -> Option<&ProviderDescriptor> {
		self.providers.iter().find(|provider| provider.matches_name(name))
	}

	/// One row per provider, in table order. Every request is awaited; a failed one only
	/// blanks its own row.
	pub async fn get_quotations(&self, pair: &AssetPair) -> Vec<NormalizedQuote> {
		let requests = self.providers.iter().map(|provider| async move {
			let url = provider.price_url(&pair.symbol);

			let price = match self.api.get_json(&url).await {
				Ok(body) => {
					let price = map_price(provider, &body);
					if price.is_none() {
						log::debug!("{} does not list {}", provider.name, pair.symbol);
					}
					price
				},
				Err(e) => {
					log::warn!("Error getting price for {} from {}: {}", pair.symbol, provider.name, e);
					None
				},
			};

			NormalizedQuote {
				key: provider.id.clone(),
				name: provider.name.clone(),
				price,
				symbol: pair.symbol.clone(),
			}
		});

		join_all(requests).await
	}

	pub async fn get_trades(
		&self,
		provider: &ProviderDescriptor,
		pair: &AssetPair,
		limit: u32,
	) -> Result<Vec<NormalizedTrade>, ApiError> {
		let url = provider.trades_url(&pair.symbol, limit);
		let body = self.api.get_json(&url).await?;

		// Not every provider honours a limit in the URL.
		let mut trades = map_trades(provider, &body);
		trades.truncate(limit as usize);
		Ok(trades)
	}

	/// Union of the pair listings of every provider that publishes one, sorted by symbol.
	pub async fn get_asset_pairs(&self) -> Vec<AssetPair> {
		let requests = self.providers.iter().filter_map(|provider| {
			let endpoint = provider.pairs.as_ref()?;
			let url = provider.pairs_url()?;

			Some(async move {
				match self.api.get_json(&url).await {
					Ok(body) => map_asset_pairs(endpoint, &body),
					Err(e) => {
						log::error!("Error getting asset pairs from {}: {}", provider.name, e);
						Vec::new()
					},
				}
			})
		});

		join_all(requests)
			.await
			.into_iter()
			.flatten()
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}
}
