//! Static per-exchange configuration.
//!
//! A [`ProviderDescriptor`] says where a provider lives, how to spell a pair for it and
//! where each logical field sits in its responses. Adding a provider means adding a
//! descriptor, either to the built-in table or to a providers file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;
use std::path::Path;
use thiserror::Error;

use crate::args::ProviderHosts;
use crate::pair::{display_to_provider_symbol, CaseConvention};

mod defaults;
pub mod mapping;

pub use defaults::default_providers;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
	pub id: SmolStr,
	pub name: SmolStr,
	pub base_url: String,
	pub price: PriceEndpoint,
	pub trades: TradesEndpoint,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pairs: Option<PairListEndpoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEndpoint {
	/// Appended to the base URL, followed directly by the wire symbol.
	pub path: String,
	pub case: CaseConvention,
	pub price_field: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesEndpoint {
	/// Template with `{symbol}` and `{limit}` placeholders.
	pub path: String,
	pub case: CaseConvention,
	/// Where the list of trades sits when the body is not itself a list.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_path: Option<String>,
	pub fields: TradeFields,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeFields {
	#[serde(default = "default_id_field")]
	pub id: String,
	pub price: String,
	pub amount: String,
	pub time: String,
	#[serde(default)]
	pub time_unit: TimeUnit,
	pub side: SideIndicator,
}

fn default_id_field() -> String {
	"id".to_string()
}

/// A trade is buyer-maker when the value at `field` equals `expected`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideIndicator {
	pub field: String,
	pub expected: Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
	#[default]
	Milliseconds,
	Seconds,
}

impl TimeUnit {
	pub fn to_millis(self, value: f64) -> i64 {
		match self {
			TimeUnit::Milliseconds => value.round() as i64,
			TimeUnit::Seconds => (value * 1_000.0).round() as i64,
		}
	}
}

/// Listing of every pair a provider trades, used for pair search.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairListEndpoint {
	pub path: String,
	pub list_path: String,
	pub base_field: String,
	pub quote_field: String,
}

/// Substitutes `{name}` placeholders. Placeholders without a value are left as they are.
pub fn format_template(template: &str, values: &[(&str, &str)]) -> String {
	values.iter().fold(template.to_string(), |acc, (name, value)| {
		acc.replace(&format!("{{{}}}", name), value)
	})
}

impl ProviderDescriptor {
	pub fn price_url(&self, display_symbol: &str) -> String {
		let symbol = self.price.case.apply(&display_to_provider_symbol(display_symbol));
		format!("{}{}{}", self.base_url, self.price.path, symbol)
	}

	pub fn trades_url(&self, display_symbol: &str, limit: u32) -> String {
		let symbol = self.trades.case.apply(&display_to_provider_symbol(display_symbol));
		let limit = limit.to_string();
		let path =
			format_template(&self.trades.path, &[("symbol", symbol.as_str()), ("limit", limit.as_str())]);
		format!("{}{}", self.base_url, path)
	}

	pub fn pairs_url(&self) -> Option<String> {
		self.pairs.as_ref().map(|pairs| format!("{}{}", self.base_url, pairs.path))
	}

	pub fn matches_name(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name) || self.id.eq_ignore_ascii_case(name)
	}
}

#[derive(Debug, Error)]
pub enum ProviderConfigError {
	#[error("Could not read providers file {path}: {source}")]
	Read { path: String, source: std::io::Error },

	#[error("Could not parse providers file {path}: {source}")]
	Parse { path: String, source: serde_json::Error },

	#[error("No providers configured")]
	Empty,
}

/// Loads the descriptor table from `file` when given, else the built-in table with the
/// base URLs taken from `hosts`.
pub fn load_providers(
	file: Option<&Path>,
	hosts: &ProviderHosts,
) -> Result<Vec<ProviderDescriptor>, ProviderConfigError> {
	let providers = match file {
		Some(path) => {
			let display = path.display().to_string();
			let raw = std::fs::read_to_string(path)
				.map_err(|source| ProviderConfigError::Read { path: display.clone(), source })?;
			serde_json::from_str::<Vec<ProviderDescriptor>>(&raw)
				.map_err(|source| ProviderConfigError::Parse { path: display, source })?
		},
		None => default_providers(hosts),
	};

	if providers.is_empty() {
		return Err(ProviderConfigError::Empty);
	}

	log::info!(
		"Loaded {} providers: {}",
		providers.len(),
		providers.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
	);

	Ok(providers)
}
