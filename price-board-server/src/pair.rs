//! Conversions between the three spellings of a pair.
//!
//! * display form: `BTC/USDT`
//! * URL form: `BTC_USDT`
//! * provider wire form: `BTCUSDT` (case applied per provider)
//!
//! Every function here is total; the empty string maps to an empty result.

use serde::{Deserialize, Serialize};

use crate::types::AssetPair;

const DISPLAY_SEPARATOR: char = '/';
const URL_SEPARATOR: char = '_';

impl AssetPair {
	pub fn from_display(symbol: &str) -> Self {
		let parts: Vec<&str> = symbol.split(DISPLAY_SEPARATOR).collect();

		match parts.as_slice() {
			[base, quote] if !base.is_empty() && !quote.is_empty() => AssetPair {
				symbol: symbol.to_string(),
				base_asset: base.to_uppercase(),
				quote_asset: quote.to_uppercase(),
			},
			_ => AssetPair {
				symbol: symbol.to_string(),
				base_asset: String::new(),
				quote_asset: String::new(),
			},
		}
	}

	pub fn from_url_form(url_pair: &str) -> Self {
		Self::from_display(&url_form_to_display(url_pair))
	}

	pub fn is_valid(&self) -> bool {
		!self.base_asset.is_empty() && !self.quote_asset.is_empty()
	}
}

/// Replaces the first `/` with `_`.
pub fn display_to_url_form(pair: &str) -> String {
	pair.replacen(DISPLAY_SEPARATOR, &URL_SEPARATOR.to_string(), 1)
}

/// Replaces the first `_` with `/`.
pub fn url_form_to_display(url_pair: &str) -> String {
	url_pair.replacen(URL_SEPARATOR, &DISPLAY_SEPARATOR.to_string(), 1)
}

/// Strips every `/`. Case is left to the caller.
pub fn display_to_provider_symbol(display_symbol: &str) -> String {
	display_symbol.replace(DISPLAY_SEPARATOR, "")
}

/// Upper-cases a search query and drops whitespace and separators so it can be matched
/// against a bare concatenated symbol.
pub fn normalize_search_query(query: &str) -> String {
	query
		.chars()
		.filter(|c| !c.is_whitespace() && *c != DISPLAY_SEPARATOR)
		.flat_map(char::to_uppercase)
		.collect()
}

/// Letter case a provider expects in its wire symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseConvention {
	Upper,
	Lower,
}

impl CaseConvention {
	pub fn apply(self, symbol: &str) -> String {
		match self {
			CaseConvention::Upper => symbol.to_uppercase(),
			CaseConvention::Lower => symbol.to_lowercase(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pair_from_display() {
		let pair = AssetPair::from_display("BTC/USDT");
		assert_eq!(
			pair,
			AssetPair {
				symbol: "BTC/USDT".to_string(),
				base_asset: "BTC".to_string(),
				quote_asset: "USDT".to_string(),
			}
		);
		assert!(pair.is_valid());
	}

	#[test]
	fn test_pair_from_display_uppercases_assets_but_keeps_symbol() {
		let pair = AssetPair::from_display("eth/btc");
		assert_eq!(pair.symbol, "eth/btc");
		assert_eq!(pair.base_asset, "ETH");
		assert_eq!(pair.quote_asset, "BTC");
	}

	#[test]
	fn test_pair_from_malformed_input() {
		for input in ["garbage", "", "/", "BTC/", "/USDT", "A/B/C"] {
			let pair = AssetPair::from_display(input);
			assert_eq!(pair.symbol, input);
			assert_eq!(pair.base_asset, "");
			assert_eq!(pair.quote_asset, "");
			assert!(!pair.is_valid());
		}
	}

	#[test]
	fn test_url_form_round_trip() {
		for pair in ["BTC/USDT", "ETH/BTC", "x/y"] {
			assert_eq!(url_form_to_display(&display_to_url_form(pair)), pair);
		}
		assert_eq!(display_to_url_form("BTC/USDT"), "BTC_USDT");
		assert_eq!(AssetPair::from_url_form("BTC_USDT"), AssetPair::from_display("BTC/USDT"));
	}

	#[test]
	fn test_only_first_separator_is_replaced() {
		assert_eq!(display_to_url_form("A/B/C"), "A_B/C");
		assert_eq!(url_form_to_display("A_B_C"), "A/B_C");
	}

	#[test]
	fn test_provider_symbol() {
		assert_eq!(display_to_provider_symbol("BTC/USDT"), "BTCUSDT");
		assert_eq!(display_to_provider_symbol("A/B/C"), "ABC");
		assert_eq!(display_to_provider_symbol(""), "");
	}

	#[test]
	fn test_empty_input_is_neutral() {
		assert_eq!(display_to_url_form(""), "");
		assert_eq!(url_form_to_display(""), "");
		assert_eq!(normalize_search_query(""), "");
	}

	#[test]
	fn test_case_convention() {
		assert_eq!(CaseConvention::Upper.apply("btcUSDT"), "BTCUSDT");
		assert_eq!(CaseConvention::Lower.apply("BTCUSDT"), "btcusdt");
		let parsed: CaseConvention = serde_json::from_str("\"lower\"").expect("should parse");
		assert_eq!(parsed, CaseConvention::Lower);
	}

	#[test]
	fn test_normalize_search_query() {
		assert_eq!(normalize_search_query(" btc / usdt "), "BTCUSDT");
		assert_eq!(normalize_search_query("eth"), "ETH");
	}
}
