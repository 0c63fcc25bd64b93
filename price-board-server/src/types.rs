use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::str::FromStr;

/// A two-asset trading pair in its display form, e.g. `BTC/USDT`.
///
/// `symbol` always keeps the raw input. `base_asset` and `quote_asset` are only filled
/// when the input splits into exactly two non-empty parts; otherwise both are empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct AssetPair {
	pub symbol: String,
	pub base_asset: String,
	pub quote_asset: String,
}

/// One row of the price board: the price one provider reported for the selected pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuote {
	pub key: SmolStr,
	pub name: SmolStr,
	/// `None` when the provider does not list the pair or the request failed.
	pub price: Option<String>,
	pub symbol: String,
}

impl NormalizedQuote {
	pub fn price_decimal(&self) -> Option<Decimal> {
		let price = self.price.as_deref()?;
		Decimal::from_str(price).or_else(|_| Decimal::from_scientific(price)).ok()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrade {
	pub id: String,
	pub price: Option<String>,
	pub amount: Option<String>,
	/// Epoch milliseconds.
	pub time: Option<i64>,
	pub is_buyer_maker: bool,
}
