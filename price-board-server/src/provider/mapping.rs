//! Maps raw provider bodies onto the normalized quote, trade and pair models.

use serde_json::Value;
use std::collections::BTreeSet;

use super::{PairListEndpoint, ProviderDescriptor, TradeFields};
use crate::path::{resolve, resolve_scalar, scalar_to_string};
use crate::types::{AssetPair, NormalizedTrade};

/// `None` means the provider does not list the pair.
pub fn map_price(provider: &ProviderDescriptor, body: &Value) -> Option<String> {
	resolve_scalar(body, &provider.price.price_field)
}

pub fn map_trades(provider: &ProviderDescriptor, body: &Value) -> Vec<NormalizedTrade> {
	let records = match (body, provider.trades.list_path.as_deref()) {
		(Value::Array(records), _) => records,
		(_, Some(list_path)) => match resolve(body, list_path) {
			Some(Value::Array(records)) => records,
			_ => return Vec::new(),
		},
		_ => return Vec::new(),
	};

	records
		.iter()
		.enumerate()
		.map(|(index, record)| map_trade(&provider.trades.fields, index, record))
		.collect()
}

fn map_trade(fields: &TradeFields, index: usize, record: &Value) -> NormalizedTrade {
	let id = resolve_scalar(record, &fields.id).unwrap_or_else(|| index.to_string());
	let time = resolve(record, &fields.time).and_then(as_f64).map(|t| fields.time_unit.to_millis(t));
	let is_buyer_maker = resolve(record, &fields.side.field) == Some(&fields.side.expected);

	NormalizedTrade {
		id,
		price: resolve_scalar(record, &fields.price),
		amount: resolve_scalar(record, &fields.amount),
		time,
		is_buyer_maker,
	}
}

fn as_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

/// Reads a pair listing. Entries missing either asset are skipped; duplicates collapse.
pub fn map_asset_pairs(endpoint: &PairListEndpoint, body: &Value) -> Vec<AssetPair> {
	let Some(Value::Array(entries)) = resolve(body, &endpoint.list_path) else {
		return Vec::new();
	};

	entries
		.iter()
		.filter_map(|entry| {
			let base = resolve(entry, &endpoint.base_field).and_then(scalar_to_string)?;
			let quote = resolve(entry, &endpoint.quote_field).and_then(scalar_to_string)?;
			let pair = AssetPair::from_display(&format!("{}/{}", base, quote).to_uppercase());
			pair.is_valid().then_some(pair)
		})
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}
