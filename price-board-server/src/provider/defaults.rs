use serde_json::json;

use super::{
	PairListEndpoint, PriceEndpoint, ProviderDescriptor, SideIndicator, TimeUnit, TradeFields,
	TradesEndpoint,
};
use crate::args::ProviderHosts;
use crate::pair::CaseConvention;

/// The built-in provider table. Only the base URLs are configurable.
pub fn default_providers(hosts: &ProviderHosts) -> Vec<ProviderDescriptor> {
	vec![
		ProviderDescriptor {
			id: "binance".into(),
			name: "Binance".into(),
			base_url: hosts.binance_url.clone(),
			price: PriceEndpoint {
				path: "ticker/price?symbol=".to_string(),
				case: CaseConvention::Upper,
				price_field: "price".to_string(),
			},
			trades: TradesEndpoint {
				path: "trades?symbol={symbol}&limit={limit}".to_string(),
				case: CaseConvention::Upper,
				list_path: None,
				fields: TradeFields {
					id: "id".to_string(),
					price: "price".to_string(),
					amount: "qty".to_string(),
					time: "time".to_string(),
					time_unit: TimeUnit::Milliseconds,
					side: SideIndicator { field: "isBuyerMaker".to_string(), expected: json!(true) },
				},
			},
			pairs: Some(PairListEndpoint {
				path: "exchangeInfo".to_string(),
				list_path: "symbols".to_string(),
				base_field: "baseAsset".to_string(),
				quote_field: "quoteAsset".to_string(),
			}),
		},
		ProviderDescriptor {
			id: "bitfinex".into(),
			name: "Bitfinex".into(),
			base_url: hosts.bitfinex_url.clone(),
			price: PriceEndpoint {
				path: "pubticker/".to_string(),
				case: CaseConvention::Upper,
				price_field: "last_price".to_string(),
			},
			trades: TradesEndpoint {
				path: "trades/{symbol}?limit_trades={limit}".to_string(),
				case: CaseConvention::Upper,
				list_path: None,
				fields: TradeFields {
					id: "tid".to_string(),
					price: "price".to_string(),
					amount: "amount".to_string(),
					time: "timestamp".to_string(),
					time_unit: TimeUnit::Seconds,
					side: SideIndicator { field: "type".to_string(), expected: json!("buy") },
				},
			},
			pairs: None,
		},
		ProviderDescriptor {
			id: "huobi".into(),
			name: "Huobi".into(),
			base_url: hosts.huobi_url.clone(),
			price: PriceEndpoint {
				path: "market/detail/merged?symbol=".to_string(),
				case: CaseConvention::Lower,
				price_field: "tick.ask.[0]".to_string(),
			},
			trades: TradesEndpoint {
				path: "market/history/trade?symbol={symbol}&size={limit}".to_string(),
				case: CaseConvention::Lower,
				list_path: Some("data".to_string()),
				fields: TradeFields {
					id: "id".to_string(),
					price: "data[0].price".to_string(),
					amount: "data[0].amount".to_string(),
					time: "ts".to_string(),
					time_unit: TimeUnit::Milliseconds,
					side: SideIndicator { field: "data[0].direction".to_string(), expected: json!("buy") },
				},
			},
			pairs: None,
		},
		ProviderDescriptor {
			id: "kraken".into(),
			name: "Kraken".into(),
			base_url: hosts.kraken_url.clone(),
			price: PriceEndpoint {
				path: "Ticker?pair=".to_string(),
				case: CaseConvention::Upper,
				price_field: "result[0].a[0]".to_string(),
			},
			trades: TradesEndpoint {
				// No limit parameter here, the list is cut after mapping.
				path: "Trades?pair={symbol}".to_string(),
				case: CaseConvention::Upper,
				list_path: Some("result[0]".to_string()),
				fields: TradeFields {
					id: "id".to_string(),
					price: "[0]".to_string(),
					amount: "[1]".to_string(),
					time: "[2]".to_string(),
					time_unit: TimeUnit::Seconds,
					side: SideIndicator { field: "[3]".to_string(), expected: json!("b") },
				},
			},
			pairs: None,
		},
	]
}
