use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(name = "price-board-server")]
pub struct PriceBoardArgs {
	/// Milliseconds between two poll cycles, at least 1
	#[clap(short = 'i', long, default_value = "5000", value_parser = clap::value_parser!(u64).range(1..))]
	pub update_interval_millis: u64,

	/// Pair to poll at startup, in display form <base>/<quote>
	#[clap(short, long, default_value = "BTC/USDT")]
	pub default_pair: String,

	/// Number of recent trades requested for the details view
	#[clap(short, long, default_value = "10")]
	pub trade_limit: u32,

	/// The port to run the server on
	#[clap(short, long, default_value = "8070")]
	pub port: u16,

	/// JSON file with the provider table. The built-in table is used when absent.
	#[clap(long, env = "PROVIDERS_FILE", value_parser)]
	pub providers_file: Option<PathBuf>,

	#[clap(flatten)]
	pub hosts: ProviderHosts,
}

/// Base URLs of the built-in providers.
#[derive(Parser, Debug, Clone)]
pub struct ProviderHosts {
	#[clap(long, env = "BINANCE_URL", default_value = "https://www.binance.com/api/v3/")]
	pub binance_url: String,

	#[clap(long, env = "BITFINEX_URL", default_value = "https://api.bitfinex.com/v1/")]
	pub bitfinex_url: String,

	#[clap(long, env = "HUOBI_URL", default_value = "https://api.huobi.pro/")]
	pub huobi_url: String,

	#[clap(long, env = "KRAKEN_URL", default_value = "https://api.kraken.com/0/public/")]
	pub kraken_url: String,
}

impl Default for ProviderHosts {
	fn default() -> Self {
		Self {
			binance_url: "https://www.binance.com/api/v3/".to_string(),
			bitfinex_url: "https://api.bitfinex.com/v1/".to_string(),
			huobi_url: "https://api.huobi.pro/".to_string(),
			kraken_url: "https://api.kraken.com/0/public/".to_string(),
		}
	}
}
