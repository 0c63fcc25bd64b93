use crate::api::{HttpExchangeClient, PriceBoardApi};
use crate::args::PriceBoardArgs;
use crate::handlers::BoardContext;
use crate::price_updater::PricePoller;
use crate::state::{Action, BoardState};
use crate::storage::BoardStorage;
use crate::types::AssetPair;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod args;
mod handlers;
mod pair;
mod path;
mod price_updater;
mod provider;
mod state;
mod storage;
mod types;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
	dotenv::dotenv().ok();
	pretty_env_logger::init();

	let args: PriceBoardArgs = PriceBoardArgs::parse();

	let default_pair = AssetPair::from_display(&args.default_pair);
	if !default_pair.is_valid() {
		error!("Invalid default pair '{}': it needs to have the form <base>/<quote>", args.default_pair);
		return Ok(());
	}

	let providers = provider::load_providers(args.providers_file.as_deref(), &args.hosts)?;
	let api = PriceBoardApi::new(Arc::new(HttpExchangeClient::new()), providers);

	let storage = Arc::new(BoardStorage::new(BoardState::with_pair(default_pair.clone())));
	let poller = PricePoller::new(
		Arc::clone(&storage),
		api.clone(),
		Duration::from_millis(args.update_interval_millis),
	);
	poller.select_pair(default_pair);

	{
		let storage = Arc::clone(&storage);
		let api = api.clone();
		tokio::spawn(async move {
			let pairs = api.get_asset_pairs().await;
			info!("Loaded {} asset pairs", pairs.len());
			storage.dispatch(Action::SetAssetPairs(Arc::new(pairs)));
		});
	}

	let context =
		web::Data::new(BoardContext { storage, poller, api, trade_limit: args.trade_limit });

	info!("Running price-board-server on port {}... (Press CTRL+C to quit)", args.port);
	HttpServer::new({
		let context = context.clone();
		move || App::new().app_data(context.clone()).configure(handlers::configure)
	})
	.bind(("0.0.0.0", args.port))?
	.run()
	.await?;

	context.poller.stop();

	Ok(())
}
