use chrono::Utc;
use log::{error, info};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::api::PriceBoardApi;
use crate::state::Action;
use crate::storage::BoardStorage;
use crate::types::AssetPair;

/// Owns the polling task of the selected pair.
///
/// Selecting another pair aborts the running task, which also drops its in-flight
/// requests, and starts a new one. Dropping the poller stops polling.
pub struct PricePoller {
	storage: Arc<BoardStorage>,
	api: PriceBoardApi,
	update_interval: Duration,
	task: Mutex<Option<JoinHandle<()>>>,
}

impl PricePoller {
	pub fn new(storage: Arc<BoardStorage>, api: PriceBoardApi, update_interval: Duration) -> Self {
		Self { storage, api, update_interval, task: Mutex::new(None) }
	}

	/// Switches polling to `pair`. Returns `false` when `pair` was already being polled.
	pub fn select_pair(&self, pair: AssetPair) -> bool {
		let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);

		let previous = self.storage.snapshot();
		let state = self.storage.dispatch(Action::SelectPair(pair));
		let changed = state.generation != previous.generation;

		if !changed && task.as_ref().map_or(false, |handle| !handle.is_finished()) {
			return false;
		}

		if let Some(handle) = task.take() {
			handle.abort();
		}

		info!("Polling {} every {:?}", state.current_pair.symbol, self.update_interval);
		*task = Some(run_update_prices_loop(
			Arc::clone(&self.storage),
			self.api.clone(),
			state.current_pair.clone(),
			state.generation,
			self.update_interval,
		));

		true
	}

	pub fn stop(&self) {
		if let Some(handle) = self.task.lock().unwrap_or_else(PoisonError::into_inner).take() {
			handle.abort();
			info!("Polling stopped");
		}
	}
}

impl Drop for PricePoller {
	fn drop(&mut self) {
		self.stop();
	}
}

pub fn run_update_prices_loop(
	storage: Arc<BoardStorage>,
	api: PriceBoardApi,
	pair: AssetPair,
	generation: u64,
	update_interval: Duration,
) -> JoinHandle<()> {
	tokio::spawn(async move {
		loop {
			let time_elapsed = std::time::Instant::now();

			update_prices(&storage, &api, &pair, generation).await;

			tokio::time::sleep(update_interval.saturating_sub(time_elapsed.elapsed())).await;
		}
	})
}

/// Runs one poll cycle for `pair` and publishes its rows.
pub async fn update_prices(
	storage: &BoardStorage,
	api: &PriceBoardApi,
	pair: &AssetPair,
	generation: u64,
) {
	storage.dispatch(Action::CycleStarted { generation });

	let quotes = api.get_quotations(pair).await;
	let available = quotes.iter().filter(|quote| quote.price.is_some()).count();
	if available == 0 {
		error!("No provider returned a price for {}", pair.symbol);
	}

	storage.dispatch(Action::QuotesReceived { generation, quotes, at: Utc::now().timestamp_millis() });
	info!("Prices updated for {} ({}/{} available)", pair.symbol, available, api.providers().len());
}
