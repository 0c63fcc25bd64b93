//! Board state and the single function allowed to change it.
//!
//! Every change goes through [`reduce`], which returns a new state instead of mutating the
//! old one. [`crate::storage::BoardStorage`] swaps the result in atomically.

use serde::Serialize;
use smol_str::SmolStr;
use std::sync::Arc;

use crate::pair::normalize_search_query;
use crate::types::{AssetPair, NormalizedQuote};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
	pub current_pair: AssetPair,
	/// Bumped on every pair change. Poll results carry the generation they were started
	/// for so late answers for a previous pair can be recognised.
	pub generation: u64,
	pub quotes: Vec<NormalizedQuote>,
	pub is_loading: bool,
	/// Provider whose recent trades are shown in the details view.
	pub exchange: Option<SmolStr>,
	pub is_modal_open: bool,
	pub search_query: String,
	#[serde(skip)]
	pub asset_pairs: Arc<Vec<AssetPair>>,
	pub is_selected_existing: bool,
	/// Epoch milliseconds of the last applied poll cycle.
	pub last_update_timestamp: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum Action {
	SetAssetPairs(Arc<Vec<AssetPair>>),
	SelectPair(AssetPair),
	CycleStarted { generation: u64 },
	QuotesReceived { generation: u64, quotes: Vec<NormalizedQuote>, at: i64 },
	OpenDetails(SmolStr),
	CloseDetails,
	SetSearchQuery(String),
}

impl BoardState {
	pub fn with_pair(pair: AssetPair) -> Self {
		BoardState { current_pair: pair, is_loading: true, ..Default::default() }
	}

	/// Known pairs whose bare symbol contains the normalized query. An empty query matches
	/// nothing.
	pub fn search(&self, query: &str) -> Vec<AssetPair> {
		let query = normalize_search_query(query);
		if query.is_empty() {
			return Vec::new();
		}

		self.asset_pairs
			.iter()
			.filter(|pair| format!("{}{}", pair.base_asset, pair.quote_asset).contains(&query))
			.cloned()
			.collect()
	}

	fn is_listed(&self, pair: &AssetPair) -> bool {
		self.asset_pairs.iter().any(|known| known.symbol == pair.symbol.to_uppercase())
	}
}

pub fn reduce(state: &BoardState, action: Action) -> BoardState {
	let mut next = state.clone();

	match action {
		Action::SetAssetPairs(pairs) => {
			next.asset_pairs = pairs;
			next.is_selected_existing = next.is_listed(&next.current_pair);
		},
		Action::SelectPair(pair) => {
			if pair.base_asset == state.current_pair.base_asset
				&& pair.quote_asset == state.current_pair.quote_asset
			{
				return next;
			}
			next.is_selected_existing = next.is_listed(&pair);
			next.current_pair = pair;
			next.generation = state.generation.wrapping_add(1);
			next.quotes = Vec::new();
			next.is_loading = true;
			next.last_update_timestamp = None;
		},
		Action::CycleStarted { generation } => {
			if generation == state.generation {
				next.is_loading = true;
			}
		},
		Action::QuotesReceived { generation, quotes, at } => {
			if generation != state.generation {
				log::debug!(
					"Discarding quotes of generation {} (current is {})",
					generation,
					state.generation
				);
				return next;
			}
			next.quotes = quotes;
			next.is_loading = false;
			next.last_update_timestamp = Some(at);
		},
		Action::OpenDetails(exchange) => {
			next.exchange = Some(exchange);
			next.is_modal_open = true;
		},
		Action::CloseDetails => {
			next.is_modal_open = false;
		},
		Action::SetSearchQuery(query) => {
			next.search_query = query;
		},
	}

	next
}
