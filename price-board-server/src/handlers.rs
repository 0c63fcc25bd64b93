use actix_web::http::{header, StatusCode};
use actix_web::{delete, get, web, HttpResponse, Responder, ResponseError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

use crate::api::PriceBoardApi;
use crate::price_updater::PricePoller;
use crate::state::{Action, BoardState};
use crate::storage::BoardStorage;
use crate::types::{AssetPair, NormalizedQuote, NormalizedTrade};

/// Everything the HTTP handlers share.
pub struct BoardContext {
	pub storage: Arc<BoardStorage>,
	pub poller: PricePoller,
	pub api: PriceBoardApi,
	pub trade_limit: u32,
}

#[derive(Debug, Error)]
pub enum BoardError {
	#[error("Invalid pair '{0}', expected <base>_<quote>")]
	InvalidPair(String),

	#[error("Unknown exchange '{0}'")]
	UnknownExchange(String),
}

impl ResponseError for BoardError {
	fn status_code(&self) -> StatusCode {
		match self {
			BoardError::InvalidPair(_) => StatusCode::BAD_REQUEST,
			BoardError::UnknownExchange(_) => StatusCode::NOT_FOUND,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
	}
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSort {
	PriceAsc,
	PriceDesc,
}

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
	sort: Option<QuoteSort>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
	#[serde(default)]
	query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesView {
	pub exchange: SmolStr,
	pub pair: AssetPair,
	pub trades: Vec<NormalizedTrade>,
}

/// Rows without a usable price always go last.
fn sort_quotes(quotes: &mut [NormalizedQuote], sort: QuoteSort) {
	let key = |quote: &NormalizedQuote| -> Option<Decimal> { quote.price_decimal() };

	quotes.sort_by(|a, b| match (key(a), key(b)) {
		(Some(x), Some(y)) => match sort {
			QuoteSort::PriceAsc => x.cmp(&y),
			QuoteSort::PriceDesc => y.cmp(&x),
		},
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	});
}

fn board_response(state: &BoardState, sort: Option<QuoteSort>) -> HttpResponse {
	match sort {
		Some(sort) => {
			let mut state = state.clone();
			sort_quotes(&mut state.quotes, sort);
			HttpResponse::Ok().json(state)
		},
		None => HttpResponse::Ok().json(state),
	}
}

fn parse_url_pair(url_pair: &str) -> Result<AssetPair, BoardError> {
	let pair = AssetPair::from_url_form(url_pair);
	if !pair.is_valid() {
		return Err(BoardError::InvalidPair(url_pair.to_string()));
	}
	Ok(pair)
}

#[get("/price")]
pub async fn price_board(
	context: web::Data<BoardContext>,
	query: web::Query<BoardQuery>,
) -> impl Responder {
	board_response(&context.storage.snapshot(), query.sort)
}

#[get("/price/{pair}")]
pub async fn price_board_for_pair(
	context: web::Data<BoardContext>,
	path: web::Path<String>,
	query: web::Query<BoardQuery>,
) -> Result<HttpResponse, BoardError> {
	let pair = parse_url_pair(&path.into_inner())?;

	context.poller.select_pair(pair);

	Ok(board_response(&context.storage.snapshot(), query.sort))
}

#[get("/price/{pair}/{exchange}/details")]
pub async fn exchange_details(
	context: web::Data<BoardContext>,
	path: web::Path<(String, String)>,
) -> Result<HttpResponse, BoardError> {
	let (url_pair, exchange) = path.into_inner();
	let pair = parse_url_pair(&url_pair)?;
	let provider = context
		.api
		.find_provider(&exchange)
		.ok_or_else(|| BoardError::UnknownExchange(exchange.clone()))?;

	context.poller.select_pair(pair.clone());
	context.storage.dispatch(Action::OpenDetails(provider.name.clone()));

	let trades = match context.api.get_trades(provider, &pair, context.trade_limit).await {
		Ok(trades) => {
			log::info!("Fetched {} trades for {} from {}", trades.len(), pair.symbol, provider.name);
			trades
		},
		Err(err) => {
			log::warn!("Could not fetch trades for {} from {}: {}", pair.symbol, provider.name, err);
			Vec::new()
		},
	};

	Ok(HttpResponse::Ok().json(TradesView { exchange: provider.name.clone(), pair, trades }))
}

#[delete("/price/{pair}/{exchange}/details")]
pub async fn close_exchange_details(
	context: web::Data<BoardContext>,
	path: web::Path<(String, String)>,
) -> impl Responder {
	let (url_pair, _exchange) = path.into_inner();
	context.storage.dispatch(Action::CloseDetails);

	HttpResponse::SeeOther()
		.insert_header((header::LOCATION, format!("/price/{}", url_pair)))
		.finish()
}

#[get("/pairs")]
pub async fn search_pairs(
	context: web::Data<BoardContext>,
	query: web::Query<SearchQuery>,
) -> impl Responder {
	let query = query.into_inner().query;
	let state = context.storage.dispatch(Action::SetSearchQuery(query.clone()));

	HttpResponse::Ok().json(state.search(&query))
}

#[get("/providers")]
pub async fn providers(context: web::Data<BoardContext>) -> impl Responder {
	HttpResponse::Ok().json(context.api.providers())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(price_board)
		.service(price_board_for_pair)
		.service(exchange_details)
		.service(close_exchange_details)
		.service(search_pairs)
		.service(providers);
}
