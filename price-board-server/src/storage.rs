use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::state::{reduce, Action, BoardState};

#[derive(Debug, Default)]
pub struct BoardStorage {
	state: ArcSwap<BoardState>,
}

impl BoardStorage {
	pub fn new(initial: BoardState) -> Self {
		Self { state: ArcSwap::from_pointee(initial) }
	}

	pub fn snapshot(&self) -> Arc<BoardState> {
		self.state.load_full()
	}

	/// Applies `action` and publishes the new state in one swap. Returns the state that
	/// was published.
	pub fn dispatch(&self, action: Action) -> Arc<BoardState> {
		let mut published = None;
		self.state.rcu(|current| {
			let next = Arc::new(reduce(current, action.clone()));
			published = Some(Arc::clone(&next));
			next
		});

		published.unwrap_or_else(|| self.snapshot())
	}
}
