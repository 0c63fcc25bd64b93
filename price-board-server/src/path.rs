//! Best-effort lookups into provider JSON bodies.
//!
//! A path expression is a dotted list of segments where `[n]` is accepted as an
//! alternative spelling, so `result[0].a[0]` and `result.0.a.0` are the same path.
//!
//! Each segment first selects an own key (or array index) by name. When an object has
//! no such key and the segment is numeric, it selects the value at that position in the
//! object's key order instead. This lets one expression address providers that key a
//! payload by an unpredictable name, e.g. Kraken's `{"result": {"XXBTZUSDT": {...}}}`.
//!
//! Lookups never fail loudly: anything that does not resolve is `None`.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Segment {
	name: String,
	index: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathExpr {
	segments: Vec<Segment>,
}

impl PathExpr {
	pub fn parse(expr: &str) -> Self {
		let segments = expr
			.split(|c: char| c == '.' || c == '[' || c == ']')
			.filter(|token| !token.is_empty())
			.map(|token| Segment { name: token.to_string(), index: parse_index(token) })
			.collect();

		PathExpr { segments }
	}

	pub fn evaluate<'a>(&self, root: &'a Value) -> Option<&'a Value> {
		let found = self.segments.iter().try_fold(root, |acc, segment| step(acc, segment))?;

		match found {
			Value::Null => None,
			value => Some(value),
		}
	}
}

/// Only canonical decimal spellings count as positions: no sign, no leading zero.
fn parse_index(token: &str) -> Option<usize> {
	let canonical = token.bytes().all(|b| b.is_ascii_digit()) && (token == "0" || !token.starts_with('0'));
	if canonical {
		token.parse().ok()
	} else {
		None
	}
}

fn step<'a>(acc: &'a Value, segment: &Segment) -> Option<&'a Value> {
	match acc {
		Value::Object(map) => map
			.get(&segment.name)
			.or_else(|| segment.index.and_then(|position| map.values().nth(position))),
		Value::Array(items) => segment.index.and_then(|position| items.get(position)),
		_ => None,
	}
}

pub fn resolve<'a>(root: &'a Value, expr: &str) -> Option<&'a Value> {
	PathExpr::parse(expr).evaluate(root)
}

/// Resolves `expr` and renders the value as text: strings verbatim, numbers and booleans
/// as their JSON spelling. Objects and arrays are not scalars and yield `None`.
pub fn resolve_scalar(root: &Value, expr: &str) -> Option<String> {
	resolve(root, expr).and_then(scalar_to_string)
}

pub fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_resolves_nested_key() {
		let body = json!({ "tick": { "ask": [27123.45, 0.5], "bid": [27123.4, 1.2] } });
		assert_eq!(resolve(&body, "tick.ask.0"), Some(&json!(27123.45)));
		assert_eq!(resolve(&body, "tick.ask.[0]"), Some(&json!(27123.45)));
		assert_eq!(resolve(&body, "tick.bid[1]"), Some(&json!(1.2)));
	}

	#[test]
	fn test_missing_key_at_any_depth_is_none() {
		let body = json!({ "a": { "b": { "c": 1 } } });
		assert_eq!(resolve(&body, "x"), None);
		assert_eq!(resolve(&body, "a.x"), None);
		assert_eq!(resolve(&body, "a.b.x"), None);
		assert_eq!(resolve(&body, "a.b.c.d"), None);
		assert_eq!(resolve(&body, "a.b.c[3]"), None);
	}

	#[test]
	fn test_positional_fallback_on_name_miss() {
		let body = json!({ "a": { "x": 1, "y": 2 } });
		assert_eq!(resolve(&body, "a.1"), Some(&json!(2)));
		assert_eq!(resolve(&body, "a.0"), Some(&json!(1)));
		assert_eq!(resolve(&body, "a.2"), None);
	}

	#[test]
	fn test_positional_fallback_follows_document_order() {
		let body: Value =
			serde_json::from_str(r#"{"z": "first", "a": "second"}"#).expect("valid JSON");
		assert_eq!(resolve(&body, "0"), Some(&json!("first")));
		assert_eq!(resolve(&body, "1"), Some(&json!("second")));
	}

	#[test]
	fn test_non_canonical_numbers_are_not_positions() {
		let body = json!({ "a": { "x": 1, "y": 2 }, "list": ["p", "q"] });
		assert_eq!(resolve(&body, "a.+1"), None);
		assert_eq!(resolve(&body, "a.01"), None);
		assert_eq!(resolve(&body, "list.01"), None);
		assert_eq!(resolve(&body, "list[+1]"), None);
		assert_eq!(resolve(&body, "list[1]"), Some(&json!("q")));
		assert_eq!(resolve(&body, "list[0]"), Some(&json!("p")));
	}

	#[test]
	fn test_numeric_key_by_name_wins_over_position() {
		let body = json!({ "a": { "x": "by-position", "0": "by-name" } });
		assert_eq!(resolve(&body, "a.0"), Some(&json!("by-name")));
	}

	#[test]
	fn test_bracket_and_dot_spellings_are_equivalent() {
		let body = json!({ "result": [{ "a": ["27130.10", "1", "1"] }] });
		assert_eq!(PathExpr::parse("result[0].a[0]"), PathExpr::parse("result.0.a.0"));
		assert_eq!(resolve(&body, "result[0].a[0]"), resolve(&body, "result.0.a.0"));
		assert_eq!(resolve(&body, "result[0].a[0]"), Some(&json!("27130.10")));
	}

	#[test]
	fn test_empty_segments_are_discarded() {
		let body = json!({ "a": { "b": 7 } });
		assert_eq!(resolve(&body, "..a...b."), Some(&json!(7)));
		assert_eq!(PathExpr::parse("..."), PathExpr::default());
		assert_eq!(resolve(&body, ""), Some(&body));
	}

	#[test]
	fn test_scalars_and_null_do_not_descend() {
		let body = json!({ "s": "text", "n": null, "b": true });
		assert_eq!(resolve(&body, "s.0"), None);
		assert_eq!(resolve(&body, "n"), None);
		assert_eq!(resolve(&body, "n.x"), None);
		assert_eq!(resolve(&body, "b"), Some(&json!(true)));
		assert_eq!(resolve(&Value::Null, "a"), None);
	}

	#[test]
	fn test_falsy_values_are_found() {
		let body = json!({ "isBuyerMaker": false, "qty": 0 });
		assert_eq!(resolve(&body, "isBuyerMaker"), Some(&json!(false)));
		assert_eq!(resolve(&body, "qty"), Some(&json!(0)));
	}

	#[test]
	fn test_array_root_with_name_segment_is_none() {
		let body = json!(["a", "b"]);
		assert_eq!(resolve(&body, "1"), Some(&json!("b")));
		assert_eq!(resolve(&body, "price"), None);
	}

	#[test]
	fn test_binance_and_kraken_price_shapes() {
		let binance = json!({ "symbol": "BTCUSDT", "price": "27123.45" });
		assert_eq!(resolve_scalar(&binance, "price"), Some("27123.45".to_string()));

		let kraken = json!({ "result": [{ "a": ["27130.10", "1", "1"] }] });
		assert_eq!(resolve_scalar(&kraken, "result[0].a[0]"), Some("27130.10".to_string()));

		let kraken_keyed = json!({
			"error": [],
			"result": { "XBTUSDT": { "a": ["27130.10", "1", "1.000"], "b": ["27130.00", "2", "2.000"] } }
		});
		assert_eq!(
			resolve_scalar(&kraken_keyed, "result[0].a[0]"),
			Some("27130.10".to_string())
		);
	}

	#[test]
	fn test_resolve_scalar_rejects_containers() {
		let body = json!({ "a": { "b": [1, 2] }, "n": 12.5 });
		assert_eq!(resolve_scalar(&body, "a"), None);
		assert_eq!(resolve_scalar(&body, "a.b"), None);
		assert_eq!(resolve_scalar(&body, "n"), Some("12.5".to_string()));
	}
}
