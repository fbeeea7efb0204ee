// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookup into Bugzilla/GitHub JSON payloads with typed, non-panicking extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper
// invariants:
// - Object keys and numeric array indexes are both valid path segments ("bugs.0.history")
// - Missing paths and explicit nulls both read as absent
// - text() treats empty strings as absent so fallbacks can take over
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A location inside a JSON document, possibly absent.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn value(&self) -> Option<&'a Value> {
    self.inner.filter(|v| !v.is_null())
  }

  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.value().and_then(|v| T::deserialize(v).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Non-empty string at this location.
  pub fn text(&self) -> Option<&'a str> {
    self.value().and_then(Value::as_str).filter(|s| !s.is_empty())
  }

  pub fn array(&self) -> Option<&'a Vec<Value>> {
    self.value().and_then(Value::as_array)
  }
}

pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      let next = match cur {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => cur.get(key),
      };

      match next {
        Some(v) => cur = v,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
