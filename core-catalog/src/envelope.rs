//! Response envelope normalization
//!
//! The backend wraps list responses in several different envelopes depending
//! on the endpoint and its age: a bare array, `{data: [...]}`,
//! `{data: {data: [...], total, totalPages, page, limit}}`, a named
//! collection (`{musics: [...]}`), or a `{success, data}` wrapper around a
//! single object. Instead of duck-typing at every call site, every response
//! goes through [`normalize`], which probes the known shapes in a fixed
//! priority order and degrades to an empty page rather than failing, so a
//! surprising payload renders as an empty state instead of an error.

use serde_json::Value;
use tracing::debug;

/// A list response reduced to its items and pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPage {
    /// Raw item values in server order; deserialized by the caller.
    pub items: Vec<Value>,
    /// Total items across all pages.
    pub total: u64,
    /// Total page count.
    pub total_pages: u32,
    /// Page the server says this is (1-based).
    pub page: u32,
    /// Page size the response was produced with.
    pub limit: u32,
}

impl NormalizedPage {
    /// The empty page used when no known shape matches.
    fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            page: 1,
            limit,
        }
    }
}

/// Extract items and pagination metadata from a response body.
///
/// `limit` is the page size the request was made with; it is used to derive
/// `total_pages` when the server omits pagination. `collections` lists the
/// resource's named collection keys (probed fourth, e.g. `["musics"]`).
///
/// Probe order, first match wins:
/// 1. the body is an array
/// 2. `body.data` is an array
/// 3. `body.data.data` is an array, pagination read from `body.data`
///    (falling back to the top level)
/// 4. a named collection property is an array
/// 5. `body.data` is a lone object, wrapped as one item
/// 6. the body is a lone non-empty object, wrapped as one item
///
/// Anything else produces an empty page. This function never fails.
///
/// # Examples
///
/// ```
/// use core_catalog::envelope::normalize;
/// use serde_json::json;
///
/// let body = json!({"data": {"data": [{"id": 1}, {"id": 2}], "total": 2}});
/// let page = normalize(&body, 10, &[]);
/// assert_eq!(page.items.len(), 2);
/// assert_eq!(page.total_pages, 1);
/// ```
pub fn normalize(body: &Value, limit: u32, collections: &[&str]) -> NormalizedPage {
    let limit = limit.max(1);

    if let Some(items) = body.as_array() {
        return paginate(items.clone(), None, limit);
    }

    if let Some(data) = body.get("data") {
        if let Some(items) = data.as_array() {
            return paginate(items.clone(), Some(body), limit);
        }

        if let Some(items) = data.get("data").and_then(Value::as_array) {
            // Pagination fields sit beside the inner array; older endpoints
            // put them at the top level instead.
            let meta = if has_pagination(data) { data } else { body };
            return paginate(items.clone(), Some(meta), limit);
        }
    }

    for key in collections {
        if let Some(items) = body.get(*key).and_then(Value::as_array) {
            return paginate(items.clone(), Some(body), limit);
        }
    }

    if let Some(data) = body.get("data") {
        if data.is_object() {
            return paginate(vec![data.clone()], None, limit);
        }
    }

    if let Some(object) = body.as_object() {
        if !object.is_empty() {
            return paginate(vec![body.clone()], None, limit);
        }
    }

    debug!("Response matched no known envelope shape, returning empty page");
    NormalizedPage::empty(limit)
}

/// Whether a value carries any of the pagination sibling fields.
fn has_pagination(value: &Value) -> bool {
    ["total", "totalPages", "page", "limit"]
        .iter()
        .any(|key| value.get(key).is_some())
}

/// Assemble the page, deriving whatever metadata the server omitted.
fn paginate(items: Vec<Value>, meta: Option<&Value>, limit: u32) -> NormalizedPage {
    let read = |key: &str| meta.and_then(|m| m.get(key)).and_then(Value::as_u64);

    let limit = read("limit").map(|l| l as u32).unwrap_or(limit).max(1);
    let total = read("total").unwrap_or(items.len() as u64);
    let total_pages = read("totalPages")
        .map(|t| t as u32)
        .unwrap_or_else(|| total.div_ceil(limit as u64) as u32);
    let page = read("page").map(|p| p as u32).unwrap_or(1);

    NormalizedPage {
        items,
        total,
        total_pages,
        page,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let page = normalize(&json!([{"id": 1}, {"id": 2}, {"id": 3}]), 10, &[]);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_data_array() {
        let page = normalize(&json!({"data": [{"id": 1}]}), 10, &[]);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_nested_data_with_pagination() {
        let body = json!({
            "data": {
                "data": [{"id": 1}, {"id": 2}],
                "total": 25,
                "totalPages": 3,
                "page": 2,
                "limit": 10
            }
        });
        let page = normalize(&body, 99, &[]);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn test_nested_data_derives_total_pages() {
        let body = json!({"data": {"data": [{"id": 1}, {"id": 2}], "total": 2}});
        let page = normalize(&body, 10, &[]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_nested_data_top_level_pagination() {
        let body = json!({
            "data": {"data": [{"id": 1}]},
            "total": 12,
            "totalPages": 2
        });
        let page = normalize(&body, 10, &[]);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_named_collection() {
        let body = json!({"success": true, "musics": [{"id": 1}, {"id": 2}]});
        let page = normalize(&body, 10, &["musics"]);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_wrapped_single_object() {
        let body = json!({"success": true, "data": {"_id": "c-1", "name": "Jazz"}});
        let page = normalize(&body, 10, &["categories"]);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["name"], "Jazz");
    }

    #[test]
    fn test_lone_object() {
        let body = json!({"_id": "c-1", "name": "Jazz"});
        let page = normalize(&body, 10, &[]);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_unrecognized_shapes_degrade_to_empty() {
        for body in [json!(null), json!("nope"), json!(42), json!({})] {
            let page = normalize(&body, 10, &[]);
            assert!(page.items.is_empty());
            assert_eq!(page.total, 0);
            assert_eq!(page.total_pages, 0);
        }
    }

    #[test]
    fn test_derived_total_pages_rounds_up() {
        let items: Vec<Value> = (0..25).map(|i| json!({"id": i})).collect();
        let page = normalize(&Value::Array(items), 10, &[]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_zero_limit_guarded() {
        let page = normalize(&json!([{"id": 1}]), 0, &[]);
        assert_eq!(page.limit, 1);
        assert_eq!(page.total_pages, 1);
    }
}
