//! Sort links for listing tables
//!
//! Listing pages carry their sort state in the query string
//! (`sort_by`, `sort_order`, `page`). These helpers compute the link a
//! column header or the reset button should follow.

use url::form_urlencoded;

pub const SORT_BY: &str = "sort_by";
pub const SORT_ORDER: &str = "sort_order";
pub const PAGE: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Read an order from the query string; anything but `desc` counts as ascending
    fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Link for clicking the header of `column`
///
/// Clicking the current sort column flips its order; any other column
/// starts descending. Paging goes back to the first page.
pub fn sort_url(current_query: &str, column: &str) -> String {
    let mut params = QueryParams::parse(current_query);

    let order = match (params.get(SORT_BY), params.get(SORT_ORDER)) {
        (Some(current), order) if current == column => order
            .filter(|value| !value.is_empty())
            .map(SortOrder::parse)
            .unwrap_or(SortOrder::Desc)
            .toggled(),
        _ => SortOrder::Desc,
    };

    params.set(SORT_BY, column);
    params.set(SORT_ORDER, order.as_str());
    params.set(PAGE, "1");

    format!("?{}", params.encode())
}

/// Link for the reset button: drop the sort, back to the first page
///
/// Falls back to the bare `path` when no parameters are left.
pub fn reset_sort_url(current_query: &str, path: &str) -> String {
    let mut params = QueryParams::parse(current_query);

    params.remove(SORT_BY);
    params.remove(SORT_ORDER);
    params.set(PAGE, "1");

    let encoded = params.encode();
    if encoded.is_empty() {
        path.to_string()
    } else {
        format!("?{}", encoded)
    }
}

/// Ordered query parameters with form-urlencoded round-tripping
#[derive(Debug, Default)]
pub(crate) struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub(crate) fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` in place and drop the rest, or append it
    pub(crate) fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub(crate) fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod sorting_tests;
