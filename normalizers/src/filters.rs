use shared_types::{FilterParam, FilterValue};

/// Flattens a user-supplied filter into the list the search API expects.
///
/// Text is split on commas; lists are flattened one level. Blank entries are
/// dropped and an empty result is `None` so the filter can be left out of the
/// request entirely.
pub fn flatten_filter(param: &FilterParam) -> Option<Vec<String>> {
    let values: Vec<String> = match param {
        FilterParam::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        FilterParam::List(items) => items
            .iter()
            .flat_map(|item| match item {
                FilterValue::One(value) => std::slice::from_ref(value),
                FilterValue::Many(values) => values.as_slice(),
            })
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .collect(),
    };

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
