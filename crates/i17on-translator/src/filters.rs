/*
 * filters.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Built-in aggregation filters.
//!
//! A filter receives its directive parameters and the expanded bodies of every
//! matching clause, in source order, and folds them into one string. Filters
//! are only invoked with at least one item.

use crate::error::{TranslateError, TranslateResult};

/// Signature shared by all built-in filters.
pub type FilterFn = fn(&[String], Vec<String>) -> TranslateResult<String>;

/// Look up a built-in filter by name.
pub fn lookup(name: &str) -> Option<FilterFn> {
    match name {
        "list" => Some(filter_list as FilterFn),
        "join" => Some(filter_join as FilterFn),
        _ => None,
    }
}

/// Apply the named filter.
///
/// # Errors
/// [`TranslateError::UnknownFilter`] when no filter has that name, plus
/// whatever the filter itself reports.
pub fn apply(name: &str, params: &[String], items: Vec<String>) -> TranslateResult<String> {
    let filter = lookup(name).ok_or_else(|| TranslateError::UnknownFilter {
        name: name.to_string(),
    })?;
    filter(params, items)
}

/// English list: `a`, `a and b`, `a, b, and c`.
pub fn filter_list(_params: &[String], mut items: Vec<String>) -> TranslateResult<String> {
    if items.len() > 1 {
        if let Some(last) = items.last_mut() {
            last.insert_str(0, "and ");
        }
    }
    if items.len() > 2 {
        Ok(items.join(", "))
    } else {
        Ok(items.join(" "))
    }
}

/// Join items with the separator given as the first parameter.
pub fn filter_join(params: &[String], items: Vec<String>) -> TranslateResult<String> {
    let separator = params
        .first()
        .ok_or_else(|| TranslateError::InvalidFilterParams {
            filter: "join".to_string(),
            message: "expected a separator parameter".to_string(),
        })?;
    Ok(items.join(separator))
}
