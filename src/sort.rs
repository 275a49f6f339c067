//! Natural-order sorting of string lists

use crate::compare::NaturalComparator;
use crate::config::Order;
use crate::error::Result;

/// Sort `items` in natural order, reversing the result for descending order
///
/// The sort is stable, so keys the comparator treats as equal keep their
/// input order (before any reversal).
pub fn sort_strings<T: AsRef<str>>(
    mut items: Vec<T>,
    order: Order,
    comparator: &NaturalComparator,
) -> Vec<T> {
    items.sort_by(|a, b| comparator.compare(a.as_ref(), b.as_ref()));
    if order == Order::Descending {
        items.reverse();
    }
    items
}

/// Same as [`sort_strings`], taking the order as text (`asc`, `DESC`, ...)
///
/// An unrecognized order fails before anything is sorted.
pub fn sort_strings_str<T: AsRef<str>>(
    items: Vec<T>,
    order: &str,
    comparator: &NaturalComparator,
) -> Result<Vec<T>> {
    let order = order.parse::<Order>()?;
    Ok(sort_strings(items, order, comparator))
}
