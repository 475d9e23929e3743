//! Pure list transforms: search, sort, pagination.
//!
//! Each transform is independent; composition order (filter → sort →
//! paginate) is the caller's responsibility. None of them mutate their
//! input.

use std::cmp::Ordering;
use std::ops::Range;

/// Return the items whose selected field contains `query`,
/// case-insensitively. Fields for which the selector returns `None`
/// (non-string fields) never match. An empty query returns everything.
pub fn filter_items<'a, T>(
    items: &'a [T],
    selector: impl Fn(&T) -> Option<&str>,
    query: &str,
) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            selector(item)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The comparable projection of a record's field. `Unordered` covers any
/// field type that is neither text nor numeric; comparisons involving it are
/// stable no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Unordered,
}

fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Return a new vector ordered by the keyed field. Text keys compare
/// case-insensitively, numeric keys numerically; mixed or unorderable keys
/// leave the relative order unchanged (the sort is stable).
pub fn sort_items<T: Clone>(
    items: &[T],
    key: impl Fn(&T) -> SortKey,
    direction: SortDirection,
) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(&key(a), &key(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

/// Tracks which column is sorted and in which direction. Toggling the active
/// key flips the direction; selecting a new key resets to ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: PartialEq> SortState<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flip();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// 1-indexed pagination over a counted collection.
///
/// The current page always stays within `[1, total_pages]`, and an empty
/// collection is presented as a single empty page — there is never a page 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
}

impl Pagination {
    /// A zero `items_per_page` is treated as 1.
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            total_items,
            items_per_page: items_per_page.max(1),
            current_page: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Re-count the collection (after a refetch or filter change), keeping
    /// the current page in bounds.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.set_page(self.current_page);
    }

    /// Half-open index range `[start, end)` of the current page's items,
    /// clamped to the collection size.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.items_per_page;
        let start = start.min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }

    /// Slice of the current page's items.
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.page_range();
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        title: String,
        fee: f64,
    }

    fn rows() -> Vec<Row> {
        ["Beach cleanup", "annual Gala", "Tree planting", "Food drive"]
            .iter()
            .enumerate()
            .map(|(i, title)| Row {
                title: title.to_string(),
                fee: (i as f64) * 10.0,
            })
            .collect()
    }

    // --- search ---

    #[test]
    fn filter_matches_case_insensitively() {
        let rows = rows();
        let hits = filter_items(&rows, |r| Some(&r.title), "GALA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "annual Gala");
    }

    #[test]
    fn filter_matches_substrings() {
        let rows = rows();
        let hits = filter_items(&rows, |r| Some(&r.title), "ree");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tree planting");
    }

    #[test]
    fn empty_query_returns_everything() {
        let rows = rows();
        let hits = filter_items(&rows, |r| Some(&r.title), "");
        assert_eq!(hits.len(), rows.len());
    }

    #[test]
    fn non_string_fields_never_match() {
        let rows = rows();
        let hits = filter_items(&rows, |_| None, "10");
        assert!(hits.is_empty());
    }

    #[test]
    fn every_hit_contains_the_query_and_every_miss_does_not() {
        let rows = rows();
        let query = "an";
        let hits = filter_items(&rows, |r| Some(&r.title), query);
        for row in &rows {
            let matched = hits.iter().any(|h| h.title == row.title);
            assert_eq!(matched, row.title.to_lowercase().contains(query));
        }
    }

    // --- sort ---

    #[test]
    fn ascending_reversed_equals_descending() {
        let rows = rows();
        let key = |r: &Row| SortKey::Text(r.title.clone());
        let mut asc = sort_items(&rows, key, SortDirection::Ascending);
        let desc = sort_items(&rows, key, SortDirection::Descending);
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn sort_is_idempotent() {
        let rows = rows();
        let key = |r: &Row| SortKey::Number(r.fee);
        let once = sort_items(&rows, key, SortDirection::Ascending);
        let twice = sort_items(&once, key, SortDirection::Ascending);
        assert_eq!(once, twice);
    }

    #[test]
    fn numeric_sort_orders_numerically() {
        let rows = vec![
            Row { title: "a".into(), fee: 100.0 },
            Row { title: "b".into(), fee: 20.0 },
            Row { title: "c".into(), fee: 3.0 },
        ];
        let sorted = sort_items(&rows, |r| SortKey::Number(r.fee), SortDirection::Ascending);
        let fees: Vec<f64> = sorted.iter().map(|r| r.fee).collect();
        assert_eq!(fees, vec![3.0, 20.0, 100.0]);
    }

    #[test]
    fn unorderable_keys_preserve_input_order() {
        let rows = rows();
        let sorted = sort_items(&rows, |_| SortKey::Unordered, SortDirection::Descending);
        assert_eq!(sorted, rows);
    }

    #[test]
    fn input_is_not_mutated() {
        let rows = rows();
        let before = rows.clone();
        let _ = sort_items(&rows, |r| SortKey::Text(r.title.clone()), SortDirection::Ascending);
        assert_eq!(rows, before);
    }

    #[test]
    fn toggle_flips_direction_on_active_key_and_resets_on_new_key() {
        let mut state = SortState::new("title");
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle("title");
        assert_eq!(state.direction, SortDirection::Descending);

        state.toggle("date");
        assert_eq!(state.key, "date");
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    // --- pagination ---

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(Pagination::new(0, 10).total_pages(), 1);
        assert_eq!(Pagination::new(1, 10).total_pages(), 1);
        assert_eq!(Pagination::new(10, 10).total_pages(), 1);
        assert_eq!(Pagination::new(11, 10).total_pages(), 2);
        assert_eq!(Pagination::new(95, 10).total_pages(), 10);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut p = Pagination::new(25, 10);
        assert_eq!(p.current_page(), 1);
        p.prev_page();
        assert_eq!(p.current_page(), 1);
        p.next_page();
        p.next_page();
        p.next_page();
        p.next_page();
        assert_eq!(p.current_page(), 3);
        p.set_page(99);
        assert_eq!(p.current_page(), 3);
        p.set_page(0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn page_range_is_half_open_and_clamped() {
        let mut p = Pagination::new(25, 10);
        assert_eq!(p.page_range(), 0..10);
        p.next_page();
        assert_eq!(p.page_range(), 10..20);
        p.next_page();
        assert_eq!(p.page_range(), 20..25);
    }

    #[test]
    fn empty_collection_is_one_empty_page() {
        let p = Pagination::new(0, 10);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.page_range(), 0..0);
        let empty: Vec<u8> = Vec::new();
        assert!(p.page_of(&empty).is_empty());
    }

    #[test]
    fn page_of_slices_current_page() {
        let items: Vec<u32> = (0..25).collect();
        let mut p = Pagination::new(items.len(), 10);
        p.set_page(3);
        assert_eq!(p.page_of(&items), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn shrinking_collection_pulls_page_back_in_bounds() {
        let mut p = Pagination::new(30, 10);
        p.set_page(3);
        p.set_total_items(12);
        assert_eq!(p.current_page(), 2);
        assert_eq!(p.page_range(), 10..12);
    }
}
