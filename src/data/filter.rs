use std::collections::BTreeMap;

use super::model::{Column, Row, RowView, Table};

// ---------------------------------------------------------------------------
// Filter predicate: global search text plus per-column candidate lists
// ---------------------------------------------------------------------------

/// Transient filter state. Never mutates the table it is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Global search text; empty means "show all".
    pub query: String,
    /// Per-column candidates: column key → substrings, any of which may match.
    /// A column that is absent or has no candidates is not filtered.
    pub columns: BTreeMap<String, Vec<String>>,
}

impl FilterState {
    /// Replace the candidates for one column. An empty list removes the filter.
    pub fn set_column(&mut self, key: &str, candidates: Vec<String>) {
        if candidates.is_empty() {
            self.columns.remove(key);
        } else {
            self.columns.insert(key.to_string(), candidates);
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.columns.is_empty()
    }
}

/// Lowercase character by character. Unlike `str::to_lowercase` this has no
/// context-dependent mappings, so folding `q + extra` always starts with the
/// folding of `q`.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn cell_contains(row: &Row, key: &str, needle: &str) -> bool {
    match row.text(key) {
        Some(text) => fold_case(&text).contains(needle),
        None => false,
    }
}

fn matches_query(columns: &[Column], row: &Row, needle: &str) -> bool {
    needle.is_empty() || columns.iter().any(|col| cell_contains(row, &col.key, needle))
}

fn matches_candidates(row: &Row, key: &str, candidates: &[String]) -> bool {
    candidates.is_empty() || candidates.iter().any(|c| cell_contains(row, key, c))
}

/// Return indices of rows that pass the global query and every active
/// column filter, in table order.
pub fn filtered_indices(table: &Table, filters: &FilterState) -> Vec<usize> {
    let needle = fold_case(&filters.query);
    let column_filters: Vec<(&str, Vec<String>)> = filters
        .columns
        .iter()
        .map(|(key, candidates)| (key.as_str(), candidates.iter().map(|c| fold_case(c)).collect()))
        .collect();

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            matches_query(&table.columns, row, &needle)
                && column_filters
                    .iter()
                    .all(|(key, candidates)| matches_candidates(row, key, candidates))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rows where at least one cell contains `query`, ignoring case.
pub fn apply_query<'a>(table: &'a Table, query: &str) -> RowView<'a> {
    let needle = fold_case(query);
    table
        .rows
        .iter()
        .filter(|row| matches_query(&table.columns, row, &needle))
        .collect()
}

/// Rows whose cell under `column_key` contains any of `candidates`,
/// ignoring case. No candidates means no constraint.
pub fn apply_column_filter<'a>(
    table: &'a Table,
    column_key: &str,
    candidates: &[String],
) -> RowView<'a> {
    let folded: Vec<String> = candidates.iter().map(|c| fold_case(c)).collect();
    table
        .rows
        .iter()
        .filter(|row| matches_candidates(row, column_key, &folded))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::CellValue;

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::from(s))
    }

    fn num(n: f64) -> Option<CellValue> {
        Some(CellValue::Number(n))
    }

    fn people() -> Table {
        Table::build(
            &[text("Name"), text("Age"), text("City")],
            vec![
                vec![text("Alice"), num(30.0), text("Berlin")],
                vec![text("Bob"), num(25.0), text("Boston")],
                vec![text("Carol"), None, text("Bern")],
                vec![],
            ],
        )
    }

    fn ids(view: &RowView<'_>) -> Vec<usize> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn query_matches_text_and_numbers() {
        let table = people();
        assert_eq!(ids(&apply_query(&table, "bob")), [1]);
        assert_eq!(ids(&apply_query(&table, "30")), [0]);
    }

    #[test]
    fn empty_query_returns_every_row_in_order() {
        let table = people();
        assert_eq!(apply_query(&table, ""), table.view());
    }

    #[test]
    fn query_ignores_case() {
        let table = Table::build(
            &[text("v")],
            vec![vec![text("abc")], vec![text("ABC")], vec![text("AbC")], vec![text("xyz")]],
        );
        let upper = ids(&apply_query(&table, "ABC"));
        assert_eq!(upper, [0, 1, 2]);
        assert_eq!(upper, ids(&apply_query(&table, "abc")));
    }

    #[test]
    fn absent_cells_never_match() {
        let table = people();
        // Row 3 has no cells at all; only the empty query lets it through.
        assert!(!ids(&apply_query(&table, "e")).contains(&3));
        assert!(ids(&apply_column_filter(&table, "1", &["".to_string()])).iter().all(|&id| id < 2));
    }

    #[test]
    fn column_filter_accepts_any_candidate() {
        let table = people();
        let candidates = vec!["bost".to_string(), "BERN".to_string()];
        assert_eq!(ids(&apply_column_filter(&table, "2", &candidates)), [1, 2]);
        assert_eq!(apply_column_filter(&table, "2", &[]), table.view());
    }

    #[test]
    fn query_and_column_filters_are_anded() {
        let table = people();
        let mut filters = FilterState {
            query: "b".to_string(),
            ..Default::default()
        };
        filters.set_column("2", vec!["ber".to_string()]);
        // "b" hits Bob/Boston, Berlin and Bern; the city filter keeps Berlin and Bern.
        assert_eq!(filtered_indices(&table, &filters), [0, 2]);

        filters.set_column("0", vec!["carol".to_string()]);
        assert_eq!(filtered_indices(&table, &filters), [2]);

        filters.set_column("0", vec![]);
        filters.set_column("2", vec![]);
        assert!(filters.columns.is_empty());
        assert_eq!(filtered_indices(&table, &filters), [0, 1, 2]);
    }

    #[test]
    fn default_filter_state_is_identity() {
        let table = people();
        let filters = FilterState::default();
        assert!(!filters.is_active());
        assert_eq!(filtered_indices(&table, &filters), [0, 1, 2, 3]);
    }

    fn arb_table() -> impl Strategy<Value = Table> {
        let cell = prop_oneof![
            Just(None),
            "[a-zA-Z0-9 ]{0,6}".prop_map(|s| Some(CellValue::Text(s))),
            (-1000i64..1000).prop_map(|n| Some(CellValue::from(n))),
            any::<bool>().prop_map(|b| Some(CellValue::Bool(b))),
        ];
        let row = prop::collection::vec(cell, 0..4);
        prop::collection::vec(row, 0..12).prop_map(|rows| {
            Table::build(&[text("a"), text("b"), text("c")], rows)
        })
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(table in arb_table(), q in "[a-zA-Z0-9]{0,3}") {
            prop_assert_eq!(apply_query(&table, &q), apply_query(&table, &q));
        }

        #[test]
        fn longer_queries_narrow_the_view(
            table in arb_table(),
            q in "[a-zA-Z0-9]{0,3}",
            extra in "[a-zA-Z0-9]{1,3}",
        ) {
            let wide = ids(&apply_query(&table, &q));
            let narrow = ids(&apply_query(&table, &format!("{q}{extra}")));
            prop_assert!(narrow.iter().all(|id| wide.contains(id)));
        }

        #[test]
        fn filtering_preserves_order(table in arb_table(), q in "[a-z0-9]{0,2}") {
            let found = ids(&apply_query(&table, &q));
            prop_assert!(found.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
