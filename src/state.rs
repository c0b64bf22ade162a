use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use rusty_sheet::data::{filtered_indices, load_file, save_file, ExportOptions, FilterState, Row, Table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// File the current table was loaded from.
    pub source: Option<PathBuf>,

    /// Bumped on every successful load; keys per-table widget state.
    pub generation: u64,

    /// Global search text and per-column candidates.
    pub filters: FilterState,

    /// Raw text of each column's filter box, keyed by column key.
    pub column_inputs: BTreeMap<String, String>,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Export settings (sheet name, default file name, duplicate titles).
    pub export_options: ExportOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            generation: 0,
            filters: FilterState::default(),
            column_inputs: BTreeMap::new(),
            visible_indices: Vec::new(),
            export_options: ExportOptions::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Replace the current table wholesale and reset all filters.
    pub fn set_table(&mut self, table: Table, source: Option<PathBuf>) {
        self.filters = FilterState::default();
        self.column_inputs.clear();
        self.visible_indices = (0..table.len()).collect();
        self.table = Some(table);
        self.source = source;
        self.generation += 1;
        self.status_message = None;
    }

    /// Load a file. On failure the current table and filters stay untouched.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows x {} columns from {}",
                    table.len(),
                    table.columns.len(),
                    path.display()
                );
                self.set_table(table, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.filters);
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.filters.query = query.to_string();
        self.refilter();
    }

    /// Update one column's filter from its text box. Candidates are
    /// comma separated; blank pieces are ignored.
    pub fn set_column_input(&mut self, key: &str, input: &str) {
        let candidates: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        self.column_inputs.insert(key.to_string(), input.to_string());
        self.filters.set_column(key, candidates);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.column_inputs.clear();
        self.refilter();
    }

    /// Rows currently shown, in table order.
    pub fn visible_rows(&self) -> Vec<&Row> {
        match &self.table {
            Some(table) => self.visible_indices.iter().map(|&i| &table.rows[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Write the visible rows to `path`. Nothing is written when no row is visible.
    pub fn export_visible(&self, path: &Path) -> Result<usize> {
        let Some(table) = &self.table else {
            return Ok(0);
        };
        let rows = self.visible_rows();
        if rows.is_empty() {
            return Ok(0);
        }
        save_file(path, table, &rows, &self.export_options)?;
        log::info!("Exported {} rows to {}", rows.len(), path.display());
        Ok(rows.len())
    }
}
