//! Plain-text column layout for help output.

use serde::{Deserialize, Serialize};

/// Layout settings for [`table`].
///
/// # Examples
///
/// ```
/// use cli_parser_core::TableConfig;
///
/// let config = TableConfig::default();
/// assert_eq!(config.padding, 2);
/// assert_eq!(config.margin, 2);
/// assert_eq!(config.line_spacing, 0);
/// assert!(config.rows.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Maximum number of rows rendered (all rows when unset).
    pub rows: Option<usize>,
    /// Maximum number of columns rendered (widest row when unset).
    pub cols: Option<usize>,
    /// Spaces after the widest cell of each column.
    pub padding: usize,
    /// Spaces before each row.
    pub margin: usize,
    /// Extra blank lines between rows.
    pub line_spacing: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            padding: 2,
            margin: 2,
            line_spacing: 0,
        }
    }
}

impl TableConfig {
    /// Limits the number of columns.
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Sets the padding between columns.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// Renders rows of optional cells as left-aligned columns.
///
/// Every cell is padded to the widest cell of its column (measured over all
/// rows, including those cut by `rows`) plus `padding`. Missing cells render
/// as empty strings and cells past `cols` are dropped.
///
/// # Examples
///
/// ```
/// use cli_parser_core::{table, TableConfig};
///
/// let rows = vec![
///     vec![Some("-v,"), Some("--verbose"), Some("Talk more")],
///     vec![Some("-q,"), Some("--quiet"), None],
/// ];
/// let out = table(&rows, &TableConfig::default().with_padding(1));
/// assert_eq!(
///     out,
///     "  -v, --verbose Talk more \n  -q, --quiet             "
/// );
/// ```
pub fn table<S: AsRef<str>>(rows: &[Vec<Option<S>>], config: &TableConfig) -> String {
    let cols = config
        .cols
        .unwrap_or_else(|| rows.iter().map(Vec::len).max().unwrap_or(0));
    let widths: Vec<usize> = (0..cols).map(|c| column_width(rows, c)).collect();
    let shown = config.rows.unwrap_or(rows.len()).min(rows.len());

    let margin = " ".repeat(config.margin);
    let separator = "\n".repeat(config.line_spacing + 1);

    rows[..shown]
        .iter()
        .map(|row| {
            let mut line = margin.clone();
            for (c, cell) in row.iter().enumerate().take(cols) {
                let text = cell.as_ref().map(AsRef::as_ref).unwrap_or("");
                line.push_str(text);
                let fill = widths[c] - text.chars().count() + config.padding;
                line.push_str(&" ".repeat(fill));
            }
            line
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

fn column_width<S: AsRef<str>>(rows: &[Vec<Option<S>>], column: usize) -> usize {
    rows.iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.as_ref().map_or(0, |s| s.as_ref().chars().count()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[Option<&'static str>]]) -> Vec<Vec<Option<&'static str>>> {
        data.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_default_layout() {
        let data = rows(&[&[Some("a"), Some("bb")], &[Some("ccc"), Some("d")]]);
        let out = table(&data, &TableConfig::default());
        assert_eq!(out, "  a    bb  \n  ccc  d   ");
    }

    #[test]
    fn test_row_limit_keeps_full_width() {
        let data = rows(&[&[Some("a")], &[Some("longest")]]);
        let config = TableConfig {
            rows: Some(1),
            ..TableConfig::default()
        };
        assert_eq!(table(&data, &config), "  a        ");
    }

    #[test]
    fn test_col_limit_drops_extra_cells() {
        let data = rows(&[&[Some("a"), Some("b"), Some("c")]]);
        let config = TableConfig::default().with_cols(2).with_padding(1);
        assert_eq!(table(&data, &config), "  a b ");
    }

    #[test]
    fn test_line_spacing_and_margin() {
        let data = rows(&[&[Some("x")], &[Some("y")]]);
        let config = TableConfig {
            margin: 0,
            padding: 0,
            line_spacing: 1,
            ..TableConfig::default()
        };
        assert_eq!(table(&data, &config), "x\n\ny");
    }

    #[test]
    fn test_absent_cells_and_ragged_rows() {
        let data = rows(&[&[None, Some("b")], &[Some("aa")]]);
        let config = TableConfig {
            margin: 0,
            padding: 1,
            ..TableConfig::default()
        };
        assert_eq!(table(&data, &config), "   b \naa ");
    }

    #[test]
    fn test_empty_table() {
        let data: Vec<Vec<Option<&str>>> = Vec::new();
        assert_eq!(table(&data, &TableConfig::default()), "");
    }
}
