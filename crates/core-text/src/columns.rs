//! Column-major grid formatting for completion listings.
//!
//! Column width is the longest value plus a two-space gutter, capped at the
//! target width; the final column absorbs whatever width is left over. Values
//! fill top-to-bottom within a column, columns left-to-right, and keep their
//! input order.

const GUTTER: usize = 2;

/// Geometry chosen for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGrid {
    pub column_width: usize,
    pub columns: usize,
    pub rows: usize,
    pub last_column_width: usize,
}

impl ColumnGrid {
    pub fn compute<S: AsRef<str>>(values: &[S], width: usize) -> Self {
        let width = width.max(1);
        let longest = values
            .iter()
            .map(|v| v.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let column_width = (longest + GUTTER).min(width);
        let columns = (width / column_width).max(1);
        let rows = values.len().div_ceil(columns);
        let last_column_width = width.saturating_sub(column_width * (columns - 1));
        Self {
            column_width,
            columns,
            rows,
            last_column_width,
        }
    }

    fn width_of(&self, column: usize) -> usize {
        if column + 1 == self.columns {
            self.last_column_width
        } else {
            self.column_width
        }
    }
}

/// One string per display row, cells padded to their column width.
pub fn column_rows<S: AsRef<str>>(values: &[S], width: usize) -> Vec<String> {
    let grid = ColumnGrid::compute(values, width);
    (0..grid.rows)
        .map(|row| {
            let mut line = String::new();
            for column in 0..grid.columns {
                let Some(value) = values.get(column * grid.rows + row) else {
                    break;
                };
                let value = value.as_ref();
                line.push_str(value);
                let pad = grid.width_of(column).saturating_sub(value.chars().count());
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line
        })
        .collect()
}

/// Render `values` as a newline-terminated grid fitting `width` columns.
pub fn format_columns<S: AsRef<str>>(values: &[S], width: usize) -> String {
    let mut out = String::new();
    for row in column_rows(values, width) {
        out.push_str(&row);
        out.push('\n');
    }
    out
}
