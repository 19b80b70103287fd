//! Materialization of a row source into a bounded, display-ready grid.

use crate::db::types::{RowSource, Value};
use crate::error::Result;
use futures::StreamExt;

/// Label of the synthetic ordinal column prepended to every grid.
const ORDINAL_LABEL: &str = "Row";

/// The bounded, string-normalized tabular form of a result set.
///
/// Invariants: every row has exactly `header.len()` cells, and the first cell
/// of each row is a 1-based ordinal that is strictly increasing with no gaps
/// and strictly below the row limit the grid was materialized with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultGrid {
    /// Column labels: "Row" followed by the source's column labels.
    pub header: Vec<String>,

    /// Rows of display strings, in database delivery order.
    pub rows: Vec<Vec<String>>,
}

/// Drains a row source into a [`ResultGrid`], stopping once the ordinal
/// counter reaches `row_limit`.
///
/// The ordinal starts at 1 and the loop runs while `ordinal < row_limit`, so
/// a limit of L materializes at most L-1 rows and a limit of 0 or 1 yields an
/// empty grid. Rows past the limit are left undrained; the cursor is simply
/// abandoned.
///
/// Materialization is all-or-nothing: an error on any row discards everything
/// accumulated so far and surfaces the error alone.
pub async fn materialize(mut source: RowSource<'_>, row_limit: usize) -> Result<ResultGrid> {
    let mut header = Vec::with_capacity(source.columns.len() + 1);
    header.push(ORDINAL_LABEL.to_string());
    header.append(&mut source.columns);

    let mut rows = Vec::new();
    let mut ordinal: usize = 1;

    while ordinal < row_limit {
        let Some(next) = source.rows.next().await else {
            break;
        };
        let values = next?;

        let mut display = Vec::with_capacity(values.len() + 1);
        display.push(ordinal.to_string());
        display.extend(values.iter().map(Value::to_display_string));

        rows.push(display);
        ordinal += 1;
    }

    Ok(ResultGrid { header, rows })
}
