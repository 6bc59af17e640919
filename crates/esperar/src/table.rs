//! Tabular grid navigation over resolved table elements.
//!
//! A table is never materialized: each navigation call re-reads rows
//! (`.//tr`) and cells (`.//td`) relative to the handles involved, so the
//! view is always the current render. The core operation finds an anchor
//! cell by content match and steps from it by row/column offsets, which
//! lets a test express "the email field is two columns right of the name I
//! searched for" without hardcoding coordinates, so the lookup survives
//! column reordering as long as the relative layout is stable.

use std::time::Duration;

use tracing::trace;

use crate::locator::Locator;
use crate::query::{ElementHandle, ElementQuery};
use crate::resolver::{ElementResolver, Readiness};
use crate::result::{EsperarError, EsperarResult};

const TABLE_XPATH: &str = "//table";
const SUB_TABLE_XPATH: &str = ".//table";
const SUB_ROW_XPATH: &str = ".//tr";
const SUB_CELL_XPATH: &str = ".//td";

// =============================================================================
// MATCH MODE
// =============================================================================

/// How cell text is compared against the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive equality
    Exact,
    /// Case-insensitive substring containment
    Partial,
}

impl MatchMode {
    fn matches(self, cell_text: &str, needle: &str) -> bool {
        match self {
            Self::Exact => cell_text == needle,
            Self::Partial => cell_text.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

// =============================================================================
// TABLE NAVIGATOR
// =============================================================================

/// Navigates row/column grids on top of an [`ElementResolver`].
#[derive(Debug)]
pub struct TableNavigator<'r, Q> {
    resolver: &'r ElementResolver<Q>,
}

impl<'r, Q: ElementQuery> TableNavigator<'r, Q> {
    /// Create a navigator over a resolver
    pub fn new(resolver: &'r ElementResolver<Q>) -> Self {
        Self { resolver }
    }

    /// Every table currently interactable on the page
    pub async fn all_tables(&self, budget: Duration) -> Vec<ElementHandle> {
        self.resolver
            .resolve_many(
                &Locator::xpath(TABLE_XPATH),
                None,
                budget,
                Readiness::Interactable,
            )
            .await
    }

    /// Every table nested under the element found by `parent`
    pub async fn tables_within(&self, parent: &Locator, budget: Duration) -> Vec<ElementHandle> {
        self.resolver
            .resolve_many_within(
                parent,
                &Locator::xpath(SUB_TABLE_XPATH),
                budget,
                Readiness::Interactable,
            )
            .await
    }

    /// Resolve `table_locator` first, then find a cell by offset from a
    /// content match. See [`Self::find_cell_offset_from_match`].
    pub async fn find_cell_offset_from_match_by(
        &self,
        table_locator: &Locator,
        match_text: &str,
        mode: MatchMode,
        row_offset: i32,
        col_offset: i32,
    ) -> EsperarResult<Option<ElementHandle>> {
        let table = self
            .resolver
            .resolve_one(table_locator, None, Duration::ZERO, Readiness::Interactable)
            .await?;
        self.find_cell_offset_from_match(table.as_ref(), match_text, mode, row_offset, col_offset)
            .await
    }

    /// Find the cell `row_offset`/`col_offset` away from the first cell
    /// whose text matches `match_text` under `mode`.
    ///
    /// The grid is scanned row-major, top-to-bottom then left-to-right, and
    /// the first match wins: later cells with equal or better matches are
    /// never considered, even across duplicate values. Positive offsets
    /// step down/right, negative ones up/left.
    ///
    /// An empty `match_text`, an absent `table`, or no matching cell all
    /// return `Ok(None)`. Navigation assumes the table is already rendered,
    /// so rows and cells are read with a zero budget. An offset landing
    /// outside the grid raises [`EsperarError::InvalidRowOffset`] or
    /// [`EsperarError::InvalidColumnOffset`] with the anchor context.
    pub async fn find_cell_offset_from_match(
        &self,
        table: Option<&ElementHandle>,
        match_text: &str,
        mode: MatchMode,
        row_offset: i32,
        col_offset: i32,
    ) -> EsperarResult<Option<ElementHandle>> {
        let Some(table) = table else {
            return Ok(None);
        };
        if match_text.is_empty() {
            return Ok(None);
        }

        let rows = self.rows_of(table).await;
        for (row_index, row) in rows.iter().enumerate() {
            let cells = self.cells_of(row).await;
            for (col_index, cell) in cells.iter().enumerate() {
                let cell_text = self.resolver.query().text(cell).await?;
                if mode.matches(&cell_text, match_text) {
                    trace!(
                        row = row_index,
                        column = col_index,
                        text = %cell_text,
                        "anchor cell matched"
                    );
                    return self
                        .cell_at_offset(match_text, row_offset, col_offset, &rows, row_index, col_index)
                        .await
                        .map(Some);
                }
            }
        }
        Ok(None)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn rows_of(&self, table: &ElementHandle) -> Vec<ElementHandle> {
        self.resolver
            .resolve_many(
                &Locator::xpath(SUB_ROW_XPATH),
                Some(table),
                Duration::ZERO,
                Readiness::Present,
            )
            .await
    }

    async fn cells_of(&self, row: &ElementHandle) -> Vec<ElementHandle> {
        self.resolver
            .resolve_many(
                &Locator::xpath(SUB_CELL_XPATH),
                Some(row),
                Duration::ZERO,
                Readiness::Present,
            )
            .await
    }

    async fn cell_at_offset(
        &self,
        match_text: &str,
        row_offset: i32,
        col_offset: i32,
        rows: &[ElementHandle],
        row_index: usize,
        col_index: usize,
    ) -> EsperarResult<ElementHandle> {
        let target_row = row_index as i64 + i64::from(row_offset);
        if target_row < 0 || target_row >= rows.len() as i64 {
            return Err(EsperarError::InvalidRowOffset {
                matched_text: match_text.to_string(),
                matched_row: row_index,
                offset: row_offset,
            });
        }
        let cells = self.cells_of(&rows[target_row as usize]).await;
        let target_col = col_index as i64 + i64::from(col_offset);
        if target_col < 0 || target_col >= cells.len() as i64 {
            return Err(EsperarError::InvalidColumnOffset {
                matched_text: match_text.to_string(),
                matched_row: row_index,
                matched_column: col_index,
                offset: col_offset,
            });
        }
        Ok(cells[target_col as usize].clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================
