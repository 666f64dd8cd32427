use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::query::{QueryState, SortDirection};
use crate::domain::entities::row::{column_keys, Row, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub struct PageView<R> {
    pub rows: Vec<R>,
    pub total_filtered: usize,
    pub page_index: usize,
    pub page_count: usize,
}

impl<R> Default for PageView<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_filtered: 0,
            page_index: 1,
            page_count: 0,
        }
    }
}

/// Rows to render for `query`: filter, then stable sort, then page slice.
pub fn project<R: Row + Clone>(rows: &[R], query: &QueryState) -> Vec<R> {
    project_page(rows, query).rows
}

pub fn project_page<R: Row + Clone>(rows: &[R], query: &QueryState) -> PageView<R> {
    let needle = query.search_text.to_lowercase();
    let mut filtered: Vec<&R> = rows
        .iter()
        .filter(|row| needle.is_empty() || row.display_name().to_lowercase().contains(&needle))
        .collect();

    if let Some((field, direction)) = query.sort() {
        let keys = column_keys(filtered.iter().map(|row| row.field(field)).collect());
        let mut keyed: Vec<(SortKey, &R)> = keys.into_iter().zip(filtered).collect();
        // Direction flips the comparator, so ties keep input order both ways.
        keyed.sort_by(|(a, _), (b, _)| match direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        });
        filtered = keyed.into_iter().map(|(_, row)| row).collect();
    }

    let total_filtered = filtered.len();
    let page_size = query.page_size.max(1);
    let page_count = total_filtered.div_ceil(page_size);
    let start = query
        .page_index
        .saturating_sub(1)
        .saturating_mul(page_size);
    let page_rows = if start >= total_filtered {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_filtered);
        filtered[start..end].iter().map(|row| (*row).clone()).collect()
    };

    PageView {
        rows: page_rows,
        total_filtered,
        page_index: query.page_index,
        page_count,
    }
}

/// Memoizes the last projection, keyed on row-store identity and query value.
#[derive(Debug)]
pub struct ProjectionCache<R> {
    last: Option<(Arc<[R]>, QueryState, PageView<R>)>,
    recomputations: u64,
}

impl<R> Default for ProjectionCache<R> {
    fn default() -> Self {
        Self {
            last: None,
            recomputations: 0,
        }
    }
}

impl<R: Row + Clone> ProjectionCache<R> {
    pub fn project(&mut self, rows: &Arc<[R]>, query: &QueryState) -> PageView<R> {
        if let Some((cached_rows, cached_query, view)) = &self.last {
            if Arc::ptr_eq(cached_rows, rows) && cached_query == query {
                return view.clone();
            }
        }
        let view = project_page(rows, query);
        self.recomputations += 1;
        debug!(
            total = rows.len(),
            filtered = view.total_filtered,
            page = query.page_index,
            "recomputed projection"
        );
        self.last = Some((rows.clone(), query.clone(), view.clone()));
        view
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
