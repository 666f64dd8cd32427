use crate::domain::entities::row::FieldKey;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub sort_field: Option<FieldKey>,
    pub sort_direction: Option<SortDirection>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// A zero page size falls back to the default.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            sort_field: None,
            sort_direction: None,
            page_index: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// The active sort, only when both field and direction are set.
    pub fn sort(&self) -> Option<(&FieldKey, SortDirection)> {
        match (&self.sort_field, self.sort_direction) {
            (Some(field), Some(direction)) => Some((field, direction)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    SetSearchText(String),
    /// `direction: None` cycles Ascending -> Descending -> unsorted for the
    /// same field; a different field starts Ascending.
    SetSort {
        field: FieldKey,
        direction: Option<SortDirection>,
    },
    SetPage {
        index: i64,
        size: i64,
    },
}

pub fn apply_action(state: &QueryState, action: QueryAction) -> QueryState {
    let mut next = state.clone();
    match action {
        QueryAction::SetSearchText(text) => {
            next.search_text = text;
            next.page_index = 1;
        }
        QueryAction::SetSort { field, direction } => {
            let direction = match direction {
                Some(direction) => Some(direction),
                None => cycle_direction(state, &field),
            };
            next.sort_field = direction.map(|_| field);
            next.sort_direction = direction;
        }
        QueryAction::SetPage { index, size } => {
            if index <= 0 || size <= 0 {
                return next;
            }
            let (Ok(index), Ok(size)) = (usize::try_from(index), usize::try_from(size)) else {
                return next;
            };
            next.page_index = index;
            next.page_size = size;
        }
    }
    next
}

fn cycle_direction(state: &QueryState, field: &FieldKey) -> Option<SortDirection> {
    if state.sort_field.as_ref() != Some(field) {
        return Some(SortDirection::Ascending);
    }
    match state.sort_direction {
        None => Some(SortDirection::Ascending),
        Some(SortDirection::Ascending) => Some(SortDirection::Descending),
        Some(SortDirection::Descending) => None,
    }
}

/// Owns one view's query state; every change goes through [`apply_action`].
#[derive(Debug, Clone, Default)]
pub struct QueryController {
    state: QueryState,
}

impl QueryController {
    pub fn new(state: QueryState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: QueryAction) -> bool {
        let next = apply_action(&self.state, action);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(QueryAction::SetSearchText(text.into()))
    }

    pub fn set_sort(&mut self, field: impl Into<FieldKey>, direction: Option<SortDirection>) -> bool {
        self.dispatch(QueryAction::SetSort {
            field: field.into(),
            direction,
        })
    }

    pub fn set_page(&mut self, index: i64, size: i64) -> bool {
        self.dispatch(QueryAction::SetPage { index, size })
    }
}
