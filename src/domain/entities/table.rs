use serde_json::{Map, Value};

use crate::domain::entities::mutation::Mutation;
use crate::domain::entities::row::{Row, RowId};
use crate::domain::entities::status::Badge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
}

impl ColumnSpec {
    pub const fn sortable(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sortable: true,
        }
    }

    pub const fn fixed(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sortable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge(Badge),
    Icon { icon: &'static str, badge: Badge },
    Labeled { text: String, badge: Badge },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditField {
    pub key: &'static str,
    pub label: &'static str,
    pub original: String,
    pub value: String,
}

/// Editable text fields of one row. Submitting sends only what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub resource: &'static str,
    pub id: RowId,
    pub fields: Vec<EditField>,
}

impl EditForm {
    pub fn new(resource: &'static str, id: RowId) -> Self {
        Self {
            resource,
            id,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &'static str, label: &'static str, value: &str) -> Self {
        self.fields.push(EditField {
            key,
            label,
            original: value.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Returns false when the form has no field named `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn changes(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|field| field.value != field.original)
            .map(|field| (field.key.to_string(), Value::String(field.value.clone())))
            .collect()
    }

    /// `None` when nothing was changed.
    pub fn to_mutation(&self) -> Option<Mutation> {
        let changes = self.changes();
        if changes.is_empty() {
            return None;
        }
        Some(Mutation::Edit {
            resource: self.resource,
            id: self.id,
            changes: Value::Object(changes),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    Run(Mutation),
    /// Becomes `Mutation::Assign` once an employee is picked.
    Assign { equipment: RowId },
    Edit(EditForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub kind: ActionKind,
}

impl RowAction {
    pub fn run(label: &'static str, mutation: Mutation) -> Self {
        Self {
            label,
            kind: ActionKind::Run(mutation),
        }
    }
}

/// A row type that one management screen lists.
pub trait ManagedRow: Row + Clone + PartialEq + 'static {
    const TITLE: &'static str;
    const RESOURCE: &'static str;

    fn columns() -> &'static [ColumnSpec];
    fn cells(&self) -> Vec<Cell>;
    fn edit_form(&self) -> EditForm;

    /// Edit and delete, offered on every row.
    fn common_actions(&self) -> Vec<RowAction> {
        vec![
            RowAction {
                label: "Edit",
                kind: ActionKind::Edit(self.edit_form()),
            },
            RowAction::run(
                "Delete",
                Mutation::Delete {
                    resource: Self::RESOURCE,
                    id: self.id(),
                },
            ),
        ]
    }

    fn actions(&self) -> Vec<RowAction> {
        self.common_actions()
    }
}
