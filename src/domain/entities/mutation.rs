use crate::domain::entities::row::RowId;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Assign {
        equipment: RowId,
        employee: RowId,
    },
    Unassign {
        equipment: RowId,
    },
    Suspend {
        employee: RowId,
        suspended: bool,
    },
    Delete {
        resource: &'static str,
        id: RowId,
    },
    Edit {
        resource: &'static str,
        id: RowId,
        changes: serde_json::Value,
    },
    SetLeaveStatus {
        id: RowId,
        status: i32,
    },
}

impl Mutation {
    pub fn describe(&self) -> String {
        match self {
            Mutation::Assign {
                equipment,
                employee,
            } => format!("assign equipment #{equipment} to employee #{employee}"),
            Mutation::Unassign { equipment } => format!("unassign equipment #{equipment}"),
            Mutation::Suspend {
                employee,
                suspended: true,
            } => format!("suspend employee #{employee}"),
            Mutation::Suspend {
                employee,
                suspended: false,
            } => format!("unsuspend employee #{employee}"),
            Mutation::Delete { resource, id } => format!("delete {resource} #{id}"),
            Mutation::Edit { resource, id, .. } => format!("edit {resource} #{id}"),
            Mutation::SetLeaveStatus { id, .. } => format!("update leave request #{id}"),
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, Mutation::Delete { .. })
    }
}
