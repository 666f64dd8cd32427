use serde::{Deserialize, Serialize};

use crate::domain::entities::dates::{format_display_date, inclusive_day_count_str};
use crate::domain::entities::mutation::Mutation;
use crate::domain::entities::row::{FieldKey, FieldValue, Row, RowId};
use crate::domain::entities::status::{
    rating_badge, Badge, Categorical, ColorToken, EmploymentType, EquipmentCategory,
    EquipmentCondition, LeaveStatus, LeaveType, MeetingStatus, ReviewStatus,
};
use crate::domain::entities::table::{
    ActionKind, Cell, ColumnSpec, EditForm, ManagedRow, RowAction,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub employment_type: i32,
    #[serde(default)]
    pub hire_date: String,
    #[serde(default)]
    pub is_suspended: bool,
}

impl Row for Employee {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "fullName" => Some(self.full_name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "department" => Some(self.department.as_str().into()),
            "position" => Some(self.position.as_str().into()),
            "employmentType" => Some(self.employment_type.into()),
            "hireDate" => Some(self.hire_date.as_str().into()),
            "isSuspended" => Some(self.is_suspended.into()),
            _ => None,
        }
    }
}

impl ManagedRow for Employee {
    const TITLE: &'static str = "Employees";
    const RESOURCE: &'static str = "employees";

    fn columns() -> &'static [ColumnSpec] {
        const COLUMNS: &[ColumnSpec] = &[
            ColumnSpec::sortable("fullName", "Name"),
            ColumnSpec::fixed("email", "Email"),
            ColumnSpec::sortable("department", "Department"),
            ColumnSpec::sortable("position", "Position"),
            ColumnSpec::sortable("employmentType", "Type"),
            ColumnSpec::sortable("hireDate", "Hired"),
            ColumnSpec::sortable("isSuspended", "Status"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        let account = if self.is_suspended {
            Badge::new("Suspended", ColorToken::Red)
        } else {
            Badge::new("Active", ColorToken::Green)
        };
        vec![
            Cell::Text(self.full_name.clone()),
            Cell::Text(self.email.clone()),
            Cell::Text(self.department.clone()),
            Cell::Text(self.position.clone()),
            Cell::Badge(EmploymentType::describe(self.employment_type)),
            Cell::Text(format_display_date(&self.hire_date)),
            Cell::Badge(account),
        ]
    }

    fn edit_form(&self) -> EditForm {
        EditForm::new(Self::RESOURCE, self.id())
            .field("fullName", "Name", &self.full_name)
            .field("email", "Email", &self.email)
            .field("department", "Department", &self.department)
            .field("position", "Position", &self.position)
    }

    fn actions(&self) -> Vec<RowAction> {
        let (label, suspended) = if self.is_suspended {
            ("Unsuspend", false)
        } else {
            ("Suspend", true)
        };
        let mut actions = vec![RowAction::run(
            label,
            Mutation::Suspend {
                employee: self.id(),
                suspended,
            },
        )];
        actions.extend(self.common_actions());
        actions
    }
}

/// Employees that can receive equipment, by name. Suspended accounts are left out.
pub fn assignable_employees(employees: &[Employee]) -> Vec<Employee> {
    let mut candidates: Vec<Employee> = employees
        .iter()
        .filter(|employee| !employee.is_suspended)
        .cloned()
        .collect();
    candidates.sort_by_cached_key(|employee| employee.full_name.to_lowercase());
    candidates
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub category: i32,
    #[serde(default)]
    pub condition: i32,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub purchase_date: String,
}

impl Row for Equipment {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "name" => Some(self.name.as_str().into()),
            "serialNumber" => Some(self.serial_number.as_str().into()),
            "category" => Some(self.category.into()),
            "condition" => Some(self.condition.into()),
            "assignedTo" => self.assigned_to.as_deref().map(FieldValue::from),
            "purchaseDate" => Some(self.purchase_date.as_str().into()),
            _ => None,
        }
    }
}

impl ManagedRow for Equipment {
    const TITLE: &'static str = "Equipment";
    const RESOURCE: &'static str = "equipment";

    fn columns() -> &'static [ColumnSpec] {
        const COLUMNS: &[ColumnSpec] = &[
            ColumnSpec::sortable("name", "Name"),
            ColumnSpec::fixed("serialNumber", "Serial"),
            ColumnSpec::sortable("category", "Category"),
            ColumnSpec::sortable("condition", "Condition"),
            ColumnSpec::sortable("assignedTo", "Assigned to"),
            ColumnSpec::sortable("purchaseDate", "Purchased"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.name.clone()),
            Cell::Text(self.serial_number.clone()),
            Cell::Icon {
                icon: EquipmentCategory::icon_for(self.category),
                badge: EquipmentCategory::describe(self.category),
            },
            Cell::Badge(EquipmentCondition::describe(self.condition)),
            Cell::Text(self.assigned_to.clone().unwrap_or_else(|| "-".to_string())),
            Cell::Text(format_display_date(&self.purchase_date)),
        ]
    }

    fn edit_form(&self) -> EditForm {
        EditForm::new(Self::RESOURCE, self.id())
            .field("name", "Name", &self.name)
            .field("serialNumber", "Serial", &self.serial_number)
            .field("purchaseDate", "Purchased", &self.purchase_date)
    }

    fn actions(&self) -> Vec<RowAction> {
        let first = if self.assigned_to.is_some() {
            RowAction::run(
                "Unassign",
                Mutation::Unassign {
                    equipment: self.id(),
                },
            )
        } else {
            RowAction {
                label: "Assign",
                kind: ActionKind::Assign {
                    equipment: self.id(),
                },
            }
        };
        let mut actions = vec![first];
        actions.extend(self.common_actions());
        actions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_name: String,
    #[serde(default)]
    pub leave_type: i32,
    #[serde(default)]
    pub status: i32,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
}

impl LeaveRequest {
    /// Inclusive day span derived from the two dates; `None` when the range
    /// is unparseable or reversed.
    pub fn days(&self) -> Option<u32> {
        inclusive_day_count_str(&self.start_date, &self.end_date).ok()
    }
}

impl Row for LeaveRequest {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.employee_name
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "employeeName" => Some(self.employee_name.as_str().into()),
            "leaveType" => Some(self.leave_type.into()),
            "status" => Some(self.status.into()),
            "startDate" => Some(self.start_date.as_str().into()),
            "endDate" => Some(self.end_date.as_str().into()),
            "days" => self.days().map(|days| FieldValue::Number(f64::from(days))),
            _ => None,
        }
    }
}

impl ManagedRow for LeaveRequest {
    const TITLE: &'static str = "Leave requests";
    const RESOURCE: &'static str = "leave-requests";

    fn columns() -> &'static [ColumnSpec] {
        const COLUMNS: &[ColumnSpec] = &[
            ColumnSpec::sortable("employeeName", "Employee"),
            ColumnSpec::sortable("leaveType", "Type"),
            ColumnSpec::sortable("startDate", "From"),
            ColumnSpec::sortable("endDate", "To"),
            ColumnSpec::sortable("days", "Days"),
            ColumnSpec::sortable("status", "Status"),
            ColumnSpec::fixed("reason", "Reason"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<Cell> {
        let days = self
            .days()
            .map(|days| days.to_string())
            .unwrap_or_else(|| "-".to_string());
        vec![
            Cell::Text(self.employee_name.clone()),
            Cell::Badge(LeaveType::describe(self.leave_type)),
            Cell::Text(format_display_date(&self.start_date)),
            Cell::Text(format_display_date(&self.end_date)),
            Cell::Text(days),
            Cell::Badge(LeaveStatus::describe(self.status)),
            Cell::Text(self.reason.clone()),
        ]
    }

    fn edit_form(&self) -> EditForm {
        EditForm::new(Self::RESOURCE, self.id())
            .field("startDate", "From", &self.start_date)
            .field("endDate", "To", &self.end_date)
            .field("reason", "Reason", &self.reason)
    }

    fn actions(&self) -> Vec<RowAction> {
        let mut actions = Vec::new();
        if LeaveStatus::from_code(self.status) == Some(LeaveStatus::Pending) {
            actions.push(RowAction::run(
                "Approve",
                Mutation::SetLeaveStatus {
                    id: self.id(),
                    status: LeaveStatus::Approved.code(),
                },
            ));
            actions.push(RowAction::run(
                "Reject",
                Mutation::SetLeaveStatus {
                    id: self.id(),
                    status: LeaveStatus::Rejected.code(),
                },
            ));
        }
        actions.extend(self.common_actions());
        actions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: i32,
}

impl Row for Meeting {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "title" => Some(self.title.as_str().into()),
            "organizer" => Some(self.organizer.as_str().into()),
            "date" => Some(self.date.as_str().into()),
            "startTime" => Some(self.start_time.as_str().into()),
            "location" => Some(self.location.as_str().into()),
            "status" => Some(self.status.into()),
            _ => None,
        }
    }
}

impl ManagedRow for Meeting {
    const TITLE: &'static str = "Meetings";
    const RESOURCE: &'static str = "meetings";

    fn columns() -> &'static [ColumnSpec] {
        const COLUMNS: &[ColumnSpec] = &[
            ColumnSpec::sortable("title", "Title"),
            ColumnSpec::sortable("organizer", "Organizer"),
            ColumnSpec::sortable("date", "Date"),
            ColumnSpec::sortable("startTime", "Time"),
            ColumnSpec::fixed("location", "Location"),
            ColumnSpec::sortable("status", "Status"),
        ];
        COLUMNS
    }

    fn edit_form(&self) -> EditForm {
        EditForm::new(Self::RESOURCE, self.id())
            .field("title", "Title", &self.title)
            .field("date", "Date", &self.date)
            .field("startTime", "Time", &self.start_time)
            .field("location", "Location", &self.location)
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.title.clone()),
            Cell::Text(self.organizer.clone()),
            Cell::Text(format_display_date(&self.date)),
            Cell::Text(self.start_time.clone()),
            Cell::Text(self.location.clone()),
            Cell::Badge(MeetingStatus::describe(self.status)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: i64,
    pub employee_name: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub status: i32,
}

impl Row for PerformanceReview {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.employee_name
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "employeeName" => Some(self.employee_name.as_str().into()),
            "reviewer" => Some(self.reviewer.as_str().into()),
            "period" => Some(self.period.as_str().into()),
            "rating" => self.rating.map(FieldValue::Number),
            "status" => Some(self.status.into()),
            _ => None,
        }
    }
}

impl ManagedRow for PerformanceReview {
    const TITLE: &'static str = "Reviews";
    const RESOURCE: &'static str = "reviews";

    fn columns() -> &'static [ColumnSpec] {
        const COLUMNS: &[ColumnSpec] = &[
            ColumnSpec::sortable("employeeName", "Employee"),
            ColumnSpec::sortable("reviewer", "Reviewer"),
            ColumnSpec::sortable("period", "Period"),
            ColumnSpec::sortable("rating", "Rating"),
            ColumnSpec::sortable("status", "Status"),
        ];
        COLUMNS
    }

    fn edit_form(&self) -> EditForm {
        EditForm::new(Self::RESOURCE, self.id())
            .field("reviewer", "Reviewer", &self.reviewer)
            .field("period", "Period", &self.period)
    }

    fn cells(&self) -> Vec<Cell> {
        let rating = match self.rating {
            Some(rating) => Cell::Labeled {
                text: format!("{rating:.1}"),
                badge: rating_badge(rating),
            },
            None => Cell::Text("-".to_string()),
        };
        vec![
            Cell::Text(self.employee_name.clone()),
            Cell::Text(self.reviewer.clone()),
            Cell::Text(self.period.clone()),
            rating,
            Cell::Badge(ReviewStatus::describe(self.status)),
        ]
    }
}
