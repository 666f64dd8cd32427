use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Teal,
    Gray,
}

impl ColorToken {
    pub fn css_class(self) -> &'static str {
        match self {
            ColorToken::Blue => "badge-blue",
            ColorToken::Green => "badge-green",
            ColorToken::Yellow => "badge-yellow",
            ColorToken::Orange => "badge-orange",
            ColorToken::Red => "badge-red",
            ColorToken::Purple => "badge-purple",
            ColorToken::Teal => "badge-teal",
            ColorToken::Gray => "badge-gray",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            ColorToken::Blue => "#dbeafe",
            ColorToken::Green => "#dcfce7",
            ColorToken::Yellow => "#fef9c3",
            ColorToken::Orange => "#ffedd5",
            ColorToken::Red => "#fee2e2",
            ColorToken::Purple => "#f3e8ff",
            ColorToken::Teal => "#ccfbf1",
            ColorToken::Gray => "#f3f4f6",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: ColorToken,
}

impl Badge {
    pub const fn new(label: &'static str, color: ColorToken) -> Self {
        Self { label, color }
    }

    pub const fn unknown() -> Self {
        Self::new("Unknown", ColorToken::Gray)
    }
}

pub type StatusTable = BTreeMap<i32, Badge>;

/// Total over `i32`: codes missing from `table` resolve to `fallback`.
pub fn map_status(table: &StatusTable, fallback: &Badge, code: i32) -> Badge {
    table.get(&code).cloned().unwrap_or_else(|| fallback.clone())
}

/// A closed, integer-coded enumeration with a display badge per variant.
pub trait Categorical: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(self) -> i32;
    fn badge(self) -> Badge;

    fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.code() == code)
    }

    fn table() -> StatusTable {
        Self::ALL
            .iter()
            .map(|variant| (variant.code(), variant.badge()))
            .collect()
    }

    fn describe(code: i32) -> Badge {
        map_status(&Self::table(), &Badge::unknown(), code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Intern,
}

impl Categorical for EmploymentType {
    const ALL: &'static [Self] = &[
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Intern,
    ];

    fn code(self) -> i32 {
        match self {
            EmploymentType::FullTime => 0,
            EmploymentType::PartTime => 1,
            EmploymentType::Contract => 2,
            EmploymentType::Intern => 3,
        }
    }

    fn badge(self) -> Badge {
        match self {
            EmploymentType::FullTime => Badge::new("Full-time", ColorToken::Blue),
            EmploymentType::PartTime => Badge::new("Part-time", ColorToken::Teal),
            EmploymentType::Contract => Badge::new("Contract", ColorToken::Orange),
            EmploymentType::Intern => Badge::new("Intern", ColorToken::Purple),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl Categorical for LeaveStatus {
    const ALL: &'static [Self] = &[
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
        LeaveStatus::Cancelled,
    ];

    fn code(self) -> i32 {
        match self {
            LeaveStatus::Pending => 0,
            LeaveStatus::Approved => 1,
            LeaveStatus::Rejected => 2,
            LeaveStatus::Cancelled => 3,
        }
    }

    fn badge(self) -> Badge {
        match self {
            LeaveStatus::Pending => Badge::new("Pending", ColorToken::Yellow),
            LeaveStatus::Approved => Badge::new("Approved", ColorToken::Green),
            LeaveStatus::Rejected => Badge::new("Rejected", ColorToken::Red),
            LeaveStatus::Cancelled => Badge::new("Cancelled", ColorToken::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Parental,
}

impl Categorical for LeaveType {
    const ALL: &'static [Self] = &[
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Unpaid,
        LeaveType::Parental,
    ];

    fn code(self) -> i32 {
        match self {
            LeaveType::Annual => 0,
            LeaveType::Sick => 1,
            LeaveType::Unpaid => 2,
            LeaveType::Parental => 3,
        }
    }

    fn badge(self) -> Badge {
        match self {
            LeaveType::Annual => Badge::new("Annual", ColorToken::Blue),
            LeaveType::Sick => Badge::new("Sick", ColorToken::Orange),
            LeaveType::Unpaid => Badge::new("Unpaid", ColorToken::Gray),
            LeaveType::Parental => Badge::new("Parental", ColorToken::Purple),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentCondition {
    New,
    Good,
    Fair,
    Damaged,
    Retired,
}

impl Categorical for EquipmentCondition {
    const ALL: &'static [Self] = &[
        EquipmentCondition::New,
        EquipmentCondition::Good,
        EquipmentCondition::Fair,
        EquipmentCondition::Damaged,
        EquipmentCondition::Retired,
    ];

    fn code(self) -> i32 {
        match self {
            EquipmentCondition::New => 0,
            EquipmentCondition::Good => 1,
            EquipmentCondition::Fair => 2,
            EquipmentCondition::Damaged => 3,
            EquipmentCondition::Retired => 4,
        }
    }

    fn badge(self) -> Badge {
        match self {
            EquipmentCondition::New => Badge::new("New", ColorToken::Green),
            EquipmentCondition::Good => Badge::new("Good", ColorToken::Blue),
            EquipmentCondition::Fair => Badge::new("Fair", ColorToken::Yellow),
            EquipmentCondition::Damaged => Badge::new("Damaged", ColorToken::Red),
            EquipmentCondition::Retired => Badge::new("Retired", ColorToken::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentCategory {
    Laptop,
    Monitor,
    Phone,
    Peripheral,
    Furniture,
}

pub const FALLBACK_ICON: &str = "box";

impl EquipmentCategory {
    pub fn icon(self) -> &'static str {
        match self {
            EquipmentCategory::Laptop => "laptop",
            EquipmentCategory::Monitor => "monitor",
            EquipmentCategory::Phone => "phone",
            EquipmentCategory::Peripheral => "keyboard",
            EquipmentCategory::Furniture => "chair",
        }
    }

    pub fn icon_for(code: i32) -> &'static str {
        Self::from_code(code).map_or(FALLBACK_ICON, Self::icon)
    }
}

impl Categorical for EquipmentCategory {
    const ALL: &'static [Self] = &[
        EquipmentCategory::Laptop,
        EquipmentCategory::Monitor,
        EquipmentCategory::Phone,
        EquipmentCategory::Peripheral,
        EquipmentCategory::Furniture,
    ];

    fn code(self) -> i32 {
        match self {
            EquipmentCategory::Laptop => 0,
            EquipmentCategory::Monitor => 1,
            EquipmentCategory::Phone => 2,
            EquipmentCategory::Peripheral => 3,
            EquipmentCategory::Furniture => 4,
        }
    }

    fn badge(self) -> Badge {
        match self {
            EquipmentCategory::Laptop => Badge::new("Laptop", ColorToken::Blue),
            EquipmentCategory::Monitor => Badge::new("Monitor", ColorToken::Teal),
            EquipmentCategory::Phone => Badge::new("Phone", ColorToken::Purple),
            EquipmentCategory::Peripheral => Badge::new("Peripheral", ColorToken::Orange),
            EquipmentCategory::Furniture => Badge::new("Furniture", ColorToken::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl Categorical for MeetingStatus {
    const ALL: &'static [Self] = &[
        MeetingStatus::Scheduled,
        MeetingStatus::InProgress,
        MeetingStatus::Completed,
        MeetingStatus::Cancelled,
    ];

    fn code(self) -> i32 {
        match self {
            MeetingStatus::Scheduled => 0,
            MeetingStatus::InProgress => 1,
            MeetingStatus::Completed => 2,
            MeetingStatus::Cancelled => 3,
        }
    }

    fn badge(self) -> Badge {
        match self {
            MeetingStatus::Scheduled => Badge::new("Scheduled", ColorToken::Blue),
            MeetingStatus::InProgress => Badge::new("In progress", ColorToken::Yellow),
            MeetingStatus::Completed => Badge::new("Completed", ColorToken::Green),
            MeetingStatus::Cancelled => Badge::new("Cancelled", ColorToken::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Draft,
    Submitted,
    Acknowledged,
}

impl Categorical for ReviewStatus {
    const ALL: &'static [Self] = &[
        ReviewStatus::Draft,
        ReviewStatus::Submitted,
        ReviewStatus::Acknowledged,
    ];

    fn code(self) -> i32 {
        match self {
            ReviewStatus::Draft => 0,
            ReviewStatus::Submitted => 1,
            ReviewStatus::Acknowledged => 2,
        }
    }

    fn badge(self) -> Badge {
        match self {
            ReviewStatus::Draft => Badge::new("Draft", ColorToken::Gray),
            ReviewStatus::Submitted => Badge::new("Submitted", ColorToken::Blue),
            ReviewStatus::Acknowledged => Badge::new("Acknowledged", ColorToken::Green),
        }
    }
}

pub fn rating_badge(rating: f64) -> Badge {
    if !rating.is_finite() {
        return Badge::unknown();
    }
    if rating < 2.5 {
        Badge::new("Needs improvement", ColorToken::Red)
    } else if rating < 3.5 {
        Badge::new("Meets expectations", ColorToken::Yellow)
    } else if rating < 4.5 {
        Badge::new("Exceeds", ColorToken::Blue)
    } else {
        Badge::new("Outstanding", ColorToken::Green)
    }
}
