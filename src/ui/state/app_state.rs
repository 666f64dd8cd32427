use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::infra::http::client::RestClient;
use crate::usecase::services::mutation_service::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Equipment,
    Leave,
    Meetings,
    Reviews,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Employees,
        Tab::Equipment,
        Tab::Leave,
        Tab::Meetings,
        Tab::Reviews,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Employees => "Employees",
            Tab::Equipment => "Equipment",
            Tab::Leave => "Leave",
            Tab::Meetings => "Meetings",
            Tab::Reviews => "Reviews",
        }
    }
}

/// Shared with every management view through the context API.
#[derive(Clone)]
pub struct Services {
    pub client: Arc<RestClient>,
    pub page_size: usize,
}

pub struct AppState {
    pub active_tab: Signal<Tab>,
    pub notification: Signal<Option<Notification>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: use_signal(|| Tab::Employees),
            notification: use_signal(|| None::<Notification>),
        }
    }
}
