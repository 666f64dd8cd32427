use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{load_config_from, AppConfig, ConfigError, ENV_API_URL, ENV_PAGE_SIZE};
use crate::domain::entities::dates::{
    format_display_date, inclusive_day_count, inclusive_day_count_str, DateError,
};
use crate::domain::entities::hr::{
    assignable_employees, Employee, Equipment, LeaveRequest, Meeting, PerformanceReview,
};
use crate::domain::entities::mutation::Mutation;
use crate::domain::entities::query::{
    apply_action, QueryAction, QueryController, QueryState, SortDirection,
};
use crate::domain::entities::row::{column_keys, FieldKey, FieldValue, Row, RowId, SortKey};
use crate::domain::entities::status::{
    map_status, rating_badge, Badge, Categorical, ColorToken, EmploymentType, EquipmentCategory,
    EquipmentCondition, LeaveStatus, MeetingStatus, ReviewStatus, StatusTable,
};
use crate::domain::entities::table::{ActionKind, Cell, ManagedRow};
use crate::infra::http::client::{ApiConfig, RestClient};
use crate::infra::http::rest::{RestMutations, RestRowSource};
use crate::usecase::ports::source::{MutationPort, RowSource, SourceError};
use crate::usecase::services::mutation_service::{
    MutationOutcome, MutationService, NotificationLevel,
};
use crate::usecase::services::projector::{project, project_page, ProjectionCache};
use crate::usecase::services::view_model::{
    load_rows, FetchOutcome, LoadState, ViewModel, SEARCH_SETTLE,
};
use crate::{page_size_options, pager_label, sort_indicator};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: i64,
    name: String,
    rating: Option<f64>,
}

impl Row for Person {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "rating" => self.rating.map(FieldValue::Number),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Sample {
    id: i64,
    value: Option<FieldValue>,
}

impl Row for Sample {
    fn id(&self) -> RowId {
        RowId(self.id)
    }

    fn display_name(&self) -> &str {
        ""
    }

    fn field(&self, key: &FieldKey) -> Option<FieldValue> {
        match key.as_str() {
            "value" => self.value.clone(),
            _ => None,
        }
    }
}

fn person(id: i64, name: &str, rating: f64) -> Person {
    Person {
        id,
        name: name.to_string(),
        rating: Some(rating),
    }
}

fn ids(rows: &[Person]) -> Vec<i64> {
    rows.iter().map(|row| row.id).collect()
}

fn query(search: &str, sort: Option<(&str, SortDirection)>, page: usize, size: usize) -> QueryState {
    QueryState {
        search_text: search.to_string(),
        sort_field: sort.map(|(field, _)| FieldKey::from(field)),
        sort_direction: sort.map(|(_, direction)| direction),
        page_index: page,
        page_size: size,
    }
}

fn sample_people() -> Vec<Person> {
    vec![
        person(1, "Alice", 4.5),
        person(2, "bob", 2.0),
        person(3, "Alicia", 4.5),
    ]
}

fn employee(id: i64, name: &str, suspended: bool) -> Employee {
    Employee {
        id,
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        department: "Ops".to_string(),
        position: "Analyst".to_string(),
        employment_type: 0,
        hire_date: "2021-09-01".to_string(),
        is_suspended: suspended,
    }
}

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("hr-admin-{prefix}-{nanos}"))
}

#[test]
fn project_without_query_returns_leading_rows_in_order() {
    let rows = sample_people();

    let page = project(&rows, &query("", None, 1, 2));

    assert_eq!(ids(&page), vec![1, 2]);
    assert_eq!(ids(&project(&rows, &query("", None, 1, 10))), vec![1, 2, 3]);
}

#[test]
fn project_filters_case_insensitively_and_keeps_ties_in_descending_sort() {
    let rows = sample_people();

    let page = project(
        &rows,
        &query("ali", Some(("rating", SortDirection::Descending)), 1, 10),
    );

    assert_eq!(ids(&page), vec![1, 3]);
}

#[test]
fn project_second_page_returns_trailing_row() {
    let rows = sample_people();

    let view = project_page(&rows, &query("", None, 2, 2));

    assert_eq!(ids(&view.rows), vec![3]);
    assert_eq!(view.total_filtered, 3);
    assert_eq!(view.page_count, 2);
}

#[test]
fn project_page_past_the_end_is_empty() {
    let rows = sample_people();

    let view = project_page(&rows, &query("", None, 9, 2));

    assert!(view.rows.is_empty());
    assert_eq!(view.total_filtered, 3);
}

#[test]
fn project_sorts_descending_by_comparator_not_by_reversal() {
    let rows = vec![
        person(1, "Cara", 3.0),
        person(2, "Ann", 5.0),
        person(3, "Bea", 3.0),
        person(4, "Dan", 1.0),
    ];

    let ascending = project(&rows, &query("", Some(("rating", SortDirection::Ascending)), 1, 10));
    let descending = project(&rows, &query("", Some(("rating", SortDirection::Descending)), 1, 10));

    assert_eq!(ids(&ascending), vec![4, 1, 3, 2]);
    assert_eq!(ids(&descending), vec![2, 1, 3, 4]);
}

#[test]
fn project_sorts_missing_values_as_baseline_without_dropping_rows() {
    let rows = vec![
        person(1, "Ann", 2.0),
        Person {
            id: 2,
            name: "Ben".to_string(),
            rating: None,
        },
        person(3, "Cy", -1.0),
    ];

    let sorted = project(&rows, &query("", Some(("rating", SortDirection::Ascending)), 1, 10));

    assert_eq!(ids(&sorted), vec![3, 2, 1]);
}

#[test]
fn project_with_unknown_sort_field_keeps_original_order() {
    let rows = sample_people();

    let sorted = project(&rows, &query("", Some(("nope", SortDirection::Descending)), 1, 10));

    assert_eq!(ids(&sorted), vec![1, 2, 3]);
}

#[test]
fn projection_cache_recomputes_only_when_inputs_change() {
    let rows: Arc<[Person]> = Arc::from(sample_people());
    let mut cache = ProjectionCache::default();
    let first_query = query("", None, 1, 10);

    let first = cache.project(&rows, &first_query);
    let again = cache.project(&rows, &first_query);
    assert_eq!(first, again);
    assert_eq!(cache.recomputations(), 1);

    cache.project(&rows, &query("bob", None, 1, 10));
    assert_eq!(cache.recomputations(), 2);

    let replaced: Arc<[Person]> = Arc::from(sample_people());
    cache.project(&replaced, &query("bob", None, 1, 10));
    assert_eq!(cache.recomputations(), 3, "new row store must invalidate");
}

#[test]
fn sort_keys_order_text_case_insensitively() {
    assert_eq!(
        SortKey::new(&FieldValue::from("alice")),
        SortKey::new(&FieldValue::from("ALICE"))
    );
    assert!(SortKey::new(&FieldValue::from("ALICE")) < SortKey::new(&FieldValue::from("Bob")));
}

#[test]
fn column_keys_fill_gaps_with_the_column_baseline() {
    let keys = column_keys(vec![None, Some(FieldValue::from("Bob")), None]);
    assert_eq!(keys[0], SortKey::Text(String::new()));
    assert_eq!(keys[0], keys[2]);
    assert!(keys[0] < keys[1]);

    let flags = column_keys(vec![Some(FieldValue::Flag(false)), None]);
    assert_eq!(flags[0], flags[1]);

    let empty = column_keys(vec![None, None]);
    assert_eq!(empty[0], empty[1]);
}

#[test]
fn column_keys_stay_ordered_across_mixed_kinds() {
    let keys = column_keys(vec![
        None,
        Some(FieldValue::from("")),
        Some(FieldValue::Number(5.0)),
    ]);

    // The first present value is text, so the gap reads as "".
    assert_eq!(keys[0], keys[1]);
    assert!(keys[2] < keys[1]);
    assert!(keys[2] < keys[0]);
}

#[test]
fn set_search_text_resets_page_and_keeps_sort() {
    let mut controller = QueryController::default();
    controller.set_sort("rating", Some(SortDirection::Descending));
    controller.set_page(3, 10);

    controller.set_search_text("ali");

    let state = controller.state();
    assert_eq!(state.search_text, "ali");
    assert_eq!(state.page_index, 1);
    assert_eq!(state.sort_field, Some(FieldKey::from("rating")));
    assert_eq!(state.sort_direction, Some(SortDirection::Descending));
}

#[test]
fn set_sort_cycles_through_directions_for_same_field() {
    let mut controller = QueryController::default();

    controller.set_sort("name", None);
    assert_eq!(controller.state().sort_direction, Some(SortDirection::Ascending));

    controller.set_sort("name", None);
    assert_eq!(controller.state().sort_direction, Some(SortDirection::Descending));

    controller.set_sort("name", None);
    assert_eq!(controller.state().sort_direction, None);
    assert_eq!(controller.state().sort_field, None);

    controller.set_sort("name", None);
    assert_eq!(controller.state().sort_direction, Some(SortDirection::Ascending));
}

#[test]
fn set_sort_on_new_field_starts_ascending_and_keeps_page() {
    let state = QueryState {
        page_index: 4,
        ..QueryState::default()
    };
    let state = apply_action(
        &state,
        QueryAction::SetSort {
            field: "name".into(),
            direction: Some(SortDirection::Descending),
        },
    );

    let next = apply_action(
        &state,
        QueryAction::SetSort {
            field: "rating".into(),
            direction: None,
        },
    );

    assert_eq!(next.sort_field, Some(FieldKey::from("rating")));
    assert_eq!(next.sort_direction, Some(SortDirection::Ascending));
    assert_eq!(next.page_index, 4);
}

#[test]
fn set_page_rejects_non_positive_values() {
    let mut controller = QueryController::default();
    let before = controller.state().clone();

    assert!(!controller.set_page(0, 10));
    assert!(!controller.set_page(-2, 10));
    assert!(!controller.set_page(2, 0));
    assert_eq!(controller.state(), &before);

    assert!(controller.set_page(2, 25));
    assert_eq!(controller.state().page_index, 2);
    assert_eq!(controller.state().page_size, 25);
}

#[test]
fn map_status_unknown_code_returns_fallback() {
    let table: StatusTable = (0..4)
        .map(|code| (code, Badge::new("Known", ColorToken::Blue)))
        .collect();
    let fallback = Badge::unknown();

    assert_eq!(map_status(&table, &fallback, 999), fallback);
    assert_eq!(map_status(&table, &fallback, 2).label, "Known");
}

#[test]
fn categorical_describe_covers_known_and_stale_codes() {
    assert_eq!(
        LeaveStatus::describe(1),
        Badge::new("Approved", ColorToken::Green)
    );
    assert_eq!(EmploymentType::describe(3).label, "Intern");
    assert_eq!(EquipmentCondition::describe(-1), Badge::unknown());
    assert_eq!(MeetingStatus::describe(i32::MAX), Badge::unknown());
    assert_eq!(ReviewStatus::describe(2).color, ColorToken::Green);
    assert_eq!(
        EquipmentCategory::from_code(3),
        Some(EquipmentCategory::Peripheral)
    );
}

#[test]
fn categorical_tables_cover_every_variant() {
    for variant in LeaveStatus::ALL {
        assert_eq!(LeaveStatus::from_code(variant.code()), Some(*variant));
    }
    assert_eq!(EquipmentCondition::table().len(), EquipmentCondition::ALL.len());
    assert_eq!(EmploymentType::table().len(), 4);
}

#[test]
fn equipment_category_icon_falls_back_for_unknown_codes() {
    assert_eq!(EquipmentCategory::icon_for(0), "laptop");
    assert_eq!(EquipmentCategory::icon_for(42), "box");
    assert_eq!(EquipmentCategory::icon_for(-7), "box");
}

#[test]
fn rating_badge_bands_scores() {
    assert_eq!(rating_badge(1.0).label, "Needs improvement");
    assert_eq!(rating_badge(3.0).label, "Meets expectations");
    assert_eq!(rating_badge(4.0).label, "Exceeds");
    assert_eq!(rating_badge(4.5).label, "Outstanding");
    assert_eq!(rating_badge(f64::NAN), Badge::unknown());
}

#[test]
fn inclusive_day_count_counts_both_ends() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");

    assert_eq!(inclusive_day_count(start, start), Ok(1));
    assert_eq!(inclusive_day_count(start, end), Ok(5));
    assert_eq!(inclusive_day_count_str("2024-02-28", "2024-03-01"), Ok(3));
    assert!(matches!(
        inclusive_day_count(end, start),
        Err(DateError::Reversed { .. })
    ));
    assert!(matches!(
        inclusive_day_count_str("2024-13-01", "2024-12-01"),
        Err(DateError::Invalid(_))
    ));
}

#[test]
fn format_display_date_falls_back_to_raw_text() {
    assert_eq!(format_display_date("2024-01-05"), "Jan 5, 2024");
    assert_eq!(format_display_date("next week"), "next week");
    assert_eq!(format_display_date(""), "");
}

#[test]
fn leave_request_days_derive_from_dates() {
    let request: LeaveRequest = serde_json::from_value(json!({
        "id": 7,
        "employeeName": "Dana",
        "leaveType": 1,
        "status": 0,
        "startDate": "2024-06-10",
        "endDate": "2024-06-14"
    }))
    .expect("leave request should decode");

    assert_eq!(request.days(), Some(5));
    assert_eq!(
        request.field(&FieldKey::from("days")),
        Some(FieldValue::Number(5.0))
    );

    let reversed = LeaveRequest {
        end_date: "2024-06-01".to_string(),
        ..request
    };
    assert_eq!(reversed.days(), None);
}

#[test]
fn pending_leave_offers_approve_and_reject() {
    let request = LeaveRequest {
        id: 3,
        employee_name: "Eve".to_string(),
        leave_type: 0,
        status: LeaveStatus::Pending.code(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-01-02".to_string(),
        reason: String::new(),
    };

    let labels: Vec<&str> = request.actions().iter().map(|action| action.label).collect();

    assert_eq!(labels, vec!["Approve", "Reject", "Edit", "Delete"]);
}

#[test]
fn employee_cells_render_unknown_type_with_fallback_badge() {
    let employee = Employee {
        id: 1,
        full_name: "Frank".to_string(),
        email: "frank@example.com".to_string(),
        department: "Ops".to_string(),
        position: "Lead".to_string(),
        employment_type: 17,
        hire_date: "2020-02-02".to_string(),
        is_suspended: true,
    };

    let cells = employee.cells();

    assert_eq!(cells.len(), Employee::columns().len());
    assert_eq!(cells[4], Cell::Badge(Badge::unknown()));
    assert_eq!(cells[5], Cell::Text("Feb 2, 2020".to_string()));
    assert_eq!(employee.actions()[0].label, "Unsuspend");
}

#[test]
fn equipment_offers_assign_until_assigned() {
    let mut laptop = Equipment {
        id: 2,
        name: "ThinkPad".to_string(),
        serial_number: "TP-2".to_string(),
        category: 0,
        condition: 0,
        assigned_to: None,
        purchase_date: "2023-05-01".to_string(),
    };

    let actions = laptop.actions();
    let labels: Vec<&str> = actions.iter().map(|action| action.label).collect();
    assert_eq!(labels, vec!["Assign", "Edit", "Delete"]);
    assert_eq!(actions[0].kind, ActionKind::Assign { equipment: RowId(2) });

    laptop.assigned_to = Some("Ivy".to_string());
    assert_eq!(
        laptop.actions()[0].kind,
        ActionKind::Run(Mutation::Unassign { equipment: RowId(2) })
    );
}

#[test]
fn edit_form_sends_only_changed_fields() {
    let mut form = employee(1, "Frank", false).edit_form();
    assert_eq!(form.to_mutation(), None);

    assert!(form.set("email", "frank@corp.example"));
    assert!(!form.set("salary", "1"));

    assert_eq!(
        form.to_mutation(),
        Some(Mutation::Edit {
            resource: "employees",
            id: RowId(1),
            changes: json!({ "email": "frank@corp.example" }),
        })
    );
}

#[test]
fn meeting_rows_offer_edit_and_delete() {
    let meeting = Meeting {
        id: 8,
        title: "Sync".to_string(),
        organizer: "Gia".to_string(),
        date: "2024-04-02".to_string(),
        start_time: "09:30".to_string(),
        location: "Room 1".to_string(),
        status: 0,
    };

    let actions = meeting.actions();
    let labels: Vec<&str> = actions.iter().map(|action| action.label).collect();
    assert_eq!(labels, vec!["Edit", "Delete"]);

    let ActionKind::Edit(mut form) = actions[0].kind.clone() else {
        panic!("first action should open the edit form");
    };
    form.set("location", "Room 2");
    assert_eq!(
        serde_json::Value::Object(form.changes()),
        json!({ "location": "Room 2" })
    );
}

#[test]
fn assignable_employees_skip_suspended_and_sort_by_name() {
    let staff = vec![
        employee(1, "zoe", false),
        employee(2, "Adam", true),
        employee(3, "Bea", false),
    ];

    let ids: Vec<i64> = assignable_employees(&staff)
        .iter()
        .map(|employee| employee.id)
        .collect();

    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn review_rating_sorts_missing_scores_first() {
    let reviews = vec![
        PerformanceReview {
            id: 1,
            employee_name: "Gia".to_string(),
            reviewer: String::new(),
            period: "2024 H1".to_string(),
            rating: Some(3.0),
            status: 1,
        },
        PerformanceReview {
            id: 2,
            employee_name: "Hal".to_string(),
            reviewer: String::new(),
            period: "2024 H1".to_string(),
            rating: None,
            status: 0,
        },
    ];

    let sorted = project(
        &reviews,
        &QueryState {
            sort_field: Some("rating".into()),
            sort_direction: Some(SortDirection::Ascending),
            ..QueryState::default()
        },
    );

    assert_eq!(sorted[0].id, 2);
}

#[test]
fn complete_fetch_applies_latest_ticket() {
    let mut view = ViewModel::<Person>::default();
    let ticket = view.begin_fetch();
    assert_eq!(view.load_state(), &LoadState::Loading);

    let outcome = view.complete_fetch(&ticket, Ok(sample_people()));

    assert_eq!(outcome, FetchOutcome::Applied(3));
    assert_eq!(view.store().rows().len(), 3);
    assert_eq!(view.load_state(), &LoadState::Loaded);
}

#[test]
fn stale_fetch_never_overwrites_newer_result() {
    let mut view = ViewModel::<Person>::default();
    let older = view.begin_fetch();
    let newer = view.begin_fetch();

    assert_eq!(
        view.complete_fetch(&newer, Ok(vec![person(9, "Newest", 1.0)])),
        FetchOutcome::Applied(1)
    );
    assert_eq!(
        view.complete_fetch(&older, Ok(sample_people())),
        FetchOutcome::Stale
    );

    assert_eq!(ids(view.store().rows()), vec![9]);
}

#[test]
fn superseded_fetch_is_discarded_even_when_it_finishes_first() {
    let mut view = ViewModel::<Person>::default();
    let older = view.begin_fetch();
    let newer = view.begin_fetch();

    assert_eq!(
        view.complete_fetch(&older, Ok(sample_people())),
        FetchOutcome::Stale
    );
    assert!(view.store().rows().is_empty());
    assert_eq!(
        view.complete_fetch(&newer, Ok(sample_people())),
        FetchOutcome::Applied(3)
    );
}

#[test]
fn unmounted_view_ignores_in_flight_results() {
    let mut view = ViewModel::<Person>::default();
    let ticket = view.begin_fetch();

    view.unmount();

    assert!(ticket.is_cancelled());
    assert_eq!(
        view.complete_fetch(&ticket, Ok(sample_people())),
        FetchOutcome::Unmounted
    );
    assert!(view.store().rows().is_empty());
}

#[test]
fn failed_fetch_keeps_previous_rows() {
    let mut view = ViewModel::<Person>::default();
    let first = view.begin_fetch();
    view.complete_fetch(&first, Ok(sample_people()));

    let second = view.begin_fetch();
    let outcome = view.complete_fetch(
        &second,
        Err(SourceError::Transport("connection refused".to_string())),
    );

    assert!(matches!(outcome, FetchOutcome::Failed(_)));
    assert_eq!(view.store().rows().len(), 3);
    assert!(matches!(view.load_state(), LoadState::Failed(message) if message.contains("refused")));
}

#[test]
fn staged_search_only_applies_latest_ticket() {
    let mut view = ViewModel::<Person>::default();
    view.query_mut().set_page(3, 10);

    let first = view.stage_search("al");
    let second = view.stage_search("ali");

    assert_eq!(view.search_draft(), "ali");
    assert_eq!(view.query().search_text, "");
    assert!(!view.commit_search(first));
    assert_eq!(view.query().search_text, "");
    assert!(view.commit_search(second));
    assert_eq!(view.query().search_text, "ali");
    assert_eq!(view.query().page_index, 1);

    let late = view.stage_search("alice");
    view.unmount();
    assert!(!view.commit_search(late));
    assert_eq!(view.query().search_text, "ali");
}

#[tokio::test]
async fn settled_search_applies_only_the_last_keystroke() {
    let view = Arc::new(Mutex::new(ViewModel::<Person>::default()));
    let mut tasks = Vec::new();
    for text in ["a", "al", "ali"] {
        let ticket = view
            .lock()
            .expect("lock should not be poisoned")
            .stage_search(text);
        let view = view.clone();
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(SEARCH_SETTLE).await;
            let applied = view
                .lock()
                .expect("lock should not be poisoned")
                .commit_search(ticket);
            applied
        }));
    }

    let mut applied = Vec::new();
    for task in tasks {
        applied.push(task.await.expect("task should not panic"));
    }

    assert_eq!(applied, vec![false, false, true]);
    assert_eq!(
        view.lock()
            .expect("lock should not be poisoned")
            .query()
            .search_text,
        "ali"
    );
}

struct StaticSource(Vec<Person>);

#[async_trait]
impl RowSource<Person> for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Person>, SourceError> {
        Ok(self.0.clone())
    }
}

struct PendingSource;

#[async_trait]
impl RowSource<Person> for PendingSource {
    async fn fetch_all(&self) -> Result<Vec<Person>, SourceError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn load_rows_returns_source_rows() {
    let mut view = ViewModel::<Person>::default();
    let ticket = view.begin_fetch();

    let rows = load_rows(&StaticSource(sample_people()), &ticket)
        .await
        .expect("fetch should succeed");

    assert_eq!(view.complete_fetch(&ticket, Ok(rows)), FetchOutcome::Applied(3));
}

#[tokio::test]
async fn load_rows_stops_when_view_unmounts() {
    let mut view = ViewModel::<Person>::default();
    let ticket = view.begin_fetch();

    let pending = tokio::spawn({
        let ticket = ticket.clone();
        async move { load_rows(&PendingSource, &ticket).await }
    });
    view.unmount();

    let result = tokio::time::timeout(Duration::from_secs(2), pending)
        .await
        .expect("cancelled fetch should finish promptly")
        .expect("task should not panic");

    assert_eq!(result, Err(SourceError::Cancelled));
    assert!(view.is_unmounted());
}

struct RecordingPort {
    fail: bool,
    seen: Mutex<Vec<Mutation>>,
}

#[async_trait]
impl MutationPort for RecordingPort {
    async fn apply(&self, mutation: &Mutation) -> Result<(), SourceError> {
        self.seen
            .lock()
            .expect("lock should not be poisoned")
            .push(mutation.clone());
        if self.fail {
            Err(SourceError::Status {
                code: 409,
                message: "already assigned".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn successful_mutation_invalidates_view() {
    let port = Arc::new(RecordingPort {
        fail: false,
        seen: Mutex::new(Vec::new()),
    });
    let service = MutationService::new(port.clone());
    let mutation = Mutation::Suspend {
        employee: RowId(4),
        suspended: true,
    };

    let outcome = service.run(&mutation).await;

    assert_eq!(outcome, MutationOutcome::Invalidate);
    assert_eq!(
        port.seen.lock().expect("lock should not be poisoned").as_slice(),
        &[mutation]
    );
}

#[tokio::test]
async fn failed_mutation_reports_notification() {
    let service = MutationService::new(Arc::new(RecordingPort {
        fail: true,
        seen: Mutex::new(Vec::new()),
    }));

    let outcome = service
        .run(&Mutation::Assign {
            equipment: RowId(2),
            employee: RowId(5),
        })
        .await;

    match outcome {
        MutationOutcome::Notify(note) => {
            assert_eq!(note.level, NotificationLevel::Error);
            assert!(note.message.contains("assign equipment #2"));
            assert!(note.message.contains("409"));
        }
        other => panic!("expected notification, got {other:?}"),
    }
}

fn client_for(server: &MockServer) -> Arc<RestClient> {
    Arc::new(
        RestClient::new(ApiConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .expect("client should build"),
    )
}

#[tokio::test]
async fn rest_source_decodes_rows_with_stale_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/equipment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "ThinkPad",
                "serialNumber": "TP-1",
                "category": 0,
                "condition": 1,
                "assignedTo": "Ivy",
                "purchaseDate": "2023-05-01"
            },
            { "id": 2, "name": "Desk", "category": 99, "condition": -3 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = RestRowSource::<Equipment>::new(client_for(&server));
    let rows = source.fetch_all().await.expect("fetch should succeed");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].assigned_to.as_deref(), Some("Ivy"));
    assert_eq!(
        rows[1].cells()[2],
        Cell::Icon {
            icon: "box",
            badge: Badge::unknown()
        }
    );
}

#[tokio::test]
async fn rest_source_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let source = RestRowSource::<Employee>::new(client_for(&server));
    let err = source.fetch_all().await.expect_err("fetch should fail");

    assert_eq!(
        err,
        SourceError::Status {
            code: 503,
            message: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn rest_source_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = RestRowSource::<Employee>::new(client_for(&server));
    let err = source.fetch_all().await.expect_err("decode should fail");

    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn rest_mutations_hit_expected_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/employees/4/unsuspend"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/equipment/2/assign"))
        .and(body_json(json!({ "employeeId": 5 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/meetings/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/employees/4"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/leave-requests/3/status"))
        .and(body_json(json!({ "status": 1 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let port = RestMutations::new(client_for(&server));
    let mutations = [
        Mutation::Suspend {
            employee: RowId(4),
            suspended: false,
        },
        Mutation::Assign {
            equipment: RowId(2),
            employee: RowId(5),
        },
        Mutation::Delete {
            resource: "meetings",
            id: RowId(8),
        },
        Mutation::Edit {
            resource: "employees",
            id: RowId(4),
            changes: json!({ "email": "new@example.com" }),
        },
        Mutation::SetLeaveStatus {
            id: RowId(3),
            status: LeaveStatus::Approved.code(),
        },
    ];

    for mutation in &mutations {
        port.apply(mutation)
            .await
            .unwrap_or_else(|err| panic!("{} should succeed: {err}", mutation.describe()));
    }
}

#[test]
fn config_defaults_when_file_is_missing() {
    let temp_dir = unique_test_dir("config-missing");

    let config = load_config_from(&temp_dir.join("config.json")).expect("load should succeed");

    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_reads_partial_file() {
    let temp_dir = unique_test_dir("config-partial");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let config_path = temp_dir.join("config.json");
    fs::write(&config_path, r#"{ "page_size": 25, "log_filter": "debug" }"#)
        .expect("should write config");

    let config = load_config_from(&config_path).expect("load should succeed");

    assert_eq!(config.page_size, 25);
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.api_base_url, AppConfig::default().api_base_url);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn config_rejects_zero_page_size() {
    let result = AppConfig::from_json(r#"{ "page_size": 0 }"#);

    assert!(result.is_err(), "zero page size should be rejected");
}

#[test]
fn config_env_overrides_apply() {
    let config = AppConfig::default()
        .apply_env(|key| match key {
            ENV_API_URL => Some("https://hr.example.com/api/".to_string()),
            ENV_PAGE_SIZE => Some("50".to_string()),
            _ => None,
        })
        .expect("overrides should apply");

    assert_eq!(config.page_size, 50);
    assert_eq!(config.api().base_url, "https://hr.example.com/api");

    let invalid = AppConfig::default().apply_env(|key| {
        (key == ENV_PAGE_SIZE).then(|| "many".to_string())
    });
    assert!(matches!(invalid, Err(ConfigError::InvalidEnv { .. })));
}

#[test]
fn pager_label_describes_position() {
    assert_eq!(pager_label(1, 0, 0), "No results");
    assert_eq!(pager_label(1, 1, 1), "Page 1 of 1 (1 result)");
    assert_eq!(pager_label(2, 3, 25), "Page 2 of 3 (25 results)");
}

#[test]
fn sort_indicator_marks_direction() {
    assert_eq!(sort_indicator(Some(SortDirection::Ascending)), " ▲");
    assert_eq!(sort_indicator(Some(SortDirection::Descending)), " ▼");
    assert_eq!(sort_indicator(None), "");
}

#[test]
fn page_size_options_include_configured_size() {
    assert_eq!(page_size_options(25), vec![10, 25, 50, 100]);
    assert_eq!(page_size_options(20), vec![10, 20, 25, 50, 100]);
    assert_eq!(page_size_options(500), vec![10, 25, 50, 100, 500]);
}

fn arb_people() -> impl Strategy<Value = Vec<Person>> {
    prop::collection::vec(("[a-cA-C]{0,4}", 0u8..4), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (name, rating))| Person {
                id: idx as i64,
                name,
                rating: Some(f64::from(rating)),
            })
            .collect()
    })
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn arb_field_value() -> impl Strategy<Value = Option<FieldValue>> {
    prop_oneof![
        Just(None),
        any::<bool>().prop_map(|flag| Some(FieldValue::Flag(flag))),
        (-3i32..3).prop_map(|number| Some(FieldValue::from(number))),
        "[a-bA-B]{0,2}".prop_map(|text| Some(FieldValue::Text(text))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_filter_keeps_exactly_matching_rows(rows in arb_people(), needle in "[a-cA-C]{0,2}") {
        let result = project(&rows, &query(&needle, None, 1, usize::MAX));
        let lowered = needle.to_lowercase();

        for row in &rows {
            let matches = row.name.to_lowercase().contains(&lowered);
            prop_assert_eq!(result.contains(row), matches);
        }
    }

    #[test]
    fn prop_pages_partition_the_sorted_rows(
        rows in arb_people(),
        needle in "[a-c]{0,1}",
        direction in arb_direction(),
        page_size in 1usize..7,
    ) {
        let sort = Some(("rating", direction));
        let everything = project(&rows, &query(&needle, sort, 1, usize::MAX));
        let page_count = everything.len().div_ceil(page_size);

        let mut stitched = Vec::new();
        for page in 1..=page_count {
            stitched.extend(project(&rows, &query(&needle, sort, page, page_size)));
        }

        prop_assert_eq!(stitched, everything);
        let past_end = project(&rows, &query(&needle, sort, page_count + 1, page_size));
        prop_assert!(past_end.is_empty());
    }

    #[test]
    fn prop_sort_ties_keep_input_order(rows in arb_people(), direction in arb_direction()) {
        let sorted = project(&rows, &query("", Some(("rating", direction)), 1, usize::MAX));

        for pair in sorted.windows(2) {
            if pair[0].rating == pair[1].rating {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_project_is_deterministic(rows in arb_people(), needle in "[a-c]{0,2}") {
        let state = query(&needle, Some(("name", SortDirection::Descending)), 1, 5);
        prop_assert_eq!(project(&rows, &state), project(&rows, &state));
    }

    #[test]
    fn prop_column_keys_are_transitive(values in prop::collection::vec(arb_field_value(), 0..10)) {
        let keys = column_keys(values);

        for a in &keys {
            for b in &keys {
                for c in &keys {
                    if a <= b && b <= c {
                        prop_assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_mixed_kind_sort_is_ordered(
        values in prop::collection::vec(arb_field_value(), 0..60),
        direction in arb_direction(),
    ) {
        let rows: Vec<Sample> = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| Sample { id: idx as i64, value })
            .collect();
        let keys = column_keys(rows.iter().map(|row| row.value.clone()).collect());

        let sorted = project(&rows, &query("", Some(("value", direction)), 1, usize::MAX));

        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let first = &keys[pair[0].id as usize];
            let second = &keys[pair[1].id as usize];
            match direction {
                SortDirection::Ascending => prop_assert!(first <= second),
                SortDirection::Descending => prop_assert!(first >= second),
            }
        }
    }

    #[test]
    fn prop_map_status_is_total(code in any::<i32>()) {
        let badge = LeaveStatus::describe(code);
        match LeaveStatus::from_code(code) {
            Some(status) => prop_assert_eq!(badge, status.badge()),
            None => prop_assert_eq!(badge, Badge::unknown()),
        }
        let _ = EmploymentType::describe(code);
        let _ = EquipmentCategory::icon_for(code);
    }
}
