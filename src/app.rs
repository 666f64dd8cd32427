use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::entities::hr::{
    assignable_employees, Employee, Equipment, LeaveRequest, Meeting, PerformanceReview,
};
use crate::domain::entities::mutation::Mutation;
use crate::domain::entities::query::QueryState;
use crate::domain::entities::row::RowId;
use crate::domain::entities::status::Badge;
use crate::domain::entities::table::{ActionKind, Cell, EditForm, ManagedRow, RowAction};
use crate::infra::http::rest::{RestMutations, RestRowSource};
use crate::ui::state::app_state::{AppState, Services, Tab};
use crate::usecase::ports::source::RowSource;
use crate::usecase::services::mutation_service::{
    MutationOutcome, MutationService, Notification, NotificationLevel,
};
use crate::usecase::services::projector::ProjectionCache;
use crate::usecase::services::view_model::{
    load_rows, FetchOutcome, LoadState, SearchTicket, ViewModel, SEARCH_SETTLE,
};
use crate::{page_size_options, pager_label, sort_indicator};

const OVERLAY_STYLE: &str = "position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(15,23,42,0.35);";
const PANEL_STYLE: &str = "min-width: 320px; max-width: 480px; padding: 16px; border-radius: 8px; background: #fff; box-shadow: 0 10px 24px rgba(0,0,0,0.2);";

#[component]
pub fn App() -> Element {
    let AppState {
        mut active_tab,
        mut notification,
    } = AppState::new();
    use_context_provider(|| notification);

    let current_tab = active_tab();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            nav {
                style: "display: flex; gap: 4px; padding: 8px 12px; border-bottom: 1px solid #ddd;",
                for tab in Tab::ALL {
                    button {
                        key: "{tab:?}",
                        style: if tab == current_tab {
                            "border: none; border-bottom: 2px solid #2563eb; background: none; padding: 6px 12px; font-weight: 600;"
                        } else {
                            "border: none; background: none; padding: 6px 12px; cursor: pointer;"
                        },
                        onclick: move |_| active_tab.set(tab),
                        {tab.label()}
                    }
                }
            }
            main {
                style: "flex: 1; overflow: auto; padding: 12px;",
                {match current_tab {
                    Tab::Employees => rsx! { EmployeesTab {} },
                    Tab::Equipment => rsx! { EquipmentTab {} },
                    Tab::Leave => rsx! { LeaveTab {} },
                    Tab::Meetings => rsx! { MeetingsTab {} },
                    Tab::Reviews => rsx! { ReviewsTab {} },
                }}
            }
            if let Some(note) = notification() {
                Toast { note, on_close: move |_| notification.set(None) }
            }
        }
    }
}

#[component]
fn Toast(note: Notification, on_close: EventHandler<()>) -> Element {
    let background = toast_background(note.level);
    rsx! {
        div {
            style: "position: fixed; right: 16px; bottom: 16px; max-width: 360px; padding: 10px 14px; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); background: {background};",
            span { "{note.message}" }
            button {
                style: "margin-left: 12px; border: none; background: none; cursor: pointer;",
                onclick: move |_| on_close.call(()),
                "×"
            }
        }
    }
}

fn toast_background(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "#ecfdf5",
        NotificationLevel::Error => "#fef2f2",
    }
}

#[component]
fn EmployeesTab() -> Element {
    management_view::<Employee>()
}

#[component]
fn EquipmentTab() -> Element {
    management_view::<Equipment>()
}

#[component]
fn LeaveTab() -> Element {
    management_view::<LeaveRequest>()
}

#[component]
fn MeetingsTab() -> Element {
    management_view::<Meeting>()
}

#[component]
fn ReviewsTab() -> Element {
    management_view::<PerformanceReview>()
}

fn start_fetch<R: Debug + 'static>(
    mut view: Signal<ViewModel<R>>,
    source: Arc<dyn RowSource<R>>,
    mut notification: Signal<Option<Notification>>,
) {
    let ticket = view.write().begin_fetch();
    spawn(async move {
        let result = load_rows(source.as_ref(), &ticket).await;
        if ticket.is_cancelled() {
            return;
        }
        let outcome = view.write().complete_fetch(&ticket, result);
        debug!(seq = ticket.seq(), ?outcome, "fetch finished");
        if let FetchOutcome::Failed(message) = outcome {
            notification.set(Some(Notification::error(format!(
                "Failed to load data: {message}"
            ))));
        }
    });
}

fn settle_search<R: 'static>(mut view: Signal<ViewModel<R>>, ticket: SearchTicket) {
    spawn(async move {
        tokio::time::sleep(SEARCH_SETTLE).await;
        view.write().commit_search(ticket);
    });
}

fn unmount_view<R: 'static>(mut view: Signal<ViewModel<R>>) {
    if let Ok(mut model) = view.try_write() {
        model.unmount();
    }
}

fn confirm_mutation(mutation: &Mutation) -> bool {
    if !mutation.is_destructive() {
        return true;
    }
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Confirm")
        .set_description(format!("Are you sure you want to {}?", mutation.describe()))
        .set_buttons(MessageButtons::YesNo)
        .show();
    answer == MessageDialogResult::Yes
}

fn management_view<R>() -> Element
where
    R: ManagedRow + DeserializeOwned + Debug + Send + Sync,
{
    let services = use_context::<Services>();
    let notification = use_context::<Signal<Option<Notification>>>();
    let mut view = use_signal(|| ViewModel::<R>::new(QueryState::with_page_size(services.page_size)));
    let cache = use_hook(|| Rc::new(RefCell::new(ProjectionCache::<R>::default())));
    let source = use_hook(|| {
        Arc::new(RestRowSource::<R>::new(services.client.clone())) as Arc<dyn RowSource<R>>
    });
    let mutations = use_hook(|| {
        Arc::new(MutationService::new(Arc::new(RestMutations::new(
            services.client.clone(),
        ))))
    });

    let mut pending = use_signal(|| None::<ActionKind>);

    let source_for_mount = source.clone();
    use_effect(move || start_fetch(view, source_for_mount.clone(), notification));
    use_drop(move || unmount_view(view));

    let source_for_refresh = source.clone();
    let refresh = use_callback(move |_: ()| {
        start_fetch(view, source_for_refresh.clone(), notification)
    });

    let run_mutation = use_callback(move |mutation: Mutation| {
        if !confirm_mutation(&mutation) {
            return;
        }
        let mutations = mutations.clone();
        let mut notification = notification;
        spawn(async move {
            match mutations.run(&mutation).await {
                MutationOutcome::Invalidate => {
                    notification.set(Some(Notification::info(format!(
                        "Done: {}",
                        mutation.describe()
                    ))));
                    refresh.call(());
                }
                MutationOutcome::Notify(note) => notification.set(Some(note)),
            }
        });
    });

    let on_action = use_callback(move |kind: ActionKind| match kind {
        ActionKind::Run(mutation) => run_mutation.call(mutation),
        other => pending.set(Some(other)),
    });

    let query = view.read().query().clone();
    let search_text = view.read().search_draft().to_string();
    let rows = view.read().store().rows().clone();
    let load = view.read().load_state().clone();
    let page = cache.borrow_mut().project(&rows, &query);
    let dialog = pending();

    let title = R::TITLE;
    let busy = load == LoadState::Loading;
    let page_index = query.page_index;
    let page_size = query.page_size;
    let page_count = page.page_count;
    let pager = pager_label(page_index, page_count, page.total_filtered);
    let column_count = R::columns().len() + 1;
    let headers: Vec<HeaderCell> = R::columns()
        .iter()
        .map(|column| HeaderCell {
            key: column.key,
            label: format!(
                "{}{}",
                column.title,
                header_indicator(column.key, &query)
            ),
            sortable: column.sortable,
        })
        .collect();
    let rendered: Vec<RenderedRow> = page
        .rows
        .iter()
        .map(|row| RenderedRow {
            id: row.id().0,
            cells: row.cells(),
            actions: row.actions(),
        })
        .collect();

    rsx! {
        section {
            div {
                style: "display: flex; align-items: center; gap: 12px; margin-bottom: 12px;",
                h2 { style: "margin: 0; font-size: 18px;", "{title}" }
                input {
                    r#type: "search",
                    placeholder: "Search by name",
                    value: "{search_text}",
                    style: "flex: 1; max-width: 320px; padding: 4px 8px;",
                    oninput: move |event| {
                        let ticket = view.write().stage_search(event.value());
                        settle_search(view, ticket);
                    },
                }
                button {
                    disabled: busy,
                    onclick: move |_| refresh.call(()),
                    if busy { "Loading…" } else { "Refresh" }
                }
            }
            if let LoadState::Failed(message) = load {
                p { style: "color: #b91c1c;", "Could not load {title}: {message}" }
            }
            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        for header in headers {
                            th {
                                key: "{header.key}",
                                style: if header.sortable {
                                    "position: sticky; top: 0; background: #f8fafc; text-align: left; padding: 6px 8px; border-bottom: 1px solid #ddd; cursor: pointer;"
                                } else {
                                    "position: sticky; top: 0; background: #f8fafc; text-align: left; padding: 6px 8px; border-bottom: 1px solid #ddd;"
                                },
                                onclick: move |_| {
                                    if header.sortable {
                                        view.write().query_mut().set_sort(header.key, None);
                                    }
                                },
                                "{header.label}"
                            }
                        }
                        th { style: "border-bottom: 1px solid #ddd;" }
                    }
                }
                tbody {
                    if rendered.is_empty() {
                        tr {
                            td {
                                colspan: "{column_count}",
                                style: "padding: 16px; text-align: center; color: #6b7280;",
                                if busy { "Loading…" } else { "No records" }
                            }
                        }
                    }
                    for row in rendered {
                        tr {
                            key: "{row.id}",
                            for (idx, cell) in row.cells.into_iter().enumerate() {
                                td {
                                    key: "{idx}",
                                    style: "padding: 6px 8px; border-bottom: 1px solid #f1f5f9;",
                                    CellView { cell }
                                }
                            }
                            td {
                                style: "padding: 6px 8px; border-bottom: 1px solid #f1f5f9; white-space: nowrap;",
                                for action in row.actions {
                                    ActionButton { key: "{action.label}", action, on_run: on_action }
                                }
                            }
                        }
                    }
                }
            }
            div {
                style: "display: flex; align-items: center; gap: 8px; margin-top: 12px;",
                button {
                    disabled: page_index <= 1,
                    onclick: move |_| {
                        view.write().query_mut().set_page(page_index as i64 - 1, page_size as i64);
                    },
                    "‹"
                }
                span { "{pager}" }
                button {
                    disabled: page_index >= page_count,
                    onclick: move |_| {
                        view.write().query_mut().set_page(page_index as i64 + 1, page_size as i64);
                    },
                    "›"
                }
                select {
                    value: "{page_size}",
                    onchange: move |event| {
                        let size = event.value().parse::<i64>().unwrap_or(0);
                        view.write().query_mut().set_page(1, size);
                    },
                    for size in page_size_options(page_size) {
                        option { key: "{size}", value: "{size}", "{size} / page" }
                    }
                }
            }
            {match dialog {
                Some(ActionKind::Edit(form)) => rsx! {
                    EditDialog {
                        form,
                        on_submit: move |mutation| {
                            pending.set(None);
                            run_mutation.call(mutation);
                        },
                        on_cancel: move |_| pending.set(None),
                    }
                },
                Some(ActionKind::Assign { equipment }) => rsx! {
                    AssignDialog {
                        equipment,
                        on_submit: move |mutation| {
                            pending.set(None);
                            run_mutation.call(mutation);
                        },
                        on_cancel: move |_| pending.set(None),
                    }
                },
                _ => rsx! {},
            }}
        }
    }
}

struct HeaderCell {
    key: &'static str,
    label: String,
    sortable: bool,
}

struct RenderedRow {
    id: i64,
    cells: Vec<Cell>,
    actions: Vec<RowAction>,
}

fn header_indicator(key: &str, query: &QueryState) -> &'static str {
    match query.sort() {
        Some((field, direction)) if field.as_str() == key => sort_indicator(Some(direction)),
        _ => "",
    }
}

#[component]
fn StatusBadge(badge: Badge) -> Element {
    let class = badge.color.css_class();
    let background = badge.color.background();
    rsx! {
        span {
            class: "{class}",
            style: "display: inline-block; padding: 2px 8px; border-radius: 999px; font-size: 12px; background: {background};",
            "{badge.label}"
        }
    }
}

#[component]
fn CellView(cell: Cell) -> Element {
    match cell {
        Cell::Text(text) => rsx! { "{text}" },
        Cell::Badge(badge) => rsx! { StatusBadge { badge } },
        Cell::Icon { icon, badge } => rsx! {
            span {
                style: "display: inline-flex; align-items: center; gap: 6px;",
                span { class: "icon icon-{icon}", "data-icon": "{icon}" }
                StatusBadge { badge }
            }
        },
        Cell::Labeled { text, badge } => rsx! {
            span {
                style: "display: inline-flex; align-items: center; gap: 6px;",
                "{text}"
                StatusBadge { badge }
            }
        },
    }
}

#[component]
fn ActionButton(action: RowAction, on_run: Callback<ActionKind>) -> Element {
    let kind = action.kind.clone();
    rsx! {
        button {
            style: "margin-right: 6px; border: 1px solid #bbb; background: #fff; padding: 2px 8px; border-radius: 6px; cursor: pointer;",
            onclick: move |_| on_run.call(kind.clone()),
            "{action.label}"
        }
    }
}

#[component]
fn EditDialog(
    form: EditForm,
    on_submit: EventHandler<Mutation>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| form.clone());
    let fields = draft.read().fields.clone();
    let title = format!("Edit {} #{}", form.resource, form.id);

    rsx! {
        div {
            style: OVERLAY_STYLE,
            div {
                style: PANEL_STYLE,
                h3 { style: "margin: 0 0 12px; font-size: 16px;", "{title}" }
                for field in fields {
                    label {
                        key: "{field.key}",
                        style: "display: flex; flex-direction: column; gap: 2px; margin-bottom: 8px; font-size: 13px;",
                        "{field.label}"
                        input {
                            value: "{field.value}",
                            style: "padding: 4px 8px;",
                            oninput: move |event| {
                                draft.write().set(field.key, event.value());
                            },
                        }
                    }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                    button { onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        onclick: move |_| {
                            let mutation = draft.read().to_mutation();
                            match mutation {
                                Some(mutation) => on_submit.call(mutation),
                                None => on_cancel.call(()),
                            }
                        },
                        "Save"
                    }
                }
            }
        }
    }
}

#[component]
fn AssignDialog(
    equipment: RowId,
    on_submit: EventHandler<Mutation>,
    on_cancel: EventHandler<()>,
) -> Element {
    let services = use_context::<Services>();
    let notification = use_context::<Signal<Option<Notification>>>();
    let employees = use_signal(ViewModel::<Employee>::default);
    let mut choice = use_signal(|| None::<RowId>);
    let source = use_hook(|| {
        Arc::new(RestRowSource::<Employee>::new(services.client.clone()))
            as Arc<dyn RowSource<Employee>>
    });
    use_effect(move || start_fetch(employees, source.clone(), notification));
    use_drop(move || unmount_view(employees));

    let candidates = assignable_employees(employees.read().store().rows());
    let loading = employees.read().load_state() == &LoadState::Loading;
    let selected = choice();

    rsx! {
        div {
            style: OVERLAY_STYLE,
            div {
                style: PANEL_STYLE,
                h3 { style: "margin: 0 0 12px; font-size: 16px;", "Assign equipment #{equipment}" }
                select {
                    style: "width: 100%; padding: 4px 8px;",
                    onchange: move |event| {
                        choice.set(event.value().parse::<i64>().ok().map(RowId));
                    },
                    option { value: "", if loading { "Loading…" } else { "Choose an employee" } }
                    for employee in candidates {
                        option {
                            key: "{employee.id}",
                            value: "{employee.id}",
                            "{employee.full_name} ({employee.department})"
                        }
                    }
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                    button { onclick: move |_| on_cancel.call(()), "Cancel" }
                    button {
                        disabled: selected.is_none(),
                        onclick: move |_| {
                            if let Some(employee) = selected {
                                on_submit.call(Mutation::Assign { equipment, employee });
                            }
                        },
                        "Assign"
                    }
                }
            }
        }
    }
}
