use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::views;
use chrono::{Local, NaiveDate};
use serde_json::json;

fn effective_date(params: &serde_json::Value) -> Result<NaiveDate, String> {
    // Tests pin the date; the UI omits it and gets the current local day.
    Ok(helpers::opt_date(params, "date")?.unwrap_or_else(|| Local::now().date_naive()))
}

fn handle_dashboard_counts(state: &mut AppState, req: &Request) -> serde_json::Value {
    let date = match effective_date(&req.params) {
        Ok(d) => d,
        Err(message) => return err(&req.id, "bad_params", message, None),
    };
    let counts = views::dashboard_counts(&state.store, date);
    ok(
        &req.id,
        serde_json::to_value(counts).unwrap_or_else(|_| json!({})),
    )
}

fn handle_schedule_today(state: &mut AppState, req: &Request) -> serde_json::Value {
    let date = match effective_date(&req.params) {
        Ok(d) => d,
        Err(message) => return err(&req.id, "bad_params", message, None),
    };
    let classes = views::classes_on(&state.store, date);
    ok(
        &req.id,
        json!({
            "day": views::day_name(date),
            "classes": classes,
        }),
    )
}

fn handle_groups_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "groups": views::groups() }))
}

fn handle_subjects_for_group(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(group) = helpers::get_str(&req.params, "group") else {
        return err(&req.id, "bad_params", "missing group", None);
    };
    // Unknown groups have no subjects rather than being an error.
    ok(
        &req.id,
        json!({
            "group": group,
            "subjects": views::subjects_for_group(&group),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.counts" => Some(handle_dashboard_counts(state, req)),
        "schedule.today" => Some(handle_schedule_today(state, req)),
        "groups.list" => Some(handle_groups_list(state, req)),
        "subjects.listForGroup" => Some(handle_subjects_for_group(state, req)),
        _ => None,
    }
}
