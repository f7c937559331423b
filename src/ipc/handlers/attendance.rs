use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::selection::AttendanceSheet;
use serde_json::json;

/// Opens a fresh marking sheet: the session's computed roster with every
/// student defaulted absent. An unknown classId yields an empty roster,
/// not an error.
fn handle_attendance_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = helpers::get_str(&req.params, "classId") else {
        return err(&req.id, "bad_params", "missing classId", None);
    };

    let sheet = AttendanceSheet::open(&state.store, &class_id);
    let rows: Vec<serde_json::Value> = sheet
        .roster()
        .iter()
        .map(|student_id| {
            let name = state
                .store
                .student(student_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            json!({
                "studentId": student_id,
                "name": name,
                "present": sheet.is_present(student_id),
            })
        })
        .collect();

    ok(&req.id, json!({ "classId": class_id, "rows": rows }))
}

/// Saves one full sheet in a single action: one record per roster student,
/// present for the ids listed in params.present, absent for everyone
/// else. Repeated saves stack up duplicate records on purpose.
fn handle_attendance_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = helpers::get_str(&req.params, "classId") else {
        return err(&req.id, "bad_params", "missing classId", None);
    };
    let present_ids = helpers::str_list(&req.params, "present");

    let mut sheet = AttendanceSheet::open(&state.store, &class_id);
    for student_id in &present_ids {
        // Ids off the roster are ignored, like a stray click.
        let _ = sheet.set(student_id, true);
    }
    let saved = sheet.save(&mut state.store);

    ok(&req.id, json!({ "saved": saved }))
}

fn handle_attendance_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = helpers::get_str(&req.params, "classId");
    let student_id = helpers::get_str(&req.params, "studentId");

    let records: Vec<serde_json::Value> = state
        .store
        .attendance()
        .iter()
        .filter(|r| class_id.as_deref().map(|c| r.class_id == c).unwrap_or(true))
        .filter(|r| {
            student_id
                .as_deref()
                .map(|s| r.student_id == s)
                .unwrap_or(true)
        })
        .map(|r| serde_json::to_value(r).unwrap_or_else(|_| json!({})))
        .collect();

    ok(&req.id, json!({ "records": records }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.open" => Some(handle_attendance_open(state, req)),
        "attendance.save" => Some(handle_attendance_save(state, req)),
        "attendance.list" => Some(handle_attendance_list(state, req)),
        _ => None,
    }
}
