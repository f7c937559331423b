use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::store::NewClassSession;
use chrono::NaiveTime;
use serde_json::json;

fn required_time(params: &serde_json::Value, key: &str) -> Result<NaiveTime, String> {
    let Some(raw) = helpers::get_str(params, key) else {
        return Err(format!("missing {}", key));
    };
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| format!("{} must be HH:MM", key))
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(subject) = helpers::get_str(&req.params, "subject") else {
        return err(&req.id, "bad_params", "missing subject", None);
    };
    let Some(day_of_week) = helpers::get_str(&req.params, "dayOfWeek") else {
        return err(&req.id, "bad_params", "missing dayOfWeek", None);
    };
    let start_time = match required_time(&req.params, "startTime") {
        Ok(t) => t,
        Err(message) => return err(&req.id, "bad_params", message, None),
    };
    let end_time = match required_time(&req.params, "endTime") {
        Ok(t) => t,
        Err(message) => return err(&req.id, "bad_params", message, None),
    };

    // Times only shape-checked; nothing enforces start < end or a capacity
    // bound, matching the store's no-validation policy.
    let class_id = state.store.add_class(NewClassSession {
        subject,
        group: helpers::opt_str(&req.params, "group"),
        day_of_week,
        start_time,
        end_time,
        max_students: helpers::opt_u32(&req.params, "maxStudents", 30),
        active: helpers::opt_bool(&req.params, "active", true),
    });

    ok(&req.id, json!({ "classId": class_id }))
}

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let classes: Vec<serde_json::Value> = state
        .store
        .classes()
        .iter()
        .map(|c| {
            let mut v = serde_json::to_value(c).unwrap_or_else(|_| json!({}));
            v["enrolledCount"] = json!(c.enrolled_students.len());
            v
        })
        .collect();
    ok(&req.id, json!({ "classes": classes }))
}

fn handle_classes_enroll(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(student_id) = helpers::get_str(&req.params, "studentId") else {
        return err(&req.id, "bad_params", "missing studentId", None);
    };
    let Some(class_id) = helpers::get_str(&req.params, "classId") else {
        return err(&req.id, "bad_params", "missing classId", None);
    };

    // Unknown class and already-enrolled both come back enrolled=false
    // with the store untouched; neither is an error.
    let enrolled = state.store.enroll_student(&student_id, &class_id);
    ok(&req.id, json!({ "enrolled": enrolled }))
}

fn handle_classes_roster(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = helpers::get_str(&req.params, "classId") else {
        return err(&req.id, "bad_params", "missing classId", None);
    };
    let students = state.store.students_for_class(&class_id);
    ok(&req.id, json!({ "students": students }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.enroll" => Some(handle_classes_enroll(state, req)),
        "classes.roster" => Some(handle_classes_roster(state, req)),
        _ => None,
    }
}
