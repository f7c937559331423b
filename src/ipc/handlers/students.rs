use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::store::NewStudent;
use serde_json::json;

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Presence check only. An empty name passes through; the add-student
    // form's submit gate is the caller's concern, not the store's.
    let Some(name) = helpers::get_str(&req.params, "name") else {
        return err(&req.id, "bad_params", "missing name", None);
    };

    let student_id = state.store.add_student(NewStudent {
        name,
        phone: helpers::opt_str(&req.params, "phone"),
        email: helpers::opt_str(&req.params, "email"),
        group: helpers::opt_str(&req.params, "group"),
        subjects: helpers::str_list(&req.params, "subjects"),
        active: helpers::opt_bool(&req.params, "active", true),
    });

    ok(&req.id, json!({ "studentId": student_id }))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "students": state.store.students() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.create" => Some(handle_students_create(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        _ => None,
    }
}
