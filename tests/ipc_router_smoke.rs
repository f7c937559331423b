use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_classadmind");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn classadmind");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request(&mut stdin, &mut reader, "1", "health", json!({}));
    let created = request(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({
            "subject": "Company Law",
            "group": "Group 1",
            "dayOfWeek": "Monday",
            "startTime": "09:00",
            "endTime": "10:30"
        }),
    );
    let class_id = created
        .get("result")
        .and_then(|v| v.get("classId"))
        .and_then(|v| v.as_str())
        .expect("classId")
        .to_string();

    let created_student = request(
        &mut stdin,
        &mut reader,
        "3",
        "students.create",
        json!({
            "name": "Smoke Student",
            "group": "Group 1",
            "subjects": ["Company Law"]
        }),
    );
    let student_id = created_student
        .get("result")
        .and_then(|v| v.get("studentId"))
        .and_then(|v| v.as_str())
        .expect("studentId")
        .to_string();

    let _ = request(&mut stdin, &mut reader, "4", "students.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "5", "classes.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "6",
        "classes.enroll",
        json!({ "studentId": student_id, "classId": class_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "7",
        "classes.roster",
        json!({ "classId": class_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "8",
        "attendance.open",
        json!({ "classId": class_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "9",
        "attendance.save",
        json!({ "classId": class_id, "present": [student_id] }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "10",
        "attendance.list",
        json!({ "classId": class_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "11",
        "schedule.today",
        json!({ "date": "2025-06-02" }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "12",
        "dashboard.counts",
        json!({ "date": "2025-06-02" }),
    );
    let _ = request(&mut stdin, &mut reader, "13", "groups.list", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "14",
        "subjects.listForGroup",
        json!({ "group": "Group 1" }),
    );

    // Unknown methods still answer, with the router's fallthrough code.
    writeln!(
        stdin,
        "{}",
        json!({ "id": "15", "method": "no.such.method", "params": {} })
    )
    .expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let unknown: serde_json::Value =
        serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(unknown.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        unknown
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
}
