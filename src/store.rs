use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub group: String,
    pub subjects: Vec<String>,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub subject: String,
    pub group: String,
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_students: u32,
    pub enrolled_students: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub marked_at: DateTime<Utc>,
    pub present: bool,
    pub notes: String,
}

/// Creation parameters for a student. `id` and `joined_at` are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub group: String,
    pub subjects: Vec<String>,
    pub active: bool,
}

impl Default for NewStudent {
    fn default() -> Self {
        NewStudent {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            group: String::new(),
            subjects: Vec::new(),
            active: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewClassSession {
    pub subject: String,
    pub group: String,
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_students: u32,
    pub active: bool,
}

impl Default for NewClassSession {
    fn default() -> Self {
        NewClassSession {
            subject: String::new(),
            group: String::new(),
            day_of_week: String::new(),
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            max_students: 30,
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    StudentAdded { student_id: String },
    ClassAdded { class_id: String },
    StudentEnrolled { student_id: String, class_id: String },
    AttendanceMarked { record_id: String },
}

pub type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Sole owner of the student, class and attendance collections. All
/// mutation goes through the methods below; registered listeners are
/// notified synchronously after each mutation, before the call returns.
/// Single logical writer, so no interior locking.
#[derive(Default)]
pub struct Store {
    students: Vec<Student>,
    classes: Vec<ClassSession>,
    attendance: Vec<AttendanceRecord>,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn notify(&mut self, event: ChangeEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Appends a student. No validation: an empty name is accepted, and
    /// subjects are stored in caller order without dedup.
    pub fn add_student(&mut self, new: NewStudent) -> String {
        let id = Uuid::new_v4().to_string();
        self.students.push(Student {
            id: id.clone(),
            name: new.name,
            phone: new.phone,
            email: new.email,
            group: new.group,
            subjects: new.subjects,
            joined_at: Utc::now(),
            active: new.active,
        });
        self.notify(ChangeEvent::StudentAdded {
            student_id: id.clone(),
        });
        id
    }

    /// Appends a class session. Same no-validation policy as add_student;
    /// nothing checks start_time < end_time or enrolment against
    /// max_students.
    pub fn add_class(&mut self, new: NewClassSession) -> String {
        let id = Uuid::new_v4().to_string();
        self.classes.push(ClassSession {
            id: id.clone(),
            subject: new.subject,
            group: new.group,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            max_students: new.max_students,
            enrolled_students: Vec::new(),
            active: new.active,
        });
        self.notify(ChangeEvent::ClassAdded {
            class_id: id.clone(),
        });
        id
    }

    /// Appends one attendance record stamped with the current time. The
    /// ids are taken as-is; there is no existence check and no dedup, so
    /// repeated calls with the same arguments produce distinct records.
    pub fn mark_attendance(&mut self, student_id: &str, class_id: &str, present: bool) -> String {
        let id = Uuid::new_v4().to_string();
        self.attendance.push(AttendanceRecord {
            id: id.clone(),
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            marked_at: Utc::now(),
            present,
            notes: String::new(),
        });
        self.notify(ChangeEvent::AttendanceMarked {
            record_id: id.clone(),
        });
        id
    }

    /// Adds a student id to a class's explicit enrolment list. Idempotent:
    /// already-enrolled students and unknown class ids are silent no-ops.
    /// Returns whether the list actually changed.
    pub fn enroll_student(&mut self, student_id: &str, class_id: &str) -> bool {
        let Some(idx) = self.classes.iter().position(|c| c.id == class_id) else {
            return false;
        };
        if self.classes[idx]
            .enrolled_students
            .iter()
            .any(|s| s == student_id)
        {
            return false;
        }
        self.classes[idx]
            .enrolled_students
            .push(student_id.to_string());
        self.notify(ChangeEvent::StudentEnrolled {
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
        });
        true
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classes(&self) -> &[ClassSession] {
        &self.classes
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassSession> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Students whose id appears in the class's explicit enrolment list.
    /// Unknown class ids yield an empty result.
    pub fn students_for_class(&self, class_id: &str) -> Vec<&Student> {
        let Some(class) = self.class(class_id) else {
            return Vec::new();
        };
        self.students
            .iter()
            .filter(|s| class.enrolled_students.iter().any(|e| e == &s.id))
            .collect()
    }

    /// The attendance roster for a session: the union of the explicit
    /// enrolment list and every student whose subject list contains the
    /// session's subject string. The two membership notions are kept
    /// separate on purpose; subject match is plain string equality, so a
    /// student taking "Company Law" is on the roster of every "Company
    /// Law" session regardless of group or schedule. Order follows the
    /// student collection, each student at most once.
    pub fn roster_for_session(&self, class_id: &str) -> Vec<&Student> {
        let Some(class) = self.class(class_id) else {
            return Vec::new();
        };
        self.students
            .iter()
            .filter(|s| {
                class.enrolled_students.iter().any(|e| e == &s.id)
                    || s.subjects.iter().any(|subj| subj == &class.subject)
            })
            .collect()
    }
}
