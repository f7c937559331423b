use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::store::{ClassSession, Store};

/// Day-name table indexed 1..=7, Sunday=1 through Saturday=7. Index 0 is
/// a placeholder so weekday numbers map straight onto the array.
pub const DAY_NAMES: [&str; 8] = [
    "", "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Fixed subject-by-group table. The two cohorts each select from their
/// own ordered list; there is nothing configurable here.
const GROUP_SUBJECTS: [(&str, &[&str]); 2] = [
    (
        "Group 1",
        &[
            "Company Law",
            "Securities Laws",
            "Economic and Commercial Laws",
            "Tax Laws",
        ],
    ),
    (
        "Group 2",
        &[
            "Corporate Restructuring",
            "Financial Management",
            "Strategic Management",
            "Banking Law and Practice",
        ],
    ),
];

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().number_from_sunday() as usize]
}

/// Active sessions scheduled on the weekday of `date`. The class stores a
/// day name, so the filter compares against the fixed table above.
pub fn classes_on(store: &Store, date: NaiveDate) -> Vec<&ClassSession> {
    let name = day_name(date);
    store
        .classes()
        .iter()
        .filter(|c| c.active && c.day_of_week == name)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_students: usize,
    pub active_classes: usize,
    pub subject_count: usize,
    pub todays_classes: usize,
}

/// Aggregates recomputed from scratch on every call. subject_count is the
/// number of distinct subject strings across all classes, active or not.
pub fn dashboard_counts(store: &Store, date: NaiveDate) -> DashboardCounts {
    let subjects: HashSet<&str> = store.classes().iter().map(|c| c.subject.as_str()).collect();
    DashboardCounts {
        total_students: store.students().len(),
        active_classes: store.classes().iter().filter(|c| c.active).count(),
        subject_count: subjects.len(),
        todays_classes: classes_on(store, date).len(),
    }
}

pub fn groups() -> Vec<&'static str> {
    GROUP_SUBJECTS.iter().map(|(g, _)| *g).collect()
}

/// The allowed subjects for a group; empty for unknown group names.
pub fn subjects_for_group(group: &str) -> &'static [&'static str] {
    GROUP_SUBJECTS
        .iter()
        .find(|(g, _)| *g == group)
        .map(|(_, subjects)| *subjects)
        .unwrap_or(&[])
}
