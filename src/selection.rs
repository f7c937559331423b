use std::collections::HashMap;

use crate::store::Store;
use crate::views;

/// Subject picker state for the add-student and add-class forms. The
/// picked subjects are scoped to one group; moving to another group
/// discards them, so stale picks from the previous group never leak into
/// a submit.
#[derive(Debug, Clone, Default)]
pub struct SubjectSelection {
    group: String,
    selected: Vec<String>,
}

impl SubjectSelection {
    pub fn new(group: &str) -> Self {
        SubjectSelection {
            group: group.to_string(),
            selected: Vec::new(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Re-selecting the current group keeps the picks; any other group
    /// clears them.
    pub fn set_group(&mut self, group: &str) {
        if self.group != group {
            self.group = group.to_string();
            self.selected.clear();
        }
    }

    /// Flips one subject in or out of the selection. Subjects outside the
    /// group's fixed list are refused.
    pub fn toggle_subject(&mut self, subject: &str) -> bool {
        if !views::subjects_for_group(&self.group).contains(&subject) {
            return false;
        }
        if let Some(i) = self.selected.iter().position(|s| s == subject) {
            self.selected.remove(i);
        } else {
            self.selected.push(subject.to_string());
        }
        true
    }

    /// The submit-enable rule for the add-student form: non-empty name
    /// and at least one subject. Advisory only; the store itself accepts
    /// anything.
    pub fn is_submittable(&self, name: &str) -> bool {
        !name.trim().is_empty() && !self.selected.is_empty()
    }
}

/// One screenful of attendance marking for a single session. Built from
/// the computed roster with everyone defaulted absent, mutated by toggles,
/// then written out in bulk. Never reconciled with records saved earlier
/// for the same class or day.
#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    class_id: String,
    roster: Vec<String>,
    present: HashMap<String, bool>,
}

impl AttendanceSheet {
    pub fn open(store: &Store, class_id: &str) -> Self {
        let roster: Vec<String> = store
            .roster_for_session(class_id)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        let present = roster.iter().map(|id| (id.clone(), false)).collect();
        AttendanceSheet {
            class_id: class_id.to_string(),
            roster,
            present,
        }
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// Student ids in roster order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn is_present(&self, student_id: &str) -> bool {
        self.present.get(student_id).copied().unwrap_or(false)
    }

    /// Flips one student's flag. Ids off the roster are ignored.
    pub fn toggle(&mut self, student_id: &str) -> bool {
        match self.present.get_mut(student_id) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, student_id: &str, present: bool) -> bool {
        match self.present.get_mut(student_id) {
            Some(flag) => {
                *flag = present;
                true
            }
            None => false,
        }
    }

    /// Writes one attendance record per roster student, in roster order,
    /// with whatever flag the sheet holds (absent for anyone never
    /// toggled). Consumes the sheet; returns the number of records
    /// written.
    pub fn save(self, store: &mut Store) -> usize {
        for student_id in &self.roster {
            let present = self.present.get(student_id).copied().unwrap_or(false);
            store.mark_attendance(student_id, &self.class_id, present);
        }
        self.roster.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewClassSession, NewStudent};

    #[test]
    fn switching_group_clears_selected_subjects() {
        let mut sel = SubjectSelection::new("Group 1");
        assert!(sel.toggle_subject("Company Law"));
        assert!(sel.toggle_subject("Securities Laws"));
        assert_eq!(sel.selected().len(), 2);

        sel.set_group("Group 2");
        assert!(sel.selected().is_empty());

        // Same-group set is not a switch.
        sel.set_group("Group 2");
        assert!(sel.toggle_subject("Financial Management"));
        sel.set_group("Group 2");
        assert_eq!(sel.selected(), ["Financial Management"]);
    }

    #[test]
    fn toggle_refuses_subjects_outside_the_group() {
        let mut sel = SubjectSelection::new("Group 2");
        assert!(!sel.toggle_subject("Company Law"));
        assert!(sel.selected().is_empty());
    }

    #[test]
    fn submit_gate_needs_name_and_a_subject() {
        let mut sel = SubjectSelection::new("Group 1");
        assert!(!sel.is_submittable("Asha Rao"));
        sel.toggle_subject("Company Law");
        assert!(sel.is_submittable("Asha Rao"));
        assert!(!sel.is_submittable("   "));
    }

    #[test]
    fn sheet_defaults_everyone_absent_and_saves_one_record_each() {
        let mut store = Store::new();
        let class_id = store.add_class(NewClassSession {
            subject: "Company Law".to_string(),
            ..Default::default()
        });
        let a = store.add_student(NewStudent {
            subjects: vec!["Company Law".to_string()],
            ..Default::default()
        });
        let b = store.add_student(NewStudent {
            subjects: vec!["Company Law".to_string()],
            ..Default::default()
        });

        let mut sheet = AttendanceSheet::open(&store, &class_id);
        assert_eq!(sheet.roster(), [a.clone(), b.clone()]);
        assert!(!sheet.is_present(&a));

        assert!(sheet.toggle(&a));
        assert!(sheet.is_present(&a));
        assert!(!sheet.toggle("not-on-roster"));

        let saved = sheet.save(&mut store);
        assert_eq!(saved, 2);
        assert_eq!(store.attendance().len(), 2);
        let flags: Vec<(String, bool)> = store
            .attendance()
            .iter()
            .map(|r| (r.student_id.clone(), r.present))
            .collect();
        assert_eq!(flags, vec![(a, true), (b, false)]);
    }

    #[test]
    fn saving_twice_for_the_same_class_duplicates_records() {
        let mut store = Store::new();
        let class_id = store.add_class(NewClassSession {
            subject: "Tax Laws".to_string(),
            ..Default::default()
        });
        store.add_student(NewStudent {
            subjects: vec!["Tax Laws".to_string()],
            ..Default::default()
        });

        AttendanceSheet::open(&store, &class_id).save(&mut store);
        AttendanceSheet::open(&store, &class_id).save(&mut store);
        assert_eq!(store.attendance().len(), 2);
    }

    #[test]
    fn sheet_for_unknown_class_is_empty() {
        let mut store = Store::new();
        let sheet = AttendanceSheet::open(&store, "no-such-class");
        assert!(sheet.roster().is_empty());
        assert_eq!(sheet.save(&mut store), 0);
        assert!(store.attendance().is_empty());
    }
}
