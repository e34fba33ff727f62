//! Student cohorts inside a round: applied, appeared and selected.
//!
//! Cohort updates always replace the stored set. A caller that wants to add
//! one student submits the full intended set including that student.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Collapse a caller-supplied list of IDs into a sorted, de-duplicated set.
pub fn normalize_ids(ids: &[DbId]) -> Vec<DbId> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Select every student of the appeared cohort.
pub fn select_all(appeared: &[DbId]) -> Vec<DbId> {
    normalize_ids(appeared)
}

/// Toggle one student in a client-side selection set.
///
/// Only students that appeared can be toggled on.
pub fn toggle(selection: &[DbId], appeared: &[DbId], student_id: DbId) -> Vec<DbId> {
    let mut set: BTreeSet<DbId> = selection.iter().copied().collect();
    if !set.remove(&student_id) && appeared.contains(&student_id) {
        set.insert(student_id);
    }
    set.into_iter().collect()
}

/// Validate that every selected student appeared in the round.
pub fn validate_selection(selected: &[DbId], appeared: &[DbId]) -> Result<(), CoreError> {
    let appeared: BTreeSet<DbId> = appeared.iter().copied().collect();
    let missing: Vec<String> = selected
        .iter()
        .filter(|id| !appeared.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Only students who appeared in the round can be selected (not appeared: {})",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Validate that every appeared student was eligible to sit the round.
pub fn validate_appeared(appeared: &[DbId], applied: &[DbId]) -> Result<(), CoreError> {
    let applied: BTreeSet<DbId> = applied.iter().copied().collect();
    let missing: Vec<String> = appeared
        .iter()
        .filter(|id| !applied.contains(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Only applicants of the round can be marked as appeared (not applicants: {})",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Appeared students that were not selected, in ascending ID order.
pub fn not_selected(appeared: &[DbId], selected: &[DbId]) -> Vec<DbId> {
    let selected: BTreeSet<DbId> = selected.iter().copied().collect();
    normalize_ids(appeared)
        .into_iter()
        .filter(|id| !selected.contains(id))
        .collect()
}

/// Union of the appeared cohorts across all rounds of a drive.
pub fn union_appeared<'a, I>(cohorts: I) -> Vec<DbId>
where
    I: IntoIterator<Item = &'a [DbId]>,
{
    cohorts
        .into_iter()
        .flat_map(|c| c.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sorts_and_dedups() {
        assert_eq!(normalize_ids(&[5, 1, 5, 3, 1]), vec![1, 3, 5]);
        assert!(normalize_ids(&[]).is_empty());
    }

    #[test]
    fn select_all_covers_the_appeared_cohort() {
        assert_eq!(select_all(&[9, 2, 4]), vec![2, 4, 9]);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let appeared = [1, 2, 3];
        let sel = toggle(&[], &appeared, 2);
        assert_eq!(sel, vec![2]);
        let sel = toggle(&sel, &appeared, 3);
        assert_eq!(sel, vec![2, 3]);
        let sel = toggle(&sel, &appeared, 2);
        assert_eq!(sel, vec![3]);
    }

    #[test]
    fn toggle_ignores_students_who_did_not_appear() {
        assert_eq!(toggle(&[1], &[1, 2], 7), vec![1]);
    }

    #[test]
    fn selection_must_be_subset_of_appeared() {
        assert!(validate_selection(&[1, 2], &[1, 2, 3]).is_ok());
        let err = validate_selection(&[1, 4], &[1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn appeared_must_be_subset_of_applied() {
        assert!(validate_appeared(&[1], &[1, 2]).is_ok());
        assert!(validate_appeared(&[3], &[1, 2]).is_err());
    }

    #[test]
    fn not_selected_is_the_difference() {
        assert_eq!(not_selected(&[3, 1, 2], &[2]), vec![1, 3]);
    }

    #[test]
    fn union_of_cohorts() {
        let a = vec![1, 2];
        let b = vec![2, 5];
        assert_eq!(
            union_appeared([a.as_slice(), b.as_slice()]),
            vec![1, 2, 5]
        );
    }
}
