use crate::domain::model::{Boundary, Course, Student};
use crate::domain::outcome::{Verdict, Violation};
use crate::domain::ports::ValidationRule;
use crate::utils::error::Result;

/// Detects requested courses that meet at the same time on the same day.
///
/// Every unordered pair of courses is compared meeting by meeting, and every
/// overlapping pair of meetings is reported, so the caller sees all clashes at
/// once. Plans hold a handful of courses, so the pairwise scan is enough.
#[derive(Debug, Clone, Default)]
pub struct ScheduleConflictRule {
    boundary: Boundary,
}

impl ScheduleConflictRule {
    pub const NAME: &'static str = "schedule_conflict";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary(boundary: Boundary) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl ValidationRule for ScheduleConflictRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, _student: &Student, requested: &[Course]) -> Result<Verdict> {
        let mut violations = Vec::new();

        for (i, a) in requested.iter().enumerate() {
            for b in &requested[i + 1..] {
                for ma in a.schedule() {
                    for mb in b.schedule() {
                        if ma.overlaps(mb, self.boundary) {
                            violations.push(Violation::new(
                                [a.code(), b.code()],
                                format!(
                                    "{} ({}) conflicts with {} ({}) on {}",
                                    a.code(),
                                    ma.window(),
                                    b.code(),
                                    mb.window(),
                                    ma.day()
                                ),
                            ));
                        }
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(Verdict::pass(Self::NAME, "No schedule conflicts"))
        } else {
            Ok(Verdict::fail(Self::NAME, "Schedule conflicts", violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, meetings: &[&str]) -> Course {
        let schedule = meetings.iter().map(|m| m.parse().unwrap()).collect();
        Course::new(code, code, 3, Vec::<String>::new(), schedule).unwrap()
    }

    fn student() -> Student {
        Student::new("2201", "Ani", Vec::<String>::new(), Vec::<String>::new()).unwrap()
    }

    #[test]
    fn test_overlapping_same_day_courses_conflict() {
        let verdict = ScheduleConflictRule::new()
            .evaluate(
                &student(),
                &[
                    course("CS201", &["Mon 09:00-11:00"]),
                    course("CS202", &["Mon 10:00-12:00"]),
                ],
            )
            .unwrap();
        assert!(!verdict.is_pass());
        assert_eq!(
            verdict.message,
            "Schedule conflicts: CS201 (09:00-11:00) conflicts with CS202 (10:00-12:00) on Mon"
        );
        assert_eq!(verdict.violations[0].courses, vec!["CS201", "CS202"]);
    }

    #[test]
    fn test_touching_courses_do_not_conflict_by_default() {
        let courses = [
            course("CS201", &["Mon 09:00-10:00"]),
            course("CS202", &["Mon 10:00-11:00"]),
        ];
        let exclusive = ScheduleConflictRule::new()
            .evaluate(&student(), &courses)
            .unwrap();
        assert!(exclusive.is_pass());

        let inclusive = ScheduleConflictRule::with_boundary(Boundary::Inclusive)
            .evaluate(&student(), &courses)
            .unwrap();
        assert!(!inclusive.is_pass());
    }

    #[test]
    fn test_different_days_never_conflict() {
        let verdict = ScheduleConflictRule::new()
            .evaluate(
                &student(),
                &[
                    course("CS201", &["Mon 09:00-11:00"]),
                    course("CS202", &["Tue 09:00-11:00"]),
                ],
            )
            .unwrap();
        assert!(verdict.is_pass());
    }

    #[test]
    fn test_reports_every_conflicting_pair() {
        let verdict = ScheduleConflictRule::new()
            .evaluate(
                &student(),
                &[
                    course("A", &["Mon 09:00-11:00", "Wed 09:00-11:00"]),
                    course("B", &["Mon 10:00-12:00"]),
                    course("C", &["Wed 10:30-11:30"]),
                    course("D", &["Fri 08:00-09:00"]),
                ],
            )
            .unwrap();
        assert!(!verdict.is_pass());
        let pairs: Vec<_> = verdict.violations.iter().map(|v| v.courses.clone()).collect();
        assert_eq!(pairs, vec![vec!["A", "B"], vec!["A", "C"]]);
        assert!(!verdict.mentions("D"));
    }
}
