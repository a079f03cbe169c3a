use crate::core::{Course, Student};
use crate::utils::error::{RegistrationError, Result};
use std::collections::BTreeMap;

/// Courses offered this term, keyed by code.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: BTreeMap<String, Course>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.extend(courses)?;
        Ok(catalog)
    }

    pub fn insert(&mut self, course: Course) -> Result<()> {
        if self.courses.contains_key(course.code()) {
            return Err(RegistrationError::DuplicateCourse {
                code: course.code().to_string(),
            });
        }
        self.courses.insert(course.code().to_string(), course);
        Ok(())
    }

    pub fn extend(&mut self, courses: impl IntoIterator<Item = Course>) -> Result<()> {
        for course in courses {
            self.insert(course)?;
        }
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The student's requested courses, in request order.
    pub fn resolve(&self, student: &Student) -> Result<Vec<Course>> {
        student
            .requested()
            .iter()
            .map(|code| {
                self.get(code)
                    .cloned()
                    .ok_or_else(|| RegistrationError::UnknownCourse { code: code.clone() })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Course {
        Course::new(code, code, 3, Vec::<String>::new(), vec![]).unwrap()
    }

    #[test]
    fn test_resolve_keeps_request_order() {
        let catalog =
            CourseCatalog::from_courses([course("A"), course("B"), course("C")]).unwrap();
        let student = Student::new("2201", "Ani", Vec::<String>::new(), ["C", "A"]).unwrap();

        let codes: Vec<String> = catalog
            .resolve(&student)
            .unwrap()
            .iter()
            .map(|c| c.code().to_string())
            .collect();
        assert_eq!(codes, vec!["C", "A"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_unknown_course_is_an_input_error() {
        let catalog = CourseCatalog::from_courses([course("A")]).unwrap();
        let student = Student::new("2201", "Ani", Vec::<String>::new(), ["A", "Z"]).unwrap();
        let err = catalog.resolve(&student).unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownCourse { ref code } if code == "Z"));
    }

    #[test]
    fn test_duplicate_course_is_rejected() {
        let mut catalog = CourseCatalog::from_courses([course("A")]).unwrap();
        assert!(catalog.extend([course("A")]).is_err());
        assert!(!catalog.is_empty());
    }
}
