use crate::utils::error::{RegistrationError, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time within a day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u16, minute: u16) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(RegistrationError::invalid_record(
                "time",
                "value",
                format!("{:02}:{:02} is not a valid time of day", hour, minute),
            ));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Midnight at the end of the day is the last value, so `24:00` can close a meeting.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(RegistrationError::invalid_record(
                "time",
                "value",
                format!("{} minutes is past the end of the day", minutes),
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            RegistrationError::invalid_record("time", "value", format!("'{}' is not HH:MM", s))
        };
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let hour = two_digits(hour).ok_or_else(invalid)?;
        let minute = two_digits(minute).ok_or_else(invalid)?;
        if (hour, minute) == (24, 0) {
            return Ok(Self(MINUTES_PER_DAY));
        }
        Self::new(hour, minute)
    }
}

fn two_digits(field: &str) -> Option<u16> {
    match field.as_bytes() {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
            Some(u16::from(tens - b'0') * 10 + u16::from(ones - b'0'))
        }
        _ => None,
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = RegistrationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// How two meetings that touch at an edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// `[09:00,10:00)` and `[10:00,11:00)` do not conflict.
    #[default]
    Exclusive,
    /// Touching meetings conflict, e.g. when no changeover time is allowed.
    Inclusive,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeetingRecord {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

/// One weekly class session, the half-open interval `[start, end)` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MeetingRecord")]
pub struct Meeting {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Meeting {
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(RegistrationError::invalid_record(
                "meeting",
                "end",
                format!("{} must be after start {}", end, start),
            ));
        }
        Ok(Self { day, start, end })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn overlaps(&self, other: &Meeting, boundary: Boundary) -> bool {
        if self.day != other.day {
            return false;
        }
        match boundary {
            Boundary::Exclusive => self.start < other.end && other.start < self.end,
            Boundary::Inclusive => self.start <= other.end && other.start <= self.end,
        }
    }

    pub fn window(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

impl TryFrom<MeetingRecord> for Meeting {
    type Error = RegistrationError;

    fn try_from(record: MeetingRecord) -> Result<Self> {
        Self::new(record.day, record.start, record.end)
    }
}

impl FromStr for Meeting {
    type Err = RegistrationError;

    /// Parses `Mon 09:00-11:00`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            RegistrationError::invalid_record("meeting", "schedule", format!("'{}' {}", s, reason))
        };
        let (day, window) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| invalid("is not 'Day HH:MM-HH:MM'"))?;
        let day = day
            .parse::<Weekday>()
            .map_err(|_| invalid("has an unknown day"))?;
        let (start, end) = window
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("is missing a '-' between start and end"))?;
        Self::new(day, start.trim().parse()?, end.trim().parse()?)
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.window())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CourseRecord {
    code: String,
    #[serde(default)]
    name: String,
    credits: i64,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    schedule: Vec<Meeting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord", into = "CourseRecord")]
pub struct Course {
    code: String,
    name: String,
    credits: u32,
    prerequisites: BTreeSet<String>,
    schedule: Vec<Meeting>,
}

impl Course {
    /// Builds a course, rejecting records no rule could sensibly judge.
    ///
    /// A course needs a code, a positive credit weight, must not list itself
    /// as a prerequisite, and its own meetings must not overlap one another.
    pub fn new<I, S>(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: i64,
        prerequisites: I,
        schedule: Vec<Meeting>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(RegistrationError::invalid_record(
                "course",
                "code",
                "cannot be empty",
            ));
        }

        let credits = u32::try_from(credits)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                RegistrationError::invalid_record(
                    "course",
                    "credits",
                    format!("of {} must be a positive integer ({})", code, credits),
                )
            })?;

        let prerequisites: BTreeSet<String> = prerequisites
            .into_iter()
            .map(|p| p.into().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if prerequisites.contains(&code) {
            return Err(RegistrationError::invalid_record(
                "course",
                "prerequisites",
                format!("of {} cannot include the course itself", code),
            ));
        }

        for (i, a) in schedule.iter().enumerate() {
            if let Some(b) = schedule[i + 1..]
                .iter()
                .find(|b| a.overlaps(b, Boundary::Exclusive))
            {
                return Err(RegistrationError::invalid_record(
                    "course",
                    "schedule",
                    format!("of {} has overlapping meetings {} and {}", code, a, b),
                ));
            }
        }

        Ok(Self {
            code,
            name: name.into(),
            credits,
            prerequisites,
            schedule,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn prerequisites(&self) -> &BTreeSet<String> {
        &self.prerequisites
    }

    pub fn schedule(&self) -> &[Meeting] {
        &self.schedule
    }
}

impl TryFrom<CourseRecord> for Course {
    type Error = RegistrationError;

    fn try_from(record: CourseRecord) -> Result<Self> {
        Self::new(
            record.code,
            record.name,
            record.credits,
            record.prerequisites,
            record.schedule,
        )
    }
}

impl From<Course> for CourseRecord {
    fn from(course: Course) -> Self {
        Self {
            code: course.code,
            name: course.name,
            credits: i64::from(course.credits),
            prerequisites: course.prerequisites.into_iter().collect(),
            schedule: course.schedule,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StudentRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    completed: Vec<String>,
    #[serde(default)]
    requested: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudentRecord", into = "StudentRecord")]
pub struct Student {
    id: String,
    name: String,
    completed: BTreeSet<String>,
    requested: Vec<String>,
}

impl Student {
    pub fn new<C, R>(
        id: impl Into<String>,
        name: impl Into<String>,
        completed: C,
        requested: R,
    ) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(RegistrationError::invalid_record(
                "student",
                "id",
                "cannot be empty",
            ));
        }

        let completed = completed
            .into_iter()
            .map(|c| c.into().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let mut codes = Vec::new();
        for code in requested {
            let code = code.into().trim().to_string();
            if code.is_empty() {
                return Err(RegistrationError::invalid_record(
                    "student",
                    "requested",
                    "contains an empty course code",
                ));
            }
            if !seen.insert(code.clone()) {
                return Err(RegistrationError::DuplicateRequest { student: id, code });
            }
            codes.push(code);
        }

        Ok(Self {
            id,
            name: name.into(),
            completed,
            requested: codes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, falling back to the id when none was given.
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn has_completed(&self, code: &str) -> bool {
        self.completed.contains(code)
    }

    pub fn requested(&self) -> &[String] {
        &self.requested
    }
}

impl TryFrom<StudentRecord> for Student {
    type Error = RegistrationError;

    fn try_from(record: StudentRecord) -> Result<Self> {
        Self::new(record.id, record.name, record.completed, record.requested)
    }
}

impl From<Student> for StudentRecord {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            completed: student.completed.into_iter().collect(),
            requested: student.requested,
        }
    }
}
