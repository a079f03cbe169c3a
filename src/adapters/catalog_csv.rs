use crate::domain::model::{Course, Meeting};
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One line of `code,name,credits,prerequisites,schedule`.
///
/// `prerequisites` is a `;`-separated list of codes and `schedule` a
/// `;`-separated list of `Day HH:MM-HH:MM` meetings. Both may be empty.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    code: String,
    name: String,
    credits: i64,
    #[serde(default)]
    prerequisites: String,
    #[serde(default)]
    schedule: String,
}

impl CatalogRow {
    fn into_course(self) -> Result<Course> {
        let schedule = split_list(&self.schedule)
            .map(str::parse::<Meeting>)
            .collect::<Result<Vec<_>>>()?;
        Course::new(
            self.code,
            self.name,
            self.credits,
            split_list(&self.prerequisites),
            schedule,
        )
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(';').map(str::trim).filter(|s| !s.is_empty())
}

pub fn read_catalog_csv<R: Read>(reader: R) -> Result<Vec<Course>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut courses = Vec::new();
    for row in csv_reader.deserialize::<CatalogRow>() {
        courses.push(row?.into_course()?);
    }

    tracing::debug!("Loaded {} courses from CSV catalog", courses.len());
    Ok(courses)
}

pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Course>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_catalog_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RegistrationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = "\
code,name,credits,prerequisites,schedule
MAT101,Matematika Dasar,3,,Mon 09:00-11:00
FIS201,Fisika I,4,MAT101,Mon 10:30-12:00
IFS300,Ilmu Komputer Lanjut,3,MAT101;FIS201,Tue 09:00-11:00; Thu 09:00-10:00
";

    #[test]
    fn test_read_catalog() {
        let courses = read_catalog_csv(CATALOG.as_bytes()).unwrap();
        assert_eq!(courses.len(), 3);
        assert!(courses[0].prerequisites().is_empty());
        assert_eq!(courses[1].credits(), 4);
        assert_eq!(courses[2].prerequisites().len(), 2);
        assert_eq!(courses[2].schedule().len(), 2);
        assert_eq!(courses[2].schedule()[1].to_string(), "Thu 09:00-10:00");
    }

    #[test]
    fn test_invalid_rows_are_rejected() {
        let zero_credits = "code,name,credits,prerequisites,schedule\nX,X,0,,\n";
        assert!(matches!(
            read_catalog_csv(zero_credits.as_bytes()),
            Err(RegistrationError::InvalidRecord { .. })
        ));

        let backwards = "code,name,credits,prerequisites,schedule\nX,X,3,,Mon 11:00-09:00\n";
        assert!(read_catalog_csv(backwards.as_bytes()).is_err());

        let not_a_number = "code,name,credits,prerequisites,schedule\nX,X,three,,\n";
        assert!(matches!(
            read_catalog_csv(not_a_number.as_bytes()),
            Err(RegistrationError::Csv(_))
        ));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        let courses = load_catalog_csv(file.path()).unwrap();
        assert_eq!(courses[0].code(), "MAT101");
    }
}
