use std::path::Path;

use anyhow::{anyhow, Context};
use chrono::{Duration, NaiveDate, Utc};

use crate::models::{ClassLabel, Region, StudentRecord};

/// Built-in sample dataset: four students across the two known scopes, with
/// quiz dates anchored around today so the week windows have rows to find.
pub fn sample() -> Vec<StudentRecord> {
    let today = Utc::now().date_naive();

    vec![
        StudentRecord {
            name: "Alice Smith".to_string(),
            grade: 8,
            class_label: ClassLabel::A,
            region: Region::North,
            homework_submitted: true,
            quiz_score: 85,
            quiz_date: today - Duration::days(3),
            upcoming_quiz: today + Duration::days(4),
        },
        StudentRecord {
            name: "Bob Johnson".to_string(),
            grade: 8,
            class_label: ClassLabel::A,
            region: Region::North,
            homework_submitted: false,
            quiz_score: 0,
            quiz_date: today - Duration::days(3),
            upcoming_quiz: today + Duration::days(4),
        },
        StudentRecord {
            name: "Charlie Brown".to_string(),
            grade: 9,
            class_label: ClassLabel::B,
            region: Region::South,
            homework_submitted: true,
            quiz_score: 90,
            quiz_date: today - Duration::days(2),
            upcoming_quiz: today + Duration::days(5),
        },
        StudentRecord {
            name: "Diana Wilson".to_string(),
            grade: 9,
            class_label: ClassLabel::B,
            region: Region::South,
            homework_submitted: false,
            quiz_score: 0,
            quiz_date: today - Duration::days(2),
            upcoming_quiz: today + Duration::days(5),
        },
    ]
}

/// Loads the dataset snapshot: a CSV file when a path is given, otherwise
/// the built-in sample.
pub fn load(path: Option<&Path>) -> anyhow::Result<Vec<StudentRecord>> {
    match path {
        Some(path) => load_csv(path),
        None => Ok(sample()),
    }
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<StudentRecord>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_records(reader)
}

fn read_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<StudentRecord>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        name: String,
        grade: i32,
        class: String,
        region: String,
        homework_submitted: bool,
        quiz_score: i32,
        quiz_date: NaiveDate,
        upcoming_quiz: NaiveDate,
    }

    let mut records = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let class_label = ClassLabel::from_label(&row.class)
            .ok_or_else(|| anyhow!("unknown class label '{}' for {}", row.class, row.name))?;
        let region = Region::from_label(&row.region)
            .ok_or_else(|| anyhow!("unknown region '{}' for {}", row.region, row.name))?;

        records.push(StudentRecord {
            name: row.name,
            grade: row.grade,
            class_label,
            region,
            homework_submitted: row.homework_submitted,
            quiz_score: row.quiz_score,
            quiz_date: row.quiz_date,
            upcoming_quiz: row.upcoming_quiz,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_covers_both_scopes() {
        let dataset = sample();
        assert_eq!(dataset.len(), 4);
        assert!(dataset
            .iter()
            .any(|record| record.grade == 8 && record.region == Region::North));
        assert!(dataset
            .iter()
            .any(|record| record.grade == 9 && record.region == Region::South));
    }

    #[test]
    fn csv_rows_parse_into_records() {
        let csv = "\
name,grade,class,region,homework_submitted,quiz_score,quiz_date,upcoming_quiz
Alice Smith,8,A,North,true,85,2026-03-10,2026-03-20
Bob Johnson,8,A,North,false,0,2026-03-10,2026-03-20
";
        let records = read_records(csv::Reader::from_reader(csv.as_bytes())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alice Smith");
        assert_eq!(records[0].class_label, ClassLabel::A);
        assert!(!records[1].homework_submitted);
        assert_eq!(
            records[1].quiz_date,
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
        );
    }

    #[test]
    fn unknown_class_label_is_rejected() {
        let csv = "\
name,grade,class,region,homework_submitted,quiz_score,quiz_date,upcoming_quiz
Eve Adams,8,C,North,true,70,2026-03-10,2026-03-20
";
        let err = read_records(csv::Reader::from_reader(csv.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("unknown class label"));
    }
}
