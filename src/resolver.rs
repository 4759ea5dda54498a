use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::PanelError;
use crate::intent::DataType;
use crate::models::{PerformanceRow, StudentRecord, UpcomingQuizRow};
use crate::scope::ScopeTriple;

/// Outcome of one query: a non-empty projection for the requested data type,
/// or a single informational notice. Never a partially filtered table.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedResult {
    MissingHomework(Vec<String>),
    Performance(Vec<PerformanceRow>),
    UpcomingQuizzes(Vec<UpcomingQuizRow>),
    Notice(String),
}

/// Filters the dataset to the effective scope, then projects rows per the
/// requested data type. `today` anchors the week windows; both exclude the
/// current day and include their boundary day.
pub fn resolve(
    dataset: &[StudentRecord],
    scope: &ScopeTriple,
    data_type: DataType,
    time_period: Option<&str>,
    today: NaiveDate,
) -> Result<ResolvedResult, PanelError> {
    let in_scope: Vec<&StudentRecord> = dataset
        .iter()
        .filter(|record| scope.covers(record))
        .collect();
    debug!(rows = in_scope.len(), "dataset filtered to effective scope");

    match data_type {
        DataType::Homework => {
            let names: Vec<String> = in_scope
                .iter()
                .filter(|record| !record.homework_submitted)
                .map(|record| record.name.clone())
                .collect();

            if names.is_empty() {
                Ok(ResolvedResult::Notice("All homework submitted.".to_string()))
            } else {
                Ok(ResolvedResult::MissingHomework(names))
            }
        }
        DataType::Performance => {
            if time_period != Some("last week") {
                return Ok(ResolvedResult::Notice(
                    "No performance data for that period.".to_string(),
                ));
            }

            let (start, end) = trailing_week(today);
            let rows: Vec<PerformanceRow> = in_scope
                .iter()
                .filter(|record| record.quiz_date >= start && record.quiz_date <= end)
                .map(|record| PerformanceRow {
                    name: record.name.clone(),
                    quiz_score: record.quiz_score,
                })
                .collect();

            if rows.is_empty() {
                Ok(ResolvedResult::Notice(
                    "No performance data for last week.".to_string(),
                ))
            } else {
                Ok(ResolvedResult::Performance(rows))
            }
        }
        DataType::Quizzes => {
            if time_period != Some("next week") {
                return Err(PanelError::UnsupportedQuery);
            }

            let (start, end) = leading_week(today);
            let rows: Vec<UpcomingQuizRow> = in_scope
                .iter()
                .filter(|record| record.upcoming_quiz >= start && record.upcoming_quiz <= end)
                .map(|record| UpcomingQuizRow {
                    name: record.name.clone(),
                    upcoming_quiz: record.upcoming_quiz,
                })
                .collect();

            if rows.is_empty() {
                Ok(ResolvedResult::Notice(
                    "No quizzes scheduled for next week.".to_string(),
                ))
            } else {
                Ok(ResolvedResult::UpcomingQuizzes(rows))
            }
        }
        DataType::Unknown => Err(PanelError::UnsupportedQuery),
    }
}

/// Closed window [today - 7, today - 1]: the trailing week, excluding today.
pub fn trailing_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(7), today - Duration::days(1))
}

/// Closed window [today + 1, today + 7]: the leading week, excluding today.
pub fn leading_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today + Duration::days(1), today + Duration::days(7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassLabel, Region};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 18).unwrap()
    }

    fn scope() -> ScopeTriple {
        ScopeTriple {
            grade: 8,
            class_label: ClassLabel::A,
            region: Region::North,
        }
    }

    fn student(name: &str, submitted: bool, quiz_days_ago: i64, quiz_in_days: i64) -> StudentRecord {
        StudentRecord {
            name: name.to_string(),
            grade: 8,
            class_label: ClassLabel::A,
            region: Region::North,
            homework_submitted: submitted,
            quiz_score: 85,
            quiz_date: today() - Duration::days(quiz_days_ago),
            upcoming_quiz: today() + Duration::days(quiz_in_days),
        }
    }

    fn out_of_scope_student(name: &str) -> StudentRecord {
        StudentRecord {
            grade: 9,
            class_label: ClassLabel::B,
            region: Region::South,
            ..student(name, false, 3, 3)
        }
    }

    #[test]
    fn homework_lists_only_non_submitters_in_scope() {
        let dataset = vec![
            student("Alice Smith", true, 3, 3),
            student("Bob Johnson", false, 3, 3),
            out_of_scope_student("Diana Wilson"),
        ];

        let result = resolve(&dataset, &scope(), DataType::Homework, None, today()).unwrap();
        assert_eq!(
            result,
            ResolvedResult::MissingHomework(vec!["Bob Johnson".to_string()])
        );
    }

    #[test]
    fn homework_all_submitted_yields_notice() {
        let dataset = vec![student("Alice Smith", true, 3, 3)];
        let result = resolve(&dataset, &scope(), DataType::Homework, None, today()).unwrap();
        assert_eq!(
            result,
            ResolvedResult::Notice("All homework submitted.".to_string())
        );
    }

    #[test]
    fn performance_window_includes_seven_days_ago_and_yesterday() {
        let dataset = vec![
            student("Boundary Low", false, 7, 3),
            student("Yesterday", false, 1, 3),
        ];

        let result = resolve(
            &dataset,
            &scope(),
            DataType::Performance,
            Some("last week"),
            today(),
        )
        .unwrap();

        match result {
            ResolvedResult::Performance(rows) => {
                let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
                assert_eq!(names, vec!["Boundary Low", "Yesterday"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn performance_window_excludes_today_and_eight_days_ago() {
        let dataset = vec![
            student("Today", false, 0, 3),
            student("Too Old", false, 8, 3),
        ];

        let result = resolve(
            &dataset,
            &scope(),
            DataType::Performance,
            Some("last week"),
            today(),
        )
        .unwrap();
        assert_eq!(
            result,
            ResolvedResult::Notice("No performance data for last week.".to_string())
        );
    }

    #[test]
    fn performance_other_period_yields_notice() {
        let dataset = vec![student("Alice Smith", false, 3, 3)];
        for period in [None, Some("this month"), Some("next week")] {
            let result =
                resolve(&dataset, &scope(), DataType::Performance, period, today()).unwrap();
            assert_eq!(
                result,
                ResolvedResult::Notice("No performance data for that period.".to_string())
            );
        }
    }

    #[test]
    fn quizzes_window_includes_tomorrow_and_seven_days_ahead() {
        let dataset = vec![
            student("Tomorrow", false, 3, 1),
            student("Boundary High", false, 3, 7),
        ];

        let result = resolve(
            &dataset,
            &scope(),
            DataType::Quizzes,
            Some("next week"),
            today(),
        )
        .unwrap();

        match result {
            ResolvedResult::UpcomingQuizzes(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].upcoming_quiz, today() + Duration::days(1));
                assert_eq!(rows[1].upcoming_quiz, today() + Duration::days(7));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn quizzes_window_excludes_today_and_eight_days_ahead() {
        let dataset = vec![
            student("Today", false, 3, 0),
            student("Too Far", false, 3, 8),
        ];

        let result = resolve(
            &dataset,
            &scope(),
            DataType::Quizzes,
            Some("next week"),
            today(),
        )
        .unwrap();
        assert_eq!(
            result,
            ResolvedResult::Notice("No quizzes scheduled for next week.".to_string())
        );
    }

    #[test]
    fn quizzes_without_next_week_is_unsupported() {
        let dataset = vec![student("Alice Smith", false, 3, 3)];
        for period in [None, Some("last week")] {
            let err = resolve(&dataset, &scope(), DataType::Quizzes, period, today()).unwrap_err();
            assert!(matches!(err, PanelError::UnsupportedQuery));
        }
    }

    #[test]
    fn unknown_data_type_is_unsupported() {
        let dataset = vec![student("Alice Smith", false, 3, 3)];
        let err = resolve(&dataset, &scope(), DataType::Unknown, None, today()).unwrap_err();
        assert!(matches!(err, PanelError::UnsupportedQuery));
    }

    #[test]
    fn resolve_is_idempotent() {
        let dataset = vec![
            student("Alice Smith", true, 3, 3),
            student("Bob Johnson", false, 5, 5),
        ];

        let first = resolve(
            &dataset,
            &scope(),
            DataType::Performance,
            Some("last week"),
            today(),
        )
        .unwrap();
        let second = resolve(
            &dataset,
            &scope(),
            DataType::Performance,
            Some("last week"),
            today(),
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn week_windows_are_anchored_around_today() {
        let (start, end) = trailing_week(today());
        assert_eq!(start, today() - Duration::days(7));
        assert_eq!(end, today() - Duration::days(1));

        let (start, end) = leading_week(today());
        assert_eq!(start, today() + Duration::days(1));
        assert_eq!(end, today() + Duration::days(7));
    }
}
