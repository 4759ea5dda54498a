use std::fmt::Write;

use crate::resolver::ResolvedResult;

/// Renders a resolved result as plain text for the terminal. The core never
/// prints; this is the only place results become display strings.
pub fn render(result: &ResolvedResult) -> String {
    let mut output = String::new();

    match result {
        ResolvedResult::MissingHomework(names) => {
            let _ = writeln!(output, "Students with missing homework:");
            for name in names {
                let _ = writeln!(output, "- {name}");
            }
        }
        ResolvedResult::Performance(rows) => {
            let _ = writeln!(output, "Quiz performance (last week):");
            for row in rows {
                let _ = writeln!(output, "- {} scored {}", row.name, row.quiz_score);
            }
        }
        ResolvedResult::UpcomingQuizzes(rows) => {
            let _ = writeln!(output, "Upcoming quizzes (next week):");
            for row in rows {
                let _ = writeln!(output, "- {} on {}", row.name, row.upcoming_quiz);
            }
        }
        ResolvedResult::Notice(message) => {
            let _ = writeln!(output, "{message}");
        }
    }

    output.trim_end().to_string()
}
