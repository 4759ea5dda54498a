use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLabel {
    A,
    B,
}

impl ClassLabel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A" => Some(ClassLabel::A),
            "B" => Some(ClassLabel::B),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::A => "A",
            ClassLabel::B => "B",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    North,
    South,
}

impl Region {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "North" => Some(Region::North),
            "South" => Some(Region::South),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    pub grade: i32,
    pub class_label: ClassLabel,
    pub region: Region,
    pub homework_submitted: bool,
    pub quiz_score: i32,
    pub quiz_date: NaiveDate,
    pub upcoming_quiz: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub name: String,
    pub quiz_score: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingQuizRow {
    pub name: String,
    pub upcoming_quiz: NaiveDate,
}
