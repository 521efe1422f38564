use std::fmt;

use super::error::RecordError;

pub const COURSEWORK_MAX: u32 = 60;
pub const EXAM_MAX: u32 = 100;
/// Coursework plus exam
pub const TOTAL_MAX: u32 = COURSEWORK_MAX + EXAM_MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub code: u32,
    pub name: String,
    pub c1: u32,
    pub c2: u32,
    pub c3: u32,
    pub exam: u32,
}

impl StudentRecord {
    /// Summed in `u64` so any three `u32` marks fit.
    pub fn coursework_total(&self) -> u64 {
        u64::from(self.c1) + u64::from(self.c2) + u64::from(self.c3)
    }

    /// Percentage of the 160 available marks, rounded to two decimals
    pub fn overall_percentage(&self) -> f64 {
        let total = (self.coursework_total() + u64::from(self.exam)) as f64;
        round2(total / f64::from(TOTAL_MAX) * 100.0)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.overall_percentage())
    }

    /// Builds a record from the six columns of a student file row
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let [code, name, c1, c2, c3, exam] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        Ok(Self {
            code: parse_mark("code", code)?,
            name: name.to_string(),
            c1: parse_mark("c1", c1)?,
            c2: parse_mark("c2", c2)?,
            c3: parse_mark("c3", c3)?,
            exam: parse_mark("exam", exam)?,
        })
    }
}

/// Formats a percentage the way a float prints in the report: whole
/// numbers keep one decimal, so `75.0` rather than `75`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:?}")
}

/// Python-style `round(x, 2)`: ties go to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn parse_mark(field: &'static str, value: &str) -> Result<u32, RecordError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidField {
            field,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 70.0 {
            Grade::A
        } else if percentage >= 60.0 {
            Grade::B
        } else if percentage >= 50.0 {
            Grade::C
        } else if percentage >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Raw text typed into the add/update dialogs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub code: String,
    pub name: String,
    pub c1: String,
    pub c2: String,
    pub c3: String,
    pub exam: String,
}

impl StudentForm {
    pub const LABELS: [&'static str; 6] = ["Code", "Name", "C1", "C2", "C3", "Exam"];

    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            code: record.code.to_string(),
            name: record.name.clone(),
            c1: record.c1.to_string(),
            c2: record.c2.to_string(),
            c3: record.c3.to_string(),
            exam: record.exam.to_string(),
        }
    }

    pub fn field(&self, idx: usize) -> &str {
        match idx {
            0 => &self.code,
            1 => &self.name,
            2 => &self.c1,
            3 => &self.c2,
            4 => &self.c3,
            _ => &self.exam,
        }
    }

    pub fn field_mut(&mut self, idx: usize) -> &mut String {
        match idx {
            0 => &mut self.code,
            1 => &mut self.name,
            2 => &mut self.c1,
            3 => &mut self.c2,
            4 => &mut self.c3,
            _ => &mut self.exam,
        }
    }

    pub fn to_record(&self) -> Result<StudentRecord, RecordError> {
        StudentRecord::from_fields([
            self.code.as_str(),
            self.name.as_str(),
            self.c1.as_str(),
            self.c2.as_str(),
            self.c3.as_str(),
            self.exam.as_str(),
        ])
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Student #: {}", self.code)?;
        writeln!(
            f,
            "Coursework Total: {}/{COURSEWORK_MAX}",
            self.coursework_total()
        )?;
        writeln!(f, "Exam: {}/{EXAM_MAX}", self.exam)?;
        writeln!(
            f,
            "Percentage: {}%",
            format_percentage(self.overall_percentage())
        )?;
        writeln!(f, "Grade: {}", self.grade())?;
        writeln!(f, "{}", "-".repeat(40))
    }
}
