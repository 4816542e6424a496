use std::fmt;

use serde::Serialize;

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Number of subjects every student is graded in.
 */
pub const SUBJECT_COUNT: usize = 5;

/**
 * Highest mark a subject can get.
 */
pub const MAX_MARK: u32 = 100;

/**
 * A student with marks for every subject.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub roll_number: u32,
    pub marks: [u32; SUBJECT_COUNT],
}

impl Student {
    pub fn new(name: String, roll_number: u32, marks: [u32; SUBJECT_COUNT]) -> Self {
        Student { name, roll_number, marks }
    }

    /**
     * Validates the student.
     *
     * # Returns
     * The student itself or a validation error when the name is blank or a mark exceeds `MAX_MARK`.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        if self.name.trim().is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "Student name cannot be empty"));
        }
        if let Some((subject, mark)) = self.marks.iter().enumerate().find(|(_, mark)| **mark > MAX_MARK) {
            return Err(ApplicationError::new(ErrorType::Validation, format!("Mark {mark} for subject {} must be between 0 and {MAX_MARK}", subject + 1)));
        }
        Ok(self)
    }

    pub fn total(&self) -> u32 {
        self.marks.iter().sum()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        f64::from(self.total()) / SUBJECT_COUNT as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }
}

/**
 * Letter grade derived from the average mark.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /**
     * Thresholds are inclusive: 90 is an A, 89.99 is a B.
     */
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Grade::A
        } else if average >= 75.0 {
            Grade::B
        } else if average >= 60.0 {
            Grade::C
        } else if average >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Average",
            Grade::D => "Pass",
            Grade::F => "Fail",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{letter}")
    }
}

/**
 * Graded result for one student.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    pub name: String,
    pub roll_number: u32,
    pub total: u32,
    pub average: f64,
    pub grade: Grade,
    pub grade_description: String,
}

impl From<&Student> for ReportCard {
    fn from(student: &Student) -> Self {
        let grade = student.grade();
        ReportCard {
            name: student.name.clone(),
            roll_number: student.roll_number,
            total: student.total(),
            average: student.average(),
            grade,
            grade_description: grade.description().to_string(),
        }
    }
}

impl fmt::Display for ReportCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "----- Report Card -----")?;
        writeln!(f, "Name\t\t: {}", self.name)?;
        writeln!(f, "Roll No\t\t: {}", self.roll_number)?;
        writeln!(f, "Total Marks\t: {}", self.total)?;
        writeln!(f, "Average Marks\t: {:.2}", self.average)?;
        write!(f, "Grade\t\t: {} ({})", self.grade, self.grade_description)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn student_with_marks(marks: [u32; SUBJECT_COUNT]) -> Student {
        Student::new("Asha".to_string(), 7, marks)
    }

    #[test]
    fn test_total_and_average() {
        let student = student_with_marks([80, 90, 70, 60, 100]);
        assert_eq!(student.total(), 400);
        assert!((student.average() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_boundaries_inclusive() {
        assert_eq!(Grade::from_average(90.0), Grade::A);
        assert_eq!(Grade::from_average(89.8), Grade::B);
        assert_eq!(Grade::from_average(75.0), Grade::B);
        assert_eq!(Grade::from_average(74.8), Grade::C);
        assert_eq!(Grade::from_average(60.0), Grade::C);
        assert_eq!(Grade::from_average(59.8), Grade::D);
        assert_eq!(Grade::from_average(50.0), Grade::D);
        assert_eq!(Grade::from_average(49.8), Grade::F);
        assert_eq!(Grade::from_average(0.0), Grade::F);
    }

    #[test]
    fn test_grade_from_marks_at_boundary() {
        assert_eq!(student_with_marks([90, 90, 90, 90, 90]).grade(), Grade::A);
        assert_eq!(student_with_marks([90, 90, 90, 90, 89]).grade(), Grade::B);
        assert_eq!(student_with_marks([50, 50, 50, 50, 50]).grade(), Grade::D);
        assert_eq!(student_with_marks([50, 50, 50, 50, 49]).grade(), Grade::F);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let result = Student::new("  ".to_string(), 1, [10; SUBJECT_COUNT]).validate();
        assert_eq!(result.unwrap_err().message, "Student name cannot be empty");
    }

    #[test]
    fn test_validate_rejects_mark_above_maximum() {
        let result = student_with_marks([10, 20, 101, 40, 50]).validate();
        let error = result.unwrap_err();
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Mark 101 for subject 3 must be between 0 and 100");
    }

    #[test]
    fn test_report_card_display() {
        let report_card = ReportCard::from(&student_with_marks([95, 85, 75, 65, 55]));
        let rendered = report_card.to_string();
        assert!(rendered.contains("Name\t\t: Asha"));
        assert!(rendered.contains("Total Marks\t: 375"));
        assert!(rendered.contains("Average Marks\t: 75.00"));
        assert!(rendered.contains("Grade\t\t: B (Good)"));
    }
}
