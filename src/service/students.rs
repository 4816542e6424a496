use tracing::instrument;

use crate::model::{
    apperror::ApplicationError,
    students::{ReportCard, Student},
};

/**
 * Represents the service for grading students.
 */
pub struct StudentService {}

impl StudentService {
    pub fn new() -> Self {
        StudentService {}
    }

    /**
     * Grades a student.
     *
     * # Arguments
     * `student`: The student with marks for every subject.
     *
     * # Returns
     * A Result containing the `ReportCard` or an `ApplicationError` when the student is invalid.
     */
    #[instrument(skip(self), fields(roll_number = student.roll_number))]
    pub fn generate_report_card(&self, student: Student) -> Result<ReportCard, ApplicationError> {
        let student = student.validate()?;
        let report_card = ReportCard::from(&student);
        tracing::debug!("Student {} graded {}", report_card.roll_number, report_card.grade);
        Ok(report_card)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::students::Grade;

    #[test]
    fn test_generate_report_card() {
        let report_card = StudentService::new().generate_report_card(Student::new("Irfan".to_string(), 12, [92, 88, 95, 90, 85])).unwrap();
        assert_eq!(report_card.total, 450);
        assert_eq!(report_card.grade, Grade::A);
        assert_eq!(report_card.grade_description, "Excellent");
    }

    #[test]
    fn test_generate_report_card_invalid() {
        let result = StudentService::new().generate_report_card(Student::new(String::new(), 12, [92, 88, 95, 90, 85]));
        assert!(result.is_err());
    }
}
