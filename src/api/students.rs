use tracing::instrument;

use crate::{
    api::response::Response,
    model::students::{ReportCard, Student},
    service::students::StudentService,
};

/**
 * Controller for the student grading application.
 */
pub struct StudentController {
    student_service: StudentService,
}

impl StudentController {
    pub fn new(student_service: StudentService) -> Self {
        StudentController { student_service }
    }

    /**
     * Generates the report card of a student.
     *
     * # Arguments
     * `student`: The student with marks for every subject.
     *
     * # Returns
     * A `Response` carrying the `ReportCard` or the reason it could not be generated.
     */
    #[instrument(skip(self, student), fields(service = "generateReportCard"))]
    pub fn generate_report_card(&self, student: Student) -> Response<ReportCard> {
        Response::from(self.student_service.generate_report_card(student))
    }
}
