use std::io::{BufRead, Write};

use crate::{
    api::students::StudentController,
    model::{
        apperror::ApplicationError,
        students::{MAX_MARK, SUBJECT_COUNT, Student},
    },
    ui::console::Console,
};

/**
 * Reads the students from the console and prints a report card for each of them.
 */
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &StudentController) -> Result<(), ApplicationError> {
    let count: usize = console.read_value("Enter number of students: ")?;
    let mut responses = Vec::new();
    for index in 1..=count {
        console.write_line(format!("Enter details for student {index}"))?;
        let name = console.prompt("Name: ")?;
        let roll_number: u32 = console.read_value("Roll number: ")?;
        let mut marks = [0; SUBJECT_COUNT];
        for (subject, mark) in marks.iter_mut().enumerate() {
            *mark = console.read_value(&format!("Marks for subject {} (0-{MAX_MARK}): ", subject + 1))?;
        }
        responses.push(controller.generate_report_card(Student::new(name, roll_number, marks)));
    }
    for response in &responses {
        console.show(response, |report_card| report_card.to_string())?;
    }
    Ok(())
}
