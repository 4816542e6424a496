use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::{
    api::response::Response,
    model::apperror::{ApplicationError, ErrorType},
};

/**
 * Line-oriented console shared by every application. Prompts go to the writer, answers come from the reader.
 */
pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    /**
     * Render response envelopes as JSON instead of text.
     */
    json_output: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W, json_output: bool) -> Self {
        Console { reader, writer, json_output }
    }

    pub fn write_line(&mut self, line: impl Display) -> Result<(), ApplicationError> {
        writeln!(self.writer, "{line}").map_err(|err| ApplicationError::new(ErrorType::Io, format!("Failed to write to console: {err}")))
    }

    /**
     * Reads one line with the line terminator and surrounding whitespace removed.
     *
     * # Returns
     * The line, or an `EndOfInput` error when the reader is exhausted.
     */
    pub fn read_line(&mut self) -> Result<String, ApplicationError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|err| ApplicationError::new(ErrorType::Io, format!("Failed to read from console: {err}")))?;
        if read == 0 {
            return Err(ApplicationError::new(ErrorType::EndOfInput, "End of input"));
        }
        Ok(line.trim().to_string())
    }

    /**
     * Writes `prompt` without a line break and reads the answer.
     */
    pub fn prompt(&mut self, prompt: &str) -> Result<String, ApplicationError> {
        write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()).map_err(|err| ApplicationError::new(ErrorType::Io, format!("Failed to write to console: {err}")))?;
        self.read_line()
    }

    /**
     * Prompts until the answer parses as `T`.
     *
     * # Arguments
     * `prompt`: The prompt written before every attempt.
     *
     * # Returns
     * The parsed value, or an error when the console fails or input ends.
     */
    pub fn read_value<T>(&mut self, prompt: &str) -> Result<T, ApplicationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let answer = self.prompt(prompt)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!("Rejected console input '{}': {}", answer, err);
                    self.write_line("Invalid input, please try again.")?;
                }
            }
        }
    }

    /**
     * Like `read_value`, but a blank answer yields `None`.
     */
    pub fn read_optional_value<T>(&mut self, prompt: &str) -> Result<Option<T>, ApplicationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let answer = self.prompt(prompt)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    tracing::debug!("Rejected console input '{}': {}", answer, err);
                    self.write_line("Invalid input, please try again.")?;
                }
            }
        }
    }

    /**
     * Prompts until the answer is a yes/no or true/false value.
     */
    pub fn read_flag(&mut self, prompt: &str) -> Result<bool, ApplicationError> {
        loop {
            match self.prompt(prompt)?.to_lowercase().as_str() {
                "y" | "yes" | "true" => return Ok(true),
                "n" | "no" | "false" => return Ok(false),
                _ => self.write_line("Please answer yes or no.")?,
            }
        }
    }

    /**
     * Renders a response envelope. Successful data goes through `render` unless JSON output is enabled.
     *
     * # Arguments
     * `response`: The envelope returned by a controller.
     * `render`: Text rendering of the data.
     *
     * # Returns
     * Whether the response was successful.
     */
    pub fn show<T: Serialize>(&mut self, response: &Response<T>, render: impl FnOnce(&T) -> String) -> Result<bool, ApplicationError> {
        if self.json_output {
            let json = serde_json::to_string(response).map_err(|err| ApplicationError::new(ErrorType::Io, format!("Failed to serialize response: {err}")))?;
            self.write_line(json)?;
            return Ok(response.is_success());
        }
        match (&response.data, &response.error_message) {
            (Some(data), _) if response.is_success() => self.write_line(render(data))?,
            (_, Some(error_message)) => self.write_line(format!("Error: {error_message}"))?,
            _ => self.write_line(format!("Error: status {}", response.status_code))?,
        }
        Ok(response.is_success())
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::Cursor;

    use super::*;

    pub(crate) fn console(input: &str, json_output: bool) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), json_output)
    }

    pub(crate) fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_writer()).unwrap()
    }

    #[test]
    fn test_read_value_reprompts() {
        let mut console = console("abc\n42\n", false);
        let value: u32 = console.read_value("Number: ").unwrap();
        assert_eq!(value, 42);
        assert_eq!(output(console), "Number: Invalid input, please try again.\nNumber: ");
    }

    #[test]
    fn test_read_line_end_of_input() {
        let mut console = console("", false);
        assert_eq!(console.read_line().unwrap_err().error_type, ErrorType::EndOfInput);
    }

    #[test]
    fn test_read_optional_value_blank() {
        let mut console = console("\n7\n", false);
        assert_eq!(console.read_optional_value::<i32>("Stock: ").unwrap(), None);
        assert_eq!(console.read_optional_value::<i32>("Stock: ").unwrap(), Some(7));
    }

    #[test]
    fn test_read_flag() {
        let mut console = console("maybe\nYes\n", false);
        assert!(console.read_flag("Rent? ").unwrap());
    }

    #[test]
    fn test_show_text_and_json() {
        let mut text_console = console("", false);
        assert!(text_console.show(&Response::success(5), |value| format!("value {value}")).unwrap());
        assert!(!text_console.show(&Response::<i32>::error("Invalid Customer Type"), |value| format!("value {value}")).unwrap());
        assert_eq!(output(text_console), "value 5\nError: Invalid Customer Type\n");

        let mut json_console = console("", true);
        json_console.show(&Response::<i32>::error("Invalid Customer Type"), |value| format!("value {value}")).unwrap();
        assert_eq!(output(json_console), "{\"statusCode\":400,\"errorMessage\":\"Invalid Customer Type\"}\n");
    }
}
