use std::io::{
    BufRead,
    Write,
};

use crate::{
    CliError,
    ValidationError,
};

/// Line-based question/answer driver over any reader and writer.
pub struct Prompter<R, W>
{
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W>
{
    pub fn new(
        input: R,
        output: W,
    ) -> Self
    {
        Self {
            input,
            output,
        }
    }

    /// Asks once and returns the answer without its line ending.
    pub fn ask(
        &mut self,
        field: &'static str,
        question: &str,
    ) -> Result<String, CliError>
    {
        write!(self.output, "{}", question).map_err(CliError::PromptIo)?;
        self.output.flush().map_err(CliError::PromptIo)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(CliError::PromptIo)?;
        if read == 0
        {
            return Err(CliError::MissingInput(field));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Re-asks until `validate` accepts the answer, printing each rejection.
    pub fn ask_until_valid<T>(
        &mut self,
        field: &'static str,
        question: &str,
        validate: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, CliError>
    {
        loop
        {
            let answer = self.ask(field, question)?;
            match validate(&answer)
            {
                Ok(value) => return Ok(value),
                Err(e) =>
                {
                    log::warn!("{}", e);
                    writeln!(self.output, "{}", e).map_err(CliError::PromptIo)?;
                },
            }
        }
    }

    pub fn say(
        &mut self,
        line: &str,
    ) -> Result<(), CliError>
    {
        writeln!(self.output, "{}", line).map_err(CliError::PromptIo)
    }
}
