//! Line-oriented prompts over any `BufRead`/`Write` pair

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use haulbook_types::{InputError, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.out)
    }

    /// Next line without its line ending, `None` at end of input
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print `label` and read the answer, trimmed
    pub fn text(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{}: ", label)?;
        let line = self.read_line()?.ok_or(InputError::Eof)?;
        Ok(line.trim().to_string())
    }

    pub fn number<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let answer = self.text(label)?;
        parse_number(&answer)
    }

    /// Empty answer means "skip"
    pub fn optional_number<T: FromStr>(&mut self, label: &str) -> Result<Option<T>> {
        let answer = self.text(label)?;
        if answer.is_empty() {
            return Ok(None);
        }
        parse_number(&answer).map(Some)
    }

    /// Empty answer means `default`
    pub fn timestamp(&mut self, label: &str, default: DateTime<Local>) -> Result<DateTime<Local>> {
        let answer = self.text(label)?;
        if answer.is_empty() {
            return Ok(default);
        }
        parse_timestamp(&answer)
    }
}

pub fn parse_number<T: FromStr>(s: &str) -> Result<T> {
    s.trim()
        .parse()
        .map_err(|_| InputError::NotANumber(s.to_string()).into())
}

/// Parse `YYYY-MM-DD HH:MM` in local time
pub fn parse_timestamp(s: &str) -> Result<DateTime<Local>> {
    let invalid = || InputError::InvalidTimestamp(s.to_string());
    let naive = NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| invalid().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_number_prompt_rejects_text() {
        let mut p = prompter("abc\n");
        let err = p.number::<u32>("Client id").unwrap_err();
        assert!(matches!(
            err,
            haulbook_types::Error::Input(InputError::NotANumber(_))
        ));
    }

    #[test]
    fn test_optional_number_skips_on_empty() {
        let mut p = prompter("\n7\n");
        assert_eq!(p.optional_number::<u32>("Transport id").unwrap(), None);
        assert_eq!(p.optional_number::<u32>("Transport id").unwrap(), Some(7));
    }

    #[test]
    fn test_text_at_eof_is_error() {
        let mut p = prompter("");
        assert!(matches!(
            p.text("Name"),
            Err(haulbook_types::Error::Input(InputError::Eof))
        ));
    }

    #[test]
    fn test_prompt_label_is_written() {
        let mut p = prompter("Acme\r\n");
        assert_eq!(p.text("Name").unwrap(), "Acme");
        let (_, out) = p.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Name: ");
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2025-02-03 14:05").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 2, 3));
        assert_eq!((ts.hour(), ts.minute()), (14, 5));
        assert!(parse_timestamp("03.02.2025").is_err());
    }
}
