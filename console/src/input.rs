// Line-based prompts. `None` means the input stream ended.
use anyhow::Result;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a non-negative number; blank input keeps `current`.
    pub fn number(&mut self, label: &str, current: f64) -> Result<Option<f64>> {
        loop {
            let Some(answer) = self.read_line(&format!("{} [{}]: ", label, current))? else {
                return Ok(None);
            };
            match parse_number(&answer, current) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }

    /// Asks for a 1-based index into `labels`; blank keeps `current`.
    pub fn choice(&mut self, label: &str, labels: &[String], current: usize) -> Result<Option<usize>> {
        for (idx, item) in labels.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, item)?;
        }
        loop {
            let Some(answer) = self.read_line(&format!("{} [{}]: ", label, current + 1))? else {
                return Ok(None);
            };
            match parse_choice(&answer, labels, current) {
                Ok(idx) => return Ok(Some(idx)),
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }
}

pub fn parse_number(answer: &str, current: f64) -> Result<f64, String> {
    if answer.is_empty() {
        return Ok(current);
    }
    let value: f64 = answer
        .replace(',', "")
        .parse()
        .map_err(|_| format!("数値を入力してください: '{}'", answer))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("0 以上の数値を入力してください: '{}'", answer));
    }
    Ok(value)
}

/// Accepts a list number or a label prefix such as the short name.
pub fn parse_choice(answer: &str, labels: &[String], current: usize) -> Result<usize, String> {
    if answer.is_empty() {
        return Ok(current);
    }
    if let Ok(number) = answer.parse::<usize>() {
        if (1..=labels.len()).contains(&number) {
            return Ok(number - 1);
        }
        return Err(format!("1 から {} の番号を入力してください", labels.len()));
    }
    labels
        .iter()
        .position(|label| label == answer || label.starts_with(&format!("{}（", answer)))
        .ok_or_else(|| format!("該当する製品がありません: '{}'", answer))
}
