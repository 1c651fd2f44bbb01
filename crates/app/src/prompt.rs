//! Confirmation prompts for destructive commands

use std::io::{self, BufRead, Write};

/// Ask a yes/no question; anything but "y" or "yes" declines
pub fn confirm_with<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Ask on the terminal unless the caller already agreed
pub fn confirm(question: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    confirm_with(question, &mut input, &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> bool {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = confirm_with("Delete?", &mut input, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Delete? [y/N] ");
        result
    }

    #[test]
    fn test_answers() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(!answer("n\n"));
        assert!(!answer("\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
