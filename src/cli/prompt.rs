//! Delete confirmation

use crate::project::options::BeforeDelete;
use std::io::{BufRead, Write};

/// Show the containers about to be removed and ask for confirmation.
///
/// Only an answer of exactly `y` or `Y` confirms. EOF and I/O errors decline.
pub fn confirm_delete<R, W>(containers: &[String], input: &mut R, output: &mut W) -> bool
where
    R: BufRead,
    W: Write,
{
    let asked = writeln!(
        output,
        "Going to remove {}\nAre you sure? [yN]",
        containers.join(", ")
    )
    .and_then(|_| output.flush());
    if let Err(e) = asked {
        tracing::error!("{}", e);
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => false,
        Ok(_) => matches!(answer.trim(), "y" | "Y"),
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

/// Confirmation callback reading from the terminal
pub fn terminal_confirmation() -> BeforeDelete {
    Box::new(|containers: &[String]| {
        confirm_delete(containers, &mut std::io::stdin().lock(), &mut std::io::stdout())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let containers = vec!["shop-web-1".to_string(), "shop-db-1".to_string()];
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let confirmed = confirm_delete(&containers, &mut input, &mut output);
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_accepts_only_y() {
        assert!(ask("y\n").0);
        assert!(ask("Y\n").0);
        assert!(ask("y").0);

        for answer in ["n\n", "yes\n", "\n", "", "yy\n", "y n\n", "N\n"] {
            assert!(!ask(answer).0, "answer {:?} must decline", answer);
        }
    }

    #[test]
    fn test_lists_containers() {
        let (_, prompt) = ask("n\n");
        assert_eq!(prompt, "Going to remove shop-web-1, shop-db-1\nAre you sure? [yN]\n");
    }

    #[test]
    fn test_read_error_declines() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
        }

        let mut input = std::io::BufReader::new(Broken);
        assert!(!confirm_delete(&["a".to_string()], &mut input, &mut Vec::new()));
    }
}
