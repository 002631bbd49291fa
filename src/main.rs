//! Evaluate one line of arithmetic from stdin, print the result on stdout.
//!
//! ```ignore
//! echo '((1+2)*(3-1))' | parencalc
//! ```
//!
//! Set `RUST_LOG=parencalc=trace` to see the tokens and grammar steps on stderr.

use std::io::{ErrorKind, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

/// Report the outcome of a run; true on success.
///
/// Evaluation errors (`InvalidInput`) were already reported by `repl`;
/// anything else is an I/O failure and gets reported here.
fn report(result: std::io::Result<()>, errors: &mut impl Write) -> bool {
    match result {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::InvalidInput => false,
        Err(e) => {
            // Nowhere left to report a failed write to stderr.
            let _ = writeln!(errors, "error: {}", e);
            false
        }
    }
}

fn main() -> ExitCode {
    // Log to stderr: stdout carries only the result.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    let result = parencalc::repl(&mut stdin, &mut stdout, &mut stderr);
    if report(result, &mut stderr) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let result = parencalc::repl(&mut Cursor::new(input), &mut output, &mut errors);
        let ok = report(result, &mut errors);
        (ok, String::from_utf8(errors).unwrap())
    }

    #[test]
    fn success_is_silent() {
        let (ok, errors) = run("(1 + 2)\n");
        assert!(ok);
        assert_eq!(errors, "");
    }

    #[test]
    fn evaluation_error_is_reported_once() {
        let (ok, errors) = run("(1 + x)\n");
        assert!(!ok);
        assert_eq!(errors.lines().count(), 1, "unexpected error output: {:?}", errors);
        assert!(errors.starts_with("error: "));
        assert!(!errors.contains("Custom"), "debug formatting leaked: {:?}", errors);
    }

    #[test]
    fn io_error_is_reported() {
        let mut errors = Vec::new();
        let failure = std::io::Error::new(ErrorKind::BrokenPipe, "stdout closed");
        assert!(!report(Err(failure), &mut errors));
        assert_eq!(String::from_utf8(errors).unwrap(), "error: stdout closed\n");
    }
}
