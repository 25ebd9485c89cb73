//! GitHub Actions workflow commands.

/// `::error::` line that marks the job failed in the Actions UI.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message() {
        assert_eq!(error_command("Bad credentials"), "::error::Bad credentials");
    }

    #[test]
    fn escapes_newlines_and_percent() {
        assert_eq!(
            error_command("100% broken\r\nsecond line"),
            "::error::100%25 broken%0D%0Asecond line"
        );
    }
}
