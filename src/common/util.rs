use std::process::{Command, Stdio};

use tracing::{error, trace};

/// Splits a shell-like command line into words, honouring quotes and the
/// usual backslash escapes inside them.
pub fn parse_command(command: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current_part = String::new();
    let mut in_quotes = false;
    let mut chars = command.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' | '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current_part.is_empty() {
                    parts.push(std::mem::take(&mut current_part));
                }
            }
            '\\' if in_quotes => match chars.next() {
                Some('n') => current_part.push('\n'),
                Some('t') => current_part.push('\t'),
                Some(next_ch @ ('\\' | '\'' | '"')) => current_part.push(next_ch),
                Some(next_ch) => {
                    current_part.push('\\');
                    current_part.push(next_ch);
                }
                None => current_part.push('\\'),
            },
            _ => {
                current_part.push(ch);
            }
        }
    }

    if !current_part.is_empty() {
        parts.push(current_part);
    }

    parts
}

/// Runs an external command to completion, discarding its stdout.
///
/// Used for status bar visibility; failures are logged and otherwise
/// ignored.
pub fn run_external_command(command: &str) {
    let parts = parse_command(command);
    let Some((cmd, args)) = parts.split_first() else {
        error!("Empty external command");
        return;
    };

    trace!("Running external command: {}", command);
    let output = Command::new(cmd).args(args).stdout(Stdio::null()).output();

    match output {
        Ok(output) if output.status.success() => {
            trace!("External command completed: {}", command);
        }
        Ok(output) => {
            error!("External command failed with status {}: {}", output.status, command);
            if !output.stderr.is_empty() {
                error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
            }
        }
        Err(e) => {
            error!("Failed to execute external command '{}': {}", command, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(parse_command("polybar-msg cmd hide"), vec!["polybar-msg", "cmd", "hide"]);
    }

    #[test]
    fn keeps_quoted_words_together() {
        assert_eq!(
            parse_command(r#"notify-send "hello world""#),
            vec!["notify-send", "hello world"]
        );
        assert_eq!(parse_command(r#"echo "tab\there""#), vec!["echo", "tab\there"]);
    }

    #[test]
    fn empty_command_yields_nothing() {
        assert!(parse_command("   ").is_empty());
    }
}
