use humantime::parse_duration;
use snackbar::error::InputError;
use snackbar::{Action, NotificationRequest, Severity};

#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Notify(NotificationRequest),
    Close,
    Quit,
    Blank,
}

/// Parse `<severity>[@<duration>] <message> [| <label>[=<target>]]...`.
pub fn parse_line(line: &str) -> Result<Line, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }
    match line.to_ascii_lowercase().as_str() {
        "close" => return Ok(Line::Close),
        "quit" | "exit" => return Ok(Line::Quit),
        _ => {}
    }

    let mut segments = line.split('|');
    let head = segments.next().unwrap_or_default().trim();
    let (label, message) = head
        .split_once(char::is_whitespace)
        .map_or((head, ""), |(label, rest)| (label, rest.trim()));

    let (severity, duration) = match label.split_once('@') {
        Some((severity, raw)) => {
            let duration = parse_duration(raw).map_err(|err| InputError::InvalidDuration {
                raw: raw.to_string(),
                message: err.to_string(),
            })?;
            (severity, Some(duration))
        }
        None => (label, None),
    };

    if message.is_empty() {
        return Err(InputError::MissingMessage {
            severity: severity.to_string(),
        });
    }

    let actions = segments
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_action)
        .collect::<Result<Vec<_>, _>>()?;

    let mut request =
        NotificationRequest::new(message, Severity::from(severity)).with_actions(actions);
    if let Some(duration) = duration {
        request = request.with_duration(duration);
    }
    Ok(Line::Notify(request))
}

fn parse_action(segment: &str) -> Result<Action, InputError> {
    let (label, target) = match segment.split_once('=') {
        Some((label, target)) => (label.trim(), Some(target.trim())),
        None => (segment, None),
    };
    if label.is_empty() {
        return Err(InputError::EmptyActionLabel);
    }
    let action = Action::new(label);
    Ok(match target.filter(|t| !t.is_empty()) {
        Some(target) => action.with_target(target),
        None => action,
    })
}

#[cfg(test)]
mod tests {
    use super::{Line, parse_line};
    use snackbar::error::InputError;
    use snackbar::{Action, NotificationRequest, Severity};
    use std::time::Duration;

    fn notify(line: &str) -> NotificationRequest {
        match parse_line(line) {
            Ok(Line::Notify(request)) => request,
            other => panic!("expected a notification for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_notification() {
        let request = notify("success Volume set to -12 dB");
        assert_eq!(request.severity, Severity::Success);
        assert_eq!(request.message, "Volume set to -12 dB");
        assert!(request.actions.is_empty());
        assert_eq!(request.duration, None);
    }

    #[test]
    fn duration_and_actions() {
        let request = notify("error@0s Amplifier unreachable | Retry=/api/status | Dismiss");
        assert_eq!(request.duration, Some(Duration::ZERO));
        assert_eq!(
            request.actions,
            vec![
                Action::new("Retry").with_target("/api/status"),
                Action::new("Dismiss"),
            ]
        );
        assert_eq!(request.message, "Amplifier unreachable");
    }

    #[test]
    fn commands_and_blanks() {
        assert_eq!(parse_line("close"), Ok(Line::Close));
        assert_eq!(parse_line("  QUIT "), Ok(Line::Quit));
        assert_eq!(parse_line(""), Ok(Line::Blank));
        assert_eq!(parse_line("# comment"), Ok(Line::Blank));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_line("error"),
            Err(InputError::MissingMessage { .. })
        ));
        assert!(matches!(
            parse_line("info@soon hello"),
            Err(InputError::InvalidDuration { .. })
        ));
        assert_eq!(
            parse_line("info hello | =/nowhere"),
            Err(InputError::EmptyActionLabel)
        );
    }
}
