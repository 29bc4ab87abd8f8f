use std::fmt::Write as _;

use snackbar::VisibleState;
use tokio::sync::watch;
use tracing::info;

/// Print every change of the visible slot until the driver goes away.
pub async fn run_renderer(mut slot: watch::Receiver<VisibleState>) {
    while slot.changed().await.is_ok() {
        let state = slot.borrow_and_update().clone();
        if state.is_open {
            info!(
                id = ?state.id,
                severity = %state.severity,
                actions = state.actions.len(),
                "notification visible"
            );
        }
        println!("{}", render(&state));
    }
}

pub fn render(state: &VisibleState) -> String {
    if !state.is_open {
        return "(closed)".to_string();
    }

    let mut line = format!("[{}] {}", state.severity, state.message);
    if !state.actions.is_empty() {
        let actions: Vec<String> = state
            .actions
            .iter()
            .map(|action| match action.target.as_deref() {
                Some(target) => format!("{} -> {target}", action.label),
                None => action.label.clone(),
            })
            .collect();
        let _ = write!(line, " ({})", actions.join(", "));
    }
    if state.is_closable() {
        line.push_str(" [x]");
    }
    line
}
