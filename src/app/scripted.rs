use super::{app_action_from_key, App, ScriptedInput};
use crate::modal::{ActiveWorkflow, ModalVisibility};
use ratatui::layout::Rect;

/// Terminal size assumed when scripted clicks are classified.
pub const SCRIPTED_AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 40,
};

/// Drives the session without a terminal; remote responses are pumped
/// between inputs the way the interactive loop does between frames.
pub fn run_scripted(app: &mut App, inputs: &[ScriptedInput]) -> String {
    app.pump();
    for input in inputs {
        match *input {
            ScriptedInput::Key(key) => {
                if let Some(action) = app_action_from_key(app.modals().is_open(), key) {
                    app.handle_action(action);
                }
            }
            ScriptedInput::Click { column, row } => {
                app.handle_pointer(SCRIPTED_AREA, column, row);
            }
        }
        app.pump();
        if app.should_quit() {
            break;
        }
    }
    describe_session(app)
}

pub fn describe_session(app: &App) -> String {
    let modal = match app.modals().current() {
        ModalVisibility::Hidden => "none".to_string(),
        ModalVisibility::Open(name) => name.to_string(),
    };
    let workflow = match app.active_workflow() {
        Some(ActiveWorkflow::Edit(workflow)) => format!("edit:{}", workflow.state().as_str()),
        Some(ActiveWorkflow::Delete(_)) => "delete".to_string(),
        Some(ActiveWorkflow::Empty) => "empty".to_string(),
        None => "none".to_string(),
    };
    let customers = app
        .customers()
        .iter()
        .map(|customer| format!("{}={} <{}>", customer.id, customer.name, customer.email))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "path={}\nmodal={}\nworkflow={}\ncustomers={}\nstatus={}",
        app.router().current_path(),
        modal,
        workflow,
        customers,
        app.status_text()
    )
}
