use crate::modal::{ModalName, WorkflowInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV_VAR: &str = "CUSTDESK_SCRIPT_KEYS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    SelectPrev,
    SelectNext,
    Back,
    OpenModal(ModalName),
    CloseModal,
    Workflow(WorkflowInput),
}

/// While a modal is open every printable key goes to the workflow, so `e`,
/// `d` and `q` are only shortcuts on the list screen.
pub fn app_action_from_key(modal_open: bool, key: KeyEvent) -> Option<AppAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }
    if modal_open {
        return match key.code {
            KeyCode::Esc => Some(AppAction::CloseModal),
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                Some(AppAction::Workflow(WorkflowInput::FocusNext))
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                Some(AppAction::Workflow(WorkflowInput::FocusPrev))
            }
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
                Some(AppAction::Workflow(WorkflowInput::Activate))
            }
            KeyCode::Backspace => Some(AppAction::Workflow(WorkflowInput::Backspace)),
            KeyCode::Char(ch) => Some(AppAction::Workflow(WorkflowInput::Insert(ch))),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(AppAction::SelectPrev),
        KeyCode::Down => Some(AppAction::SelectNext),
        KeyCode::Backspace => Some(AppAction::Back),
        KeyCode::Char('e') => Some(AppAction::OpenModal(ModalName::Edit)),
        KeyCode::Char('d') => Some(AppAction::OpenModal(ModalName::Delete)),
        KeyCode::Char('q') | KeyCode::Esc => Some(AppAction::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedInput {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
}

fn key(code: KeyCode) -> ScriptedInput {
    ScriptedInput::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn parse_scripted_keys(raw: &str) -> Result<Vec<ScriptedInput>, String> {
    let mut inputs = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(ch) = trimmed.strip_prefix("char:") {
            let mut chars = ch.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => inputs.push(key(KeyCode::Char(ch))),
                _ => {
                    return Err(format!(
                        "invalid {SCRIPT_KEYS_ENV_VAR} token `{trimmed}`; char: takes one character"
                    ))
                }
            }
            continue;
        }
        if let Some(position) = trimmed.strip_prefix("click:") {
            let parsed: Option<(u16, u16)> = position
                .split_once(':')
                .and_then(|(column, row)| Some((column.parse().ok()?, row.parse().ok()?)));
            match parsed {
                Some((column, row)) => inputs.push(ScriptedInput::Click { column, row }),
                None => {
                    return Err(format!(
                        "invalid {SCRIPT_KEYS_ENV_VAR} token `{trimmed}`; use click:<column>:<row>"
                    ))
                }
            }
            continue;
        }
        let input = match trimmed.to_ascii_lowercase().as_str() {
            "up" => key(KeyCode::Up),
            "down" => key(KeyCode::Down),
            "left" => key(KeyCode::Left),
            "right" => key(KeyCode::Right),
            "tab" => key(KeyCode::Tab),
            "backtab" => key(KeyCode::BackTab),
            "enter" => key(KeyCode::Enter),
            "esc" => key(KeyCode::Esc),
            "backspace" => key(KeyCode::Backspace),
            "ctrl-c" => {
                ScriptedInput::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            }
            "e" => key(KeyCode::Char('e')),
            "d" => key(KeyCode::Char('d')),
            "q" => key(KeyCode::Char('q')),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV_VAR} token `{other}`; valid tokens: up,down,left,right,tab,backtab,enter,esc,backspace,ctrl-c,e,d,q,char:<c>,click:<column>:<row>"
                ));
            }
        };
        inputs.push(input);
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn shortcuts_only_apply_on_the_list_screen() {
        assert_eq!(
            app_action_from_key(false, press(KeyCode::Char('e'))),
            Some(AppAction::OpenModal(ModalName::Edit))
        );
        assert_eq!(
            app_action_from_key(true, press(KeyCode::Char('e'))),
            Some(AppAction::Workflow(WorkflowInput::Insert('e')))
        );
        assert_eq!(
            app_action_from_key(true, press(KeyCode::Esc)),
            Some(AppAction::CloseModal)
        );
        assert_eq!(
            app_action_from_key(false, press(KeyCode::Esc)),
            Some(AppAction::Quit)
        );
        assert_eq!(
            app_action_from_key(false, press(KeyCode::Backspace)),
            Some(AppAction::Back)
        );
        assert_eq!(
            app_action_from_key(true, press(KeyCode::Backspace)),
            Some(AppAction::Workflow(WorkflowInput::Backspace))
        );
    }

    #[test]
    fn parse_scripted_keys_supports_chars_and_clicks() {
        let inputs = parse_scripted_keys("down, e ,char:A,click:3:4").expect("parse");
        assert_eq!(
            inputs,
            vec![
                key(KeyCode::Down),
                key(KeyCode::Char('e')),
                key(KeyCode::Char('A')),
                ScriptedInput::Click { column: 3, row: 4 },
            ]
        );
        assert!(parse_scripted_keys("char:ab").is_err());
        assert!(parse_scripted_keys("click:1").is_err());
        assert!(parse_scripted_keys("jump").is_err());
    }
}
