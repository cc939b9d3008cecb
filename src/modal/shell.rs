use super::delete::{DeleteChoice, DeleteWorkflow};
use super::edit::{EditState, EditWorkflow};
use super::form::{EditForm, FormFocus};
use super::store::{ModalName, ModalVisibility};
use super::{ModalEffect, WorkflowInput};
use crate::shared::ids::CustomerId;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;

pub const CLOSE_CONTROL_LABEL: &str = "[x]";
pub const EDIT_HEADING: &str = "Edit data";
pub const DELETE_PROMPT: &str = "Delete this item?";
pub const LOADING_TEXT: &str = "Loading...";
pub const LOAD_FAILED_TEXT: &str = "Customer could not be loaded.";

/// The workflow mounted inside the open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveWorkflow {
    Edit(EditWorkflow),
    Delete(DeleteWorkflow),
    Empty,
}

impl ActiveWorkflow {
    pub fn handle_input(&mut self, input: WorkflowInput) -> Vec<ModalEffect> {
        match self {
            Self::Edit(workflow) => workflow.handle_input(input),
            Self::Delete(workflow) => workflow.handle_input(input),
            Self::Empty => match input {
                WorkflowInput::Cancel => vec![ModalEffect::CloseModal],
                _ => Vec::new(),
            },
        }
    }

    pub fn close(&mut self) {
        if let Self::Edit(workflow) = self {
            workflow.close();
        }
    }
}

/// Mounts the workflow for `name`. Edit and Delete take their identity from
/// `location` by the same rule; unknown names mount nothing.
pub fn mount_workflow(
    name: &ModalName,
    location: &str,
) -> Result<(ActiveWorkflow, Vec<ModalEffect>), String> {
    match name {
        ModalName::Edit => {
            let (workflow, effects) = EditWorkflow::mount(CustomerId::from_path(location)?);
            Ok((ActiveWorkflow::Edit(workflow), effects))
        }
        ModalName::Delete => {
            let workflow = DeleteWorkflow::mount(CustomerId::from_path(location)?);
            Ok((ActiveWorkflow::Delete(workflow), Vec::new()))
        }
        ModalName::Unknown(_) => Ok((ActiveWorkflow::Empty, Vec::new())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Backdrop,
    Panel,
    CloseControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub panel: Rect,
    pub close_control: Rect,
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn shell_layout(area: Rect) -> ShellLayout {
    let panel = centered_rect(60, 50, area);
    let width = CLOSE_CONTROL_LABEL.len() as u16;
    let close_control = Rect {
        x: panel.right().saturating_sub(width + 1).max(panel.x),
        y: panel.y,
        width: width.min(panel.width),
        height: panel.height.min(1),
    };
    ShellLayout {
        panel,
        close_control,
    }
}

/// Clicks on the close control or outside the panel close the modal; clicks
/// inside the panel stay there.
pub fn classify_pointer(layout: &ShellLayout, column: u16, row: u16) -> PointerTarget {
    if contains(layout.close_control, column, row) {
        PointerTarget::CloseControl
    } else if contains(layout.panel, column, row) {
        PointerTarget::Panel
    } else {
        PointerTarget::Backdrop
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

pub fn render_shell(
    frame: &mut Frame<'_>,
    visibility: &ModalVisibility,
    active: Option<&ActiveWorkflow>,
    surface_errors: bool,
) {
    let ModalVisibility::Open(name) = visibility else {
        return;
    };
    let layout = shell_layout(frame.area());
    frame.render_widget(Clear, layout.panel);
    let block = Block::default()
        .title(Span::styled(
            format!(" {name} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(layout.panel);
    frame.render_widget(block, layout.panel);
    frame.render_widget(
        Paragraph::new(CLOSE_CONTROL_LABEL).style(Style::default().fg(Color::Red)),
        layout.close_control,
    );

    let lines = match active {
        Some(ActiveWorkflow::Edit(workflow)) => edit_lines(workflow, surface_errors),
        Some(ActiveWorkflow::Delete(workflow)) => delete_lines(workflow),
        Some(ActiveWorkflow::Empty) | None => Vec::new(),
    };
    if !lines.is_empty() {
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn edit_lines(workflow: &EditWorkflow, surface_errors: bool) -> Vec<Line<'static>> {
    match workflow.state() {
        EditState::Loading => vec![Line::from(LOADING_TEXT)],
        EditState::Ready(form) => form_lines(form),
        EditState::Error(message) if surface_errors => vec![
            Line::from(Span::styled(LOAD_FAILED_TEXT, Style::default().fg(Color::Red))),
            Line::from(message.clone()),
        ],
        EditState::Error(_) | EditState::Submitting(_) | EditState::Closed => Vec::new(),
    }
}

fn form_lines(form: &EditForm) -> Vec<Line<'static>> {
    let values = form.values();
    let save_style = if form.can_submit() {
        focus_style(form.focus() == FormFocus::Save)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![
        heading(EDIT_HEADING),
        Line::from(""),
        Line::from(vec![
            Span::raw("Name   "),
            Span::styled(
                format!("> {}", values.name),
                focus_style(form.focus() == FormFocus::Name),
            ),
        ]),
        Line::from(vec![
            Span::raw("Email  "),
            Span::styled(
                format!("> {}", values.email),
                focus_style(form.focus() == FormFocus::Email),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("[ Save ]", save_style)),
    ]
}

fn delete_lines(workflow: &DeleteWorkflow) -> Vec<Line<'static>> {
    vec![
        heading(DELETE_PROMPT),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[ Delete ]",
                focus_style(workflow.selected() == DeleteChoice::Delete),
            ),
            Span::raw("  "),
            Span::styled(
                "[ Cancel ]",
                focus_style(workflow.selected() == DeleteChoice::Cancel),
            ),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_classification_matches_layout() {
        let layout = shell_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(classify_pointer(&layout, 0, 0), PointerTarget::Backdrop);
        assert_eq!(
            classify_pointer(&layout, layout.panel.x + 3, layout.panel.y + 3),
            PointerTarget::Panel
        );
        assert_eq!(
            classify_pointer(&layout, layout.close_control.x, layout.close_control.y),
            PointerTarget::CloseControl
        );
        assert_eq!(
            classify_pointer(&layout, layout.panel.right(), layout.panel.y + 1),
            PointerTarget::Backdrop
        );
    }

    #[test]
    fn mount_workflow_uses_location_for_both_workflows() {
        let (edit, effects) = mount_workflow(&ModalName::Edit, "/42").expect("edit");
        let id = CustomerId::parse("42").expect("id");
        assert_eq!(effects, vec![ModalEffect::FetchCustomer(id.clone())]);
        assert!(matches!(edit, ActiveWorkflow::Edit(ref w) if w.customer_id() == &id));

        let (delete, effects) = mount_workflow(&ModalName::Delete, "/42").expect("delete");
        assert!(effects.is_empty());
        assert!(matches!(delete, ActiveWorkflow::Delete(ref w) if w.customer_id() == &id));

        assert!(mount_workflow(&ModalName::Edit, "/").is_err());
        let (empty, _) =
            mount_workflow(&ModalName::Unknown("x".to_string()), "/").expect("unknown");
        assert_eq!(empty, ActiveWorkflow::Empty);
    }
}
