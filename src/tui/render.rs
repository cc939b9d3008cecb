use crate::app::App;
use crate::modal::render_shell;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph};
use ratatui::Frame;

pub fn draw_app(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Customers",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Location: {}", app.router().current_path())),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let selected = app.selected_index();
    let items: Vec<ListItem<'_>> = app
        .customers()
        .iter()
        .enumerate()
        .map(|(idx, customer)| {
            let line = format!("{:<8} {:<24} {}", customer.id, customer.name, customer.email);
            let item = ListItem::new(Line::from(Span::raw(line)));
            if Some(idx) == selected {
                item.style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(list, chunks[1]);

    let footer = Paragraph::new(vec![
        Line::from(app.hint_text()),
        Line::from(format!("Status: {}", app.status_text())),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    render_shell(
        frame,
        app.modals().current(),
        app.active_workflow(),
        app.surface_errors(),
    );
}
