use custdesk::app::{App, AppOptions};
use custdesk::modal::shell::{CLOSE_CONTROL_LABEL, DELETE_PROMPT, EDIT_HEADING, LOADING_TEXT};
use custdesk::modal::{
    render_shell, ActiveWorkflow, DeleteWorkflow, EditWorkflow, ModalName, ModalVisibility,
};
use custdesk::remote::{CustomerRecord, InMemoryCustomerApi, InlineDispatch};
use custdesk::shared::ids::CustomerId;
use custdesk::shared::logging::RecordingReporter;
use custdesk::tui::draw_app;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(visibility: &ModalVisibility, active: Option<&ActiveWorkflow>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
    terminal
        .draw(|frame| render_shell(frame, visibility, active, false))
        .expect("draw");
    buffer_text(terminal.backend().buffer())
}

fn ann() -> CustomerRecord {
    CustomerRecord {
        id: CustomerId::parse("42").expect("id"),
        name: "Ann".to_string(),
        email: "a@x.com".to_string(),
    }
}

#[test]
fn modal_shell_render_module_hidden_draws_nothing() {
    let text = render(&ModalVisibility::Hidden, None);
    assert!(text.chars().all(|ch| ch == ' ' || ch == '\n'));
}

#[test]
fn modal_shell_render_module_unknown_name_shows_only_the_frame() {
    let text = render(
        &ModalVisibility::Open(ModalName::Unknown("archive".to_string())),
        Some(&ActiveWorkflow::Empty),
    );
    assert!(text.contains(CLOSE_CONTROL_LABEL));
    assert!(text.contains("archive"));
    assert!(!text.contains(EDIT_HEADING));
    assert!(!text.contains(DELETE_PROMPT));
    assert!(!text.contains(LOADING_TEXT));
}

#[test]
fn modal_shell_render_module_edit_shows_loading_then_seeded_form() {
    let id = CustomerId::parse("42").expect("id");
    let (mut workflow, _) = EditWorkflow::mount(id.clone());
    let visibility = ModalVisibility::Open(ModalName::Edit);

    let loading = render(&visibility, Some(&ActiveWorkflow::Edit(workflow.clone())));
    assert!(loading.contains(LOADING_TEXT));
    assert!(!loading.contains(EDIT_HEADING));

    assert!(workflow.on_fetched(&id, &Ok(ann())));
    let ready = render(&visibility, Some(&ActiveWorkflow::Edit(workflow)));
    assert!(ready.contains(EDIT_HEADING));
    assert!(ready.contains("> Ann"));
    assert!(ready.contains("> a@x.com"));
    assert!(ready.contains("[ Save ]"));
}

#[test]
fn modal_shell_render_module_delete_shows_prompt_and_choices() {
    let workflow = DeleteWorkflow::mount(CustomerId::parse("7").expect("id"));
    let text = render(
        &ModalVisibility::Open(ModalName::Delete),
        Some(&ActiveWorkflow::Delete(workflow)),
    );
    assert!(text.contains(DELETE_PROMPT));
    assert!(text.contains("[ Delete ]"));
    assert!(text.contains("[ Cancel ]"));
    assert!(text.contains(CLOSE_CONTROL_LABEL));
}

#[test]
fn modal_shell_render_module_draws_list_screen_with_location() {
    let mut app = App::new(
        AppOptions {
            initial_path: "/42".to_string(),
            surface_errors: false,
        },
        Box::new(RecordingReporter::new()),
        Box::new(InlineDispatch::new(InMemoryCustomerApi::new(vec![ann()]))),
    );
    app.bootstrap();
    app.pump();

    let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
    terminal.draw(|frame| draw_app(frame, &app)).expect("draw");
    let text = buffer_text(terminal.backend().buffer());

    assert!(text.contains("Customers"));
    assert!(text.contains("Location: /42"));
    assert!(text.contains("a@x.com"));
    assert!(!text.contains(CLOSE_CONTROL_LABEL));
}
