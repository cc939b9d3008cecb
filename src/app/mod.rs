pub mod cli;
pub mod keys;
pub mod scripted;

use crate::cache::{remove_deleted_customer, QueryCache};
use crate::modal::{
    classify_pointer, mount_workflow, shell_layout, ActiveWorkflow, ModalEffect, ModalName,
    ModalStore, PointerTarget, WorkflowInput,
};
use crate::remote::{CustomerRecord, RemoteDispatch, RemoteRequest, RemoteResponse};
use crate::routing::{Router, DEFAULT_ROUTE};
use crate::shared::ids::CustomerId;
use crate::shared::logging::{ErrorReporter, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};
use ratatui::layout::Rect;

pub use keys::{app_action_from_key, parse_scripted_keys, AppAction, ScriptedInput};

const LIST_HINT_TEXT: &str = "Up/Down select | Backspace back | e edit | d delete | q quit";
const MODAL_HINT_TEXT: &str = "Tab/Up/Down move | Enter confirm | Esc close | click outside closes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub initial_path: String,
    pub surface_errors: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            initial_path: DEFAULT_ROUTE.to_string(),
            surface_errors: false,
        }
    }
}

/// Session state for the customer desk: location, cache, modal visibility and
/// the workflow mounted in the modal.
pub struct App {
    router: Router,
    cache: QueryCache,
    modals: ModalStore,
    active: Option<ActiveWorkflow>,
    status_text: String,
    surface_errors: bool,
    reporter: Box<dyn ErrorReporter>,
    dispatch: Box<dyn RemoteDispatch>,
    should_quit: bool,
}

impl App {
    pub fn new(
        options: AppOptions,
        reporter: Box<dyn ErrorReporter>,
        dispatch: Box<dyn RemoteDispatch>,
    ) -> Self {
        Self {
            router: Router::new(&options.initial_path),
            cache: QueryCache::new(),
            modals: ModalStore::new(),
            active: None,
            status_text: "Loading customers...".to_string(),
            surface_errors: options.surface_errors,
            reporter,
            dispatch,
            should_quit: false,
        }
    }

    /// Issues the list query that populates the cache for the list screen.
    pub fn bootstrap(&mut self) {
        self.dispatch.dispatch(RemoteRequest::ListCustomers);
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn modals(&self) -> &ModalStore {
        &self.modals
    }

    pub fn modals_mut(&mut self) -> &mut ModalStore {
        &mut self.modals
    }

    pub fn active_workflow(&self) -> Option<&ActiveWorkflow> {
        self.active.as_ref()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn hint_text(&self) -> &'static str {
        if self.modals.is_open() {
            MODAL_HINT_TEXT
        } else {
            LIST_HINT_TEXT
        }
    }

    pub fn surface_errors(&self) -> bool {
        self.surface_errors
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        self.cache.read_customers().unwrap_or(&[])
    }

    /// Index of the customer named by the current location, if listed.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.router.current_customer_id().ok()?;
        self.customers().iter().position(|customer| customer.id == id)
    }

    pub fn navigate(&mut self, path: &str) {
        self.router.push(path);
    }

    /// Opens `name` and mounts its workflow for the customer at the current
    /// location. Edit/Delete need a customer location; without one nothing
    /// opens.
    pub fn open_modal(&mut self, name: ModalName) {
        let (workflow, effects) = match mount_workflow(&name, self.router.current_path()) {
            Ok(mounted) => mounted,
            Err(err) => {
                self.report(LEVEL_WARN, "modal_open_rejected", &err);
                self.status_text = "Select a customer first.".to_string();
                return;
            }
        };
        if let ModalName::Unknown(other) = &name {
            self.report(
                LEVEL_WARN,
                "modal_unknown",
                &format!("no workflow is registered for modal `{other}`"),
            );
        }
        self.active = Some(workflow);
        self.modals.open(name);
        self.apply_effects(effects);
    }

    pub fn close_modal(&mut self) {
        if let Some(workflow) = self.active.as_mut() {
            workflow.close();
        }
        self.active = None;
        self.modals.close();
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::SelectPrev => self.move_selection(-1),
            AppAction::SelectNext => self.move_selection(1),
            AppAction::Back => {
                self.router.back();
            }
            AppAction::OpenModal(name) => {
                if !self.modals.is_open() {
                    self.open_modal(name);
                }
            }
            AppAction::CloseModal => self.close_modal(),
            AppAction::Workflow(input) => {
                let effects = match self.active.as_mut() {
                    Some(workflow) => workflow.handle_input(input),
                    None => Vec::new(),
                };
                self.apply_effects(effects);
            }
        }
    }

    /// Routes a pointer press. Only meaningful while a modal is open.
    pub fn handle_pointer(&mut self, area: Rect, column: u16, row: u16) {
        if !self.modals.is_open() {
            return;
        }
        match classify_pointer(&shell_layout(area), column, row) {
            PointerTarget::Backdrop | PointerTarget::CloseControl => self.close_modal(),
            PointerTarget::Panel => {}
        }
    }

    /// Applies workflow effects strictly in order, so `CloseModal` always
    /// lands before a mutation that follows it.
    pub fn apply_effects(&mut self, effects: Vec<ModalEffect>) {
        for effect in effects {
            match effect {
                ModalEffect::CloseModal => self.close_modal(),
                ModalEffect::FetchCustomer(id) => self.fetch_customer(id),
                ModalEffect::SendUpdate(update) => {
                    self.status_text = format!("Saving customer {}...", update.id);
                    self.dispatch.dispatch(RemoteRequest::UpdateCustomer(update));
                }
                ModalEffect::SendDelete(id) => {
                    self.status_text = format!("Deleting customer {id}...");
                    self.dispatch.dispatch(RemoteRequest::DeleteCustomer(id));
                }
            }
        }
    }

    /// Cache-first: a customer already answered by the single-customer query
    /// seeds the mounted form without a round trip.
    fn fetch_customer(&mut self, id: CustomerId) {
        let cached = self.cache.read_customer(&id).cloned();
        match (cached, self.active.as_mut()) {
            (Some(record), Some(ActiveWorkflow::Edit(workflow))) => {
                workflow.on_fetched(&id, &Ok(record));
            }
            _ => self.dispatch.dispatch(RemoteRequest::FetchCustomer(id)),
        }
    }

    /// Drains finished remote calls and reconciles them into the session.
    pub fn pump(&mut self) -> usize {
        let responses = self.dispatch.poll_responses();
        let count = responses.len();
        for response in responses {
            self.handle_response(response);
        }
        count
    }

    fn handle_response(&mut self, response: RemoteResponse) {
        match response {
            RemoteResponse::CustomersListed(Ok(customers)) => {
                self.status_text = format!("{} customers", customers.len());
                self.cache.write_customers(customers);
            }
            RemoteResponse::CustomersListed(Err(err)) => {
                self.status_text = "Customers unavailable.".to_string();
                self.report(LEVEL_ERROR, "list_failed", &err.to_string());
            }
            RemoteResponse::CustomerFetched { id, result } => {
                if let Ok(record) = &result {
                    self.cache.write_customer(record.clone());
                }
                if let Err(err) = &result {
                    self.report(
                        LEVEL_ERROR,
                        "fetch_failed",
                        &format!("customer {id}: {err}"),
                    );
                }
                if let Some(ActiveWorkflow::Edit(workflow)) = self.active.as_mut() {
                    workflow.on_fetched(&id, &result);
                }
            }
            RemoteResponse::CustomerUpdated { id, result } => match result {
                Ok(record) => {
                    self.status_text = format!("Saved customer {id}.");
                    self.cache.write_customer(record);
                }
                Err(err) => {
                    self.report(
                        LEVEL_ERROR,
                        "update_failed",
                        &format!("customer {id}: {err}"),
                    );
                }
            },
            RemoteResponse::CustomerDeleted { id, result } => match result {
                Ok(deleted) => {
                    self.status_text = format!("Deleted customer {}.", deleted.id);
                    if let Err(err) =
                        remove_deleted_customer(&mut self.cache, &mut self.router, &deleted.id)
                    {
                        self.report(
                            LEVEL_ERROR,
                            "cache_update_failed",
                            &format!("after deleting customer {}: {err}", deleted.id),
                        );
                    } else {
                        self.report(
                            LEVEL_INFO,
                            "customer_deleted",
                            &format!("customer {}", deleted.id),
                        );
                    }
                }
                Err(err) => {
                    self.report(
                        LEVEL_ERROR,
                        "delete_failed",
                        &format!("customer {id}: {err}"),
                    );
                }
            },
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.customers().len();
        if len == 0 {
            return;
        }
        let next = match self.selected_index() {
            Some(current) => (current as isize + delta).clamp(0, len as isize - 1) as usize,
            None if delta < 0 => len - 1,
            None => 0,
        };
        let path = self.customers()[next].id.to_path();
        self.router.push(&path);
    }

    fn report(&mut self, level: &str, event: &str, message: &str) {
        self.reporter.report(level, event, message);
        if self.surface_errors && level == LEVEL_ERROR {
            self.status_text = format!("{event}: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{InMemoryCustomerApi, InlineDispatch};
    use crate::shared::logging::RecordingReporter;

    fn app_with(path: &str) -> App {
        let mut app = App::new(
            AppOptions {
                initial_path: path.to_string(),
                surface_errors: false,
            },
            Box::new(RecordingReporter::new()),
            Box::new(InlineDispatch::new(InMemoryCustomerApi::seeded())),
        );
        app.bootstrap();
        app.pump();
        app
    }

    #[test]
    fn selection_walks_the_cached_list_through_the_router() {
        let mut app = app_with("/");
        assert_eq!(app.selected_index(), None);
        app.handle_action(AppAction::SelectNext);
        assert_eq!(app.router().current_path(), "/1");
        app.handle_action(AppAction::SelectNext);
        app.handle_action(AppAction::SelectNext);
        app.handle_action(AppAction::SelectNext);
        app.handle_action(AppAction::SelectNext);
        assert_eq!(app.router().current_path(), "/42");
        app.handle_action(AppAction::SelectPrev);
        assert_eq!(app.router().current_path(), "/3");
    }

    #[test]
    fn back_returns_to_the_previous_location() {
        let mut app = app_with("/");
        app.handle_action(AppAction::SelectNext);
        app.handle_action(AppAction::SelectNext);
        assert_eq!(app.router().current_path(), "/2");
        app.handle_action(AppAction::Back);
        assert_eq!(app.router().current_path(), "/1");
        app.handle_action(AppAction::Back);
        app.handle_action(AppAction::Back);
        assert_eq!(app.router().current_path(), DEFAULT_ROUTE);
    }

    #[test]
    fn open_without_customer_location_keeps_modal_hidden() {
        let mut app = app_with("/");
        app.handle_action(AppAction::OpenModal(ModalName::Edit));
        assert!(!app.modals().is_open());
        assert!(app.active_workflow().is_none());
    }

    #[test]
    fn pointer_inside_panel_keeps_modal_open() {
        let mut app = app_with("/42");
        app.open_modal(ModalName::Delete);
        let area = Rect::new(0, 0, 100, 40);
        let layout = shell_layout(area);

        app.handle_pointer(area, layout.panel.x + 2, layout.panel.y + 2);
        assert!(app.modals().is_open());

        app.handle_pointer(area, 0, 0);
        assert!(!app.modals().is_open());
        assert!(app.active_workflow().is_none());
    }
}
