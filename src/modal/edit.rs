use super::form::{EditForm, EditFormValues, FormFocus};
use super::{ModalEffect, WorkflowInput};
use crate::remote::{CustomerRecord, CustomerUpdate};
use crate::shared::errors::RemoteError;
use crate::shared::ids::CustomerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Loading,
    Ready(EditForm),
    Submitting(EditFormValues),
    Error(String),
    Closed,
}

impl EditState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Submitting(_) => "submitting",
            Self::Error(_) => "error",
            Self::Closed => "closed",
        }
    }
}

/// Edit dialog for one customer: fetch, edit, submit once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditWorkflow {
    id: CustomerId,
    state: EditState,
}

impl EditWorkflow {
    pub fn mount(id: CustomerId) -> (Self, Vec<ModalEffect>) {
        let effects = vec![ModalEffect::FetchCustomer(id.clone())];
        (
            Self {
                id,
                state: EditState::Loading,
            },
            effects,
        )
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn form(&self) -> Option<&EditForm> {
        match &self.state {
            EditState::Ready(form) => Some(form),
            _ => None,
        }
    }

    /// Applies the fetch result. Results for another customer or arriving
    /// after loading finished are ignored; returns whether it was applied.
    pub fn on_fetched(
        &mut self,
        id: &CustomerId,
        result: &Result<CustomerRecord, RemoteError>,
    ) -> bool {
        if id != &self.id || self.state != EditState::Loading {
            return false;
        }
        self.state = match result {
            Ok(record) => EditState::Ready(EditForm::new(EditFormValues::from(record))),
            Err(err) => EditState::Error(err.to_string()),
        };
        true
    }

    pub fn handle_input(&mut self, input: WorkflowInput) -> Vec<ModalEffect> {
        let EditState::Ready(form) = &mut self.state else {
            return match input {
                WorkflowInput::Cancel => vec![ModalEffect::CloseModal],
                _ => Vec::new(),
            };
        };
        match input {
            WorkflowInput::FocusNext => form.focus_next(),
            WorkflowInput::FocusPrev => form.focus_prev(),
            WorkflowInput::Insert(ch) => form.insert_char(ch),
            WorkflowInput::Backspace => form.backspace(),
            WorkflowInput::Cancel => return vec![ModalEffect::CloseModal],
            WorkflowInput::Activate => {
                if form.focus() != FormFocus::Save && !form.can_submit() {
                    form.focus_next();
                    return Vec::new();
                }
                return self.submit();
            }
        }
        Vec::new()
    }

    /// Closes before the update is sent; the mutation result is reconciled
    /// by the caller.
    pub fn submit(&mut self) -> Vec<ModalEffect> {
        let EditState::Ready(form) = &mut self.state else {
            return Vec::new();
        };
        let Some(values) = form.begin_submit() else {
            return Vec::new();
        };
        let update = CustomerUpdate {
            id: self.id.clone(),
            name: values.name.clone(),
            email: values.email.clone(),
        };
        self.state = EditState::Submitting(values);
        vec![ModalEffect::CloseModal, ModalEffect::SendUpdate(update)]
    }

    pub fn close(&mut self) {
        self.state = EditState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> CustomerRecord {
        CustomerRecord {
            id: CustomerId::parse("42").expect("id"),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    fn ready() -> EditWorkflow {
        let id = CustomerId::parse("42").expect("id");
        let (mut workflow, _) = EditWorkflow::mount(id.clone());
        assert!(workflow.on_fetched(&id, &Ok(ann())));
        workflow
    }

    #[test]
    fn mount_requests_fetch_and_ignores_input_while_loading() {
        let id = CustomerId::parse("42").expect("id");
        let (mut workflow, effects) = EditWorkflow::mount(id.clone());
        assert_eq!(effects, vec![ModalEffect::FetchCustomer(id)]);
        assert_eq!(workflow.state(), &EditState::Loading);
        assert!(workflow.handle_input(WorkflowInput::Insert('x')).is_empty());
        assert!(workflow.handle_input(WorkflowInput::Activate).is_empty());
        assert_eq!(
            workflow.handle_input(WorkflowInput::Cancel),
            vec![ModalEffect::CloseModal]
        );
    }

    #[test]
    fn stale_fetch_results_are_ignored() {
        let mut workflow = ready();
        let other = CustomerId::parse("7").expect("id");
        assert!(!workflow.on_fetched(&other, &Ok(ann())));
        let id = CustomerId::parse("42").expect("id");
        assert!(!workflow.on_fetched(&id, &Err(RemoteError::WorkerStopped)));
        assert_eq!(workflow.state().as_str(), "ready");
    }

    #[test]
    fn fetch_failure_moves_to_error_without_a_form() {
        let id = CustomerId::parse("42").expect("id");
        let (mut workflow, _) = EditWorkflow::mount(id.clone());
        workflow.on_fetched(&id, &Err(RemoteError::NotFound { id: "42".to_string() }));
        assert!(matches!(workflow.state(), EditState::Error(_)));
        assert!(workflow.form().is_none());
        assert!(workflow.submit().is_empty());
    }

    #[test]
    fn enter_on_clean_field_advances_focus_instead_of_submitting() {
        let mut workflow = ready();
        assert!(workflow.handle_input(WorkflowInput::Activate).is_empty());
        assert_eq!(workflow.form().map(EditForm::focus), Some(FormFocus::Email));
        assert!(workflow.handle_input(WorkflowInput::Activate).is_empty());
        assert!(workflow.handle_input(WorkflowInput::Activate).is_empty());
        assert_eq!(workflow.state().as_str(), "ready");
    }
}
