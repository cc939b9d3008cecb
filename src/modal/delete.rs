use super::{ModalEffect, WorkflowInput};
use crate::shared::ids::CustomerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Delete,
    Cancel,
}

/// "Delete this item?" confirmation. One prompt, no in-flight state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWorkflow {
    id: CustomerId,
    selected: DeleteChoice,
}

impl DeleteWorkflow {
    pub fn mount(id: CustomerId) -> Self {
        Self {
            id,
            selected: DeleteChoice::Delete,
        }
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.id
    }

    pub fn selected(&self) -> DeleteChoice {
        self.selected
    }

    pub fn handle_input(&mut self, input: WorkflowInput) -> Vec<ModalEffect> {
        match input {
            WorkflowInput::FocusNext | WorkflowInput::FocusPrev => {
                self.selected = match self.selected {
                    DeleteChoice::Delete => DeleteChoice::Cancel,
                    DeleteChoice::Cancel => DeleteChoice::Delete,
                };
                Vec::new()
            }
            WorkflowInput::Activate => match self.selected {
                DeleteChoice::Delete => self.confirm(),
                DeleteChoice::Cancel => self.cancel(),
            },
            WorkflowInput::Cancel => self.cancel(),
            WorkflowInput::Insert(_) | WorkflowInput::Backspace => Vec::new(),
        }
    }

    pub fn confirm(&self) -> Vec<ModalEffect> {
        vec![
            ModalEffect::CloseModal,
            ModalEffect::SendDelete(self.id.clone()),
        ]
    }

    pub fn cancel(&self) -> Vec<ModalEffect> {
        vec![ModalEffect::CloseModal]
    }
}
