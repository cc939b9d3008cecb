pub mod delete;
pub mod edit;
pub mod form;
pub mod shell;
pub mod store;

use crate::remote::CustomerUpdate;
use crate::shared::ids::CustomerId;

pub use delete::{DeleteChoice, DeleteWorkflow};
pub use edit::{EditState, EditWorkflow};
pub use form::{EditForm, EditFormValues, FormFocus};
pub use shell::{
    classify_pointer, mount_workflow, render_shell, shell_layout, ActiveWorkflow, PointerTarget,
    ShellLayout,
};
pub use store::{ModalName, ModalStore, ModalVisibility, SubscriptionId};

/// Work a mounted workflow asks the application to perform. Effects are
/// applied in the order they are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEffect {
    CloseModal,
    FetchCustomer(CustomerId),
    SendUpdate(CustomerUpdate),
    SendDelete(CustomerId),
}

/// Input routed to the workflow inside the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowInput {
    FocusNext,
    FocusPrev,
    Insert(char),
    Backspace,
    Activate,
    Cancel,
}
