use crate::remote::CustomerRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditFormValues {
    pub name: String,
    pub email: String,
}

impl From<&CustomerRecord> for EditFormValues {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Email,
    Save,
}

const FOCUS_ORDER: [FormFocus; 3] = [FormFocus::Name, FormFocus::Email, FormFocus::Save];

/// Name/email form seeded from a fetched record. Save is only enabled once a
/// field differs from its seeded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    initial: EditFormValues,
    values: EditFormValues,
    focus: FormFocus,
    submitting: bool,
}

impl EditForm {
    pub fn new(initial: EditFormValues) -> Self {
        Self {
            values: initial.clone(),
            initial,
            focus: FormFocus::Name,
            submitting: false,
        }
    }

    pub fn values(&self) -> &EditFormValues {
        &self.values
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    pub fn can_submit(&self) -> bool {
        self.is_dirty() && !self.submitting
    }

    pub fn focus_next(&mut self) {
        let index = focus_index(self.focus);
        self.focus = FOCUS_ORDER[(index + 1) % FOCUS_ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let index = focus_index(self.focus);
        self.focus = FOCUS_ORDER[(index + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()];
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.submitting || ch.is_control() {
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    /// Marks the form as submitting and hands out the full current values.
    pub fn begin_submit(&mut self) -> Option<EditFormValues> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        Some(self.values.clone())
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::Name => Some(&mut self.values.name),
            FormFocus::Email => Some(&mut self.values.email),
            FormFocus::Save => None,
        }
    }
}

fn focus_index(focus: FormFocus) -> usize {
    FOCUS_ORDER
        .iter()
        .position(|candidate| *candidate == focus)
        .unwrap_or(0)
}
