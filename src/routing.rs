use crate::shared::ids::CustomerId;

pub const DEFAULT_ROUTE: &str = "/";

/// In-process navigation history. The last entry is the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    entries: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE)
    }
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize_path(initial)],
        }
    }

    pub fn current_path(&self) -> &str {
        self.entries
            .last()
            .map(String::as_str)
            .unwrap_or(DEFAULT_ROUTE)
    }

    pub fn push(&mut self, path: &str) {
        let path = normalize_path(path);
        if self.current_path() != path {
            self.entries.push(path);
        }
    }

    /// Returns to the previous location; the first entry is never popped.
    pub fn back(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        true
    }

    pub fn current_customer_id(&self) -> Result<CustomerId, String> {
        CustomerId::from_path(self.current_path())
    }
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_ROUTE.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
