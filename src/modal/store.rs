#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalName {
    Edit,
    Delete,
    /// A name no workflow is registered for; the shell renders an empty panel.
    Unknown(String),
}

impl ModalName {
    /// Empty names mean "no modal".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            other => Some(Self::Unknown(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Unknown(name) => name,
        }
    }
}

impl std::fmt::Display for ModalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalVisibility {
    #[default]
    Hidden,
    Open(ModalName),
}

impl ModalVisibility {
    pub fn name(&self) -> Option<&ModalName> {
        match self {
            Self::Hidden => None,
            Self::Open(name) => Some(name),
        }
    }
}

pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&ModalVisibility)>;

/// Which modal is visible for this session. At most one is open; the latest
/// `open`/`close` wins and every listener sees each change.
#[derive(Default)]
pub struct ModalStore {
    visibility: ModalVisibility,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl std::fmt::Debug for ModalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalStore")
            .field("visibility", &self.visibility)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ModalVisibility {
        &self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility != ModalVisibility::Hidden
    }

    pub fn open(&mut self, name: ModalName) {
        self.set(ModalVisibility::Open(name));
    }

    pub fn close(&mut self) {
        self.set(ModalVisibility::Hidden);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ModalVisibility) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn set(&mut self, visibility: ModalVisibility) {
        self.visibility = visibility;
        for (_, listener) in &mut self.listeners {
            listener(&self.visibility);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn latest_write_wins_and_listeners_observe_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ModalStore::new();
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |visibility| sink.borrow_mut().push(visibility.clone()));

        store.open(ModalName::Edit);
        store.open(ModalName::Delete);
        store.close();

        assert_eq!(store.current(), &ModalVisibility::Hidden);
        assert_eq!(
            *seen.borrow(),
            vec![
                ModalVisibility::Open(ModalName::Edit),
                ModalVisibility::Open(ModalName::Delete),
                ModalVisibility::Hidden,
            ]
        );

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.open(ModalName::Edit);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn parse_maps_known_names_and_keeps_unknown_ones() {
        assert_eq!(ModalName::parse("edit"), Some(ModalName::Edit));
        assert_eq!(ModalName::parse(" delete "), Some(ModalName::Delete));
        assert_eq!(ModalName::parse(""), None);
        assert_eq!(
            ModalName::parse("archive"),
            Some(ModalName::Unknown("archive".to_string()))
        );
    }
}
