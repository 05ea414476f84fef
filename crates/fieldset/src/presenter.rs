// File: src/presenter.rs
// Purpose: Error presentation contract and the in-memory inline presenter

use std::collections::BTreeMap;

use crate::document::FormDocument;

/// Reflects per-field pass/fail state into the surrounding page.
///
/// Error state per field is binary: a container-level errored marker plus
/// adjacent message nodes holding the literal failure message. A DOM-backed
/// embedder toggles its own markup; [`InlineErrors`] models the same
/// contract in memory.
pub trait ErrorPresenter {
    /// Marks the field's container as errored and appends a message node.
    ///
    /// Adding twice without an intervening remove keeps the marker singular
    /// but may append a second message node; callers that need exactly one
    /// message clear first.
    fn add_error(&mut self, field: &str, message: &str);

    /// Clears the marker and removes all message nodes, only when the field
    /// is currently errored; no-op otherwise.
    fn remove_error(&mut self, field: &str);

    /// Whether the field's own container is currently errored.
    fn has_error(&self, field: &str) -> bool;

    /// Removes error state from every field owned by the form, in field order.
    fn clear_errors(&mut self, document: &dyn FormDocument) {
        for name in document.field_names() {
            self.remove_error(&name);
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Container {
    errored: bool,
    messages: Vec<String>,
}

/// In-memory error presenter.
///
/// Holds one container per known field. Built with [`InlineErrors::for_document`]
/// the container set is fixed and presenting against an unknown field is a
/// markup error (loud in development builds); built with [`InlineErrors::new`]
/// containers are created on demand.
#[derive(Debug, Clone, Default)]
pub struct InlineErrors {
    containers: BTreeMap<String, Container>,
    fixed: bool,
}

impl InlineErrors {
    /// Presenter that grows a container for any field it is handed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Presenter with one container per document field.
    pub fn for_document(document: &impl FormDocument) -> Self {
        Self::for_fields(document.field_names())
    }

    /// Presenter with one container per named field.
    pub fn for_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: fields
                .into_iter()
                .map(|name| (name.into(), Container::default()))
                .collect(),
            fixed: true,
        }
    }

    /// Message nodes currently attached to the field, in presentation order.
    pub fn messages(&self, field: &str) -> &[String] {
        self.containers
            .get(field)
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    /// The first presented message for the field, if any.
    pub fn first_message(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    /// Fields currently errored, in stable order.
    pub fn errored_fields(&self) -> impl Iterator<Item = &str> {
        self.containers
            .iter()
            .filter(|(_, c)| c.errored)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_clean(&self) -> bool {
        self.containers.values().all(|c| !c.errored)
    }

    fn container_mut(&mut self, field: &str) -> Option<&mut Container> {
        if !self.fixed && !self.containers.contains_key(field) {
            self.containers.insert(field.to_string(), Container::default());
        }
        let resolved = self.containers.get_mut(field);
        if resolved.is_none() {
            tracing::error!("no container for field `{field}`; markup does not match the rules");
            debug_assert!(false, "no container for field `{field}`");
        }
        resolved
    }
}

impl ErrorPresenter for InlineErrors {
    fn add_error(&mut self, field: &str, message: &str) {
        if let Some(container) = self.container_mut(field) {
            container.errored = true;
            container.messages.push(message.to_string());
        }
    }

    fn remove_error(&mut self, field: &str) {
        if let Some(container) = self.container_mut(field) {
            if container.errored {
                container.errored = false;
                container.messages.clear();
            }
        }
    }

    fn has_error(&self, field: &str) -> bool {
        self.containers.get(field).is_some_and(|c| c.errored)
    }
}
