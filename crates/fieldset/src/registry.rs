//! Validator registry and the built-in rule types

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fieldset_validation as checks;

use crate::document::FormDocument;
use crate::rule::Rule;

/// The field a validator is looking at: its name, its current value, and
/// the whole-form lookup used by cross-field rules such as `sameAs`.
pub struct FieldView<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub document: &'a dyn FormDocument,
}

impl<'a> FieldView<'a> {
    /// Value of a sibling field in the same form.
    pub fn sibling(&self, name: &str) -> Option<String> {
        self.document.value(name)
    }
}

/// A pure predicate implementing one rule type.
pub type Validator = Arc<dyn Fn(&FieldView<'_>, &Rule) -> bool + Send + Sync>;

/// Rule-type name to predicate mapping, scoped to one form instance.
///
/// Seeded with the built-in rule types; `register` overwrites any existing
/// entry, built-ins included. There is no removal.
#[derive(Clone)]
pub struct Validators {
    entries: HashMap<String, Validator>,
}

impl Validators {
    /// An empty registry, no rule types at all.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in registry: `required`, `regex`, `sameAs`, `minlen`,
    /// `maxlen`, `min`, `max`, `integer`, `number`.
    pub fn builtin() -> Self {
        let mut validators = Self::empty();
        validators
            .register("required", |view, _| checks::is_non_empty(view.value))
            .register("regex", |view, rule| {
                rule.text()
                    .map_or(false, |pattern| checks::matches_pattern(view.value, pattern))
            })
            .register("sameAs", same_as)
            .register("minlen", |view, rule| {
                rule.number()
                    .map_or(false, |min| checks::min_chars(view.value, min.ceil() as usize))
            })
            .register("maxlen", |view, rule| {
                rule.number()
                    .map_or(false, |max| checks::max_chars(view.value, max.floor() as usize))
            })
            .register("min", |view, rule| {
                rule.number().map_or(false, |min| checks::at_least(view.value, min))
            })
            .register("max", |view, rule| {
                rule.number().map_or(false, |max| checks::at_most(view.value, max))
            })
            .register("integer", |view, _| checks::is_integer(view.value))
            .register("number", |view, _| checks::is_number(view.value));
        validators
    }

    /// Registers a validator under a rule-type name, overwriting any
    /// existing entry of that name.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        validator: impl Fn(&FieldView<'_>, &Rule) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.insert(kind.into(), Arc::new(validator));
        self
    }

    /// The validator for a rule-type name, if registered.
    pub fn get(&self, kind: &str) -> Option<&Validator> {
        self.entries.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Validators").field("kinds", &kinds).finish()
    }
}

fn same_as(view: &FieldView<'_>, rule: &Rule) -> bool {
    let Some(other) = rule.text() else {
        return false;
    };
    match view.sibling(other) {
        Some(sibling) => view.value == sibling,
        None => {
            tracing::warn!(
                "sameAs target `{other}` of field `{}` does not exist in this form",
                view.name
            );
            false
        }
    }
}
