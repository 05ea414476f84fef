//! Form validation controller
//!
//! Owns the rule store, the validator registry, and the presenter for one
//! form. Installs rule sets, computes event bindings, and turns submit and
//! change events into validation passes with a prevent-default answer.

use crate::document::FormDocument;
use crate::engine;
use crate::error::ConfigError;
use crate::presenter::{ErrorPresenter, InlineErrors};
use crate::registry::{FieldView, Validators};
use crate::rule::{Rule, RuleSet};

/// An event the embedding layer forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// The form is about to submit.
    Submit,
    /// A named field's value changed.
    Change { field: &'a str },
}

/// The controller's answer to an event: let the default action run, or
/// cancel it because validation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Proceed,
    PreventDefault,
}

impl Disposition {
    pub fn is_prevented(self) -> bool {
        self == Disposition::PreventDefault
    }
}

/// A subscription the embedding layer should wire to a live event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Listen for form submission.
    Submit,
    /// Listen for value changes of one field.
    Change(String),
}

/// Validation controller for one form.
///
/// Constructed empty with the built-in validators; rules are installed
/// wholesale and may be re-installed. The document is the opaque handle to
/// the live form, the presenter reflects pass/fail state into the page.
///
/// ```
/// use fieldset::{Form, FormData, Event, Rule, RuleSet};
///
/// let data: FormData = [("email", "")].into_iter().collect();
/// let mut rules = RuleSet::new();
/// rules.add_rule("email", Rule::new("required", "Required"));
///
/// let mut form = Form::new(data);
/// form.install(rules).unwrap();
///
/// let verdict = form.handle(Event::Submit);
/// assert!(verdict.is_prevented());
/// assert_eq!(form.errors().first_message("email"), Some("Required"));
/// ```
#[derive(Debug)]
pub struct Form<D, P = InlineErrors> {
    document: D,
    rules: RuleSet,
    validators: Validators,
    presenter: P,
    bindings: Vec<Binding>,
}

impl<D: FormDocument> Form<D> {
    /// A controller over the given document, presenting errors in memory.
    pub fn new(document: D) -> Self {
        let presenter = InlineErrors::for_document(&document);
        Self::with_presenter(document, presenter)
    }
}

impl<D: FormDocument, P: ErrorPresenter> Form<D, P> {
    /// A controller with a caller-supplied presenter (a DOM-backed one, say).
    pub fn with_presenter(document: D, presenter: P) -> Self {
        Self {
            document,
            rules: RuleSet::new(),
            validators: Validators::builtin(),
            presenter,
            bindings: Vec::new(),
        }
    }

    /// Installs a rule set, replacing any prior one, and recomputes event
    /// bindings. Definitely-malformed descriptors are rejected here rather
    /// than surfacing as confusing evaluation-time behavior.
    pub fn install(&mut self, rules: RuleSet) -> Result<&mut Self, ConfigError> {
        rules.check()?;
        tracing::debug!("installing rules for {} field(s)", rules.len());
        self.rules = rules;
        self.bind();
        Ok(self)
    }

    /// Installs rules from the JSON mapping literal shape.
    pub fn install_json(&mut self, json: &str) -> Result<&mut Self, ConfigError> {
        self.install(RuleSet::from_json(json)?)
    }

    /// Appends one rule to a field's sequence. Does not rebind; call
    /// [`install`](Self::install) (or [`bind`](Self::bind)) once the store
    /// is complete.
    pub fn add_rule(&mut self, field: impl Into<String>, rule: Rule) -> &mut Self {
        self.rules.add_rule(field, rule);
        self
    }

    /// Registers a validator, shadowing any built-in of the same name.
    /// Usable before or after `install`.
    pub fn add_validator(
        &mut self,
        kind: impl Into<String>,
        validator: impl Fn(&FieldView<'_>, &Rule) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.validators.register(kind, validator);
        self
    }

    /// Recomputes the subscription list: one submit binding plus one change
    /// binding per rule-bearing field present in the document. Rule keys
    /// the document cannot resolve are skipped.
    pub fn bind(&mut self) -> &[Binding] {
        let mut bindings = vec![Binding::Submit];
        for field in self.rules.fields() {
            if self.document.has_field(field) {
                bindings.push(Binding::Change(field.to_string()));
            } else {
                tracing::debug!("not binding `{field}`: no such field in the form");
            }
        }
        self.bindings = bindings;
        &self.bindings
    }

    /// Dispatches an event against the current bindings. Submit failing
    /// whole-form validation and a bound field failing its own rules both
    /// answer [`Disposition::PreventDefault`]; everything else proceeds.
    pub fn handle(&mut self, event: Event<'_>) -> Disposition {
        match event {
            Event::Submit if self.bindings.contains(&Binding::Submit) => {
                if self.validate() {
                    Disposition::Proceed
                } else {
                    Disposition::PreventDefault
                }
            }
            Event::Change { field }
                if self
                    .bindings
                    .iter()
                    .any(|b| matches!(b, Binding::Change(bound) if bound == field)) =>
            {
                if self.validate_field(field) {
                    Disposition::Proceed
                } else {
                    Disposition::PreventDefault
                }
            }
            _ => Disposition::Proceed,
        }
    }

    /// Whole-form validation: every rule-bearing field is evaluated, in
    /// stable field order, so each invalid field presents its error. True
    /// iff all fields pass.
    pub fn validate(&mut self) -> bool {
        let fields: Vec<String> = self.rules.fields().map(str::to_string).collect();
        let mut all_valid = true;
        for field in &fields {
            if !self.validate_field(field) {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Single-field validation against the installed rules.
    pub fn validate_field(&mut self, field: &str) -> bool {
        engine::validate_field(
            &self.document,
            &self.rules,
            &self.validators,
            &mut self.presenter,
            field,
        )
    }

    /// Removes error state from every document field, in field order.
    pub fn clear_errors(&mut self) {
        self.presenter.clear_errors(&self.document);
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable document access, for embedders that mirror live field edits.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn errors(&self) -> &P {
        &self.presenter
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// The current subscription list, empty until rules are installed.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
