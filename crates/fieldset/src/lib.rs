//! # fieldset
//!
//! A declarative form validation engine: named rules are bound to form
//! fields, rule-specific checks run on field change and on submission, and
//! pass/fail state is reflected into the surrounding page by toggling
//! per-field error markers.
//!
//! The engine never touches a real page. It reaches the outside world
//! through two seams: [`FormDocument`] (enumerate fields, read values) and
//! [`ErrorPresenter`] (toggle error state). The in-memory [`FormData`] and
//! [`InlineErrors`] implementations cover tests, demos, and headless use;
//! embedders supply their own for live markup.
//!
//! ## Quick start
//!
//! ```
//! use fieldset::{Event, Form, FormData};
//!
//! let data: FormData = [("email", "abc"), ("age", "17")].into_iter().collect();
//!
//! let mut form = Form::new(data);
//! form.install_json(
//!     r#"{
//!         "email": [
//!             {"type": "required", "message": "Required"},
//!             {"type": "regex", "message": "Bad format", "value": "^.+@.+$"}
//!         ],
//!         "age": [{"type": "min", "message": "Too young", "value": 18}]
//!     }"#,
//! )
//! .unwrap();
//!
//! // the embedding layer forwards live events; a failing form cancels
//! // the default action
//! let verdict = form.handle(Event::Submit);
//! assert!(verdict.is_prevented());
//! assert_eq!(form.errors().first_message("email"), Some("Bad format"));
//! assert_eq!(form.errors().first_message("age"), Some("Too young"));
//! ```
//!
//! Custom rule types plug in at runtime:
//!
//! ```
//! use fieldset::{Form, FormData, Rule, RuleSet};
//!
//! let data: FormData = [("handle", "root")].into_iter().collect();
//! let mut form = Form::new(data);
//!
//! let mut rules = RuleSet::new();
//! rules.add_rule("handle", Rule::new("notReserved", "That name is taken"));
//!
//! form.add_validator("notReserved", |view, _| view.value != "root");
//! form.install(rules).unwrap();
//! assert!(!form.validate());
//! ```

pub mod descriptor;
pub mod document;
pub mod engine;
pub mod error;
pub mod form;
pub mod presenter;
pub mod registry;
pub mod rule;

pub use descriptor::{DescriptorRule, FieldDescriptor, FormDescriptor, FormRegistry};
pub use document::{FormData, FormDocument};
pub use error::ConfigError;
pub use form::{Binding, Disposition, Event, Form};
pub use presenter::{ErrorPresenter, InlineErrors};
pub use registry::{FieldView, Validator, Validators};
pub use rule::{Rule, RuleSet};
