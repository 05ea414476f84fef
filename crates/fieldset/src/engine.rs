//! Single-field rule evaluation
//!
//! One entry point: clear the field's presented error, walk its rule
//! sequence in order, stop at the first failure and present that rule's
//! message. Re-running with unchanged input reproduces the same single
//! presented error.

use crate::document::FormDocument;
use crate::presenter::ErrorPresenter;
use crate::registry::{FieldView, Validators};
use crate::rule::RuleSet;

/// Evaluates one field against its installed rules.
///
/// The field's current error is cleared first, so re-validation never
/// stacks messages. A field with no rules is valid. Rules whose type has
/// no registered validator are skipped. The first failing rule presents
/// its message and stops evaluation of the remaining rules.
pub fn validate_field<P>(
    document: &dyn FormDocument,
    rules: &RuleSet,
    validators: &Validators,
    presenter: &mut P,
    name: &str,
) -> bool
where
    P: ErrorPresenter + ?Sized,
{
    let Some(value) = document.value(name) else {
        tracing::warn!("rules installed for `{name}` but the form has no such field");
        return true;
    };

    presenter.remove_error(name);

    let Some(sequence) = rules.rules_for(name) else {
        return true;
    };

    let view = FieldView {
        name,
        value: &value,
        document,
    };

    for rule in sequence {
        let Some(validator) = validators.get(&rule.kind) else {
            tracing::warn!(
                "no validator registered for rule type `{}` on field `{name}`, skipping",
                rule.kind
            );
            continue;
        };
        if !validator(&view, rule) {
            tracing::debug!("field `{name}` failed rule `{}`", rule.kind);
            presenter.add_error(name, &rule.message);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormData;
    use crate::presenter::InlineErrors;
    use crate::rule::Rule;

    fn email_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules
            .add_rule("email", Rule::new("required", "Required"))
            .add_rule("email", Rule::with_value("regex", "Bad format", "^.+@.+$"));
        rules
    }

    fn validate(rules: &RuleSet, value: &str) -> (bool, InlineErrors) {
        let data: FormData = [("email", value)].into_iter().collect();
        let mut errors = InlineErrors::for_document(&data);
        let ok = validate_field(
            &data,
            rules,
            &Validators::builtin(),
            &mut errors,
            "email",
        );
        (ok, errors)
    }

    #[test]
    fn test_first_failing_rule_short_circuits() {
        let rules = email_rules();

        let (ok, errors) = validate(&rules, "");
        assert!(!ok);
        assert_eq!(errors.first_message("email"), Some("Required"));
        assert_eq!(errors.messages("email").len(), 1);

        let (ok, errors) = validate(&rules, "abc");
        assert!(!ok);
        assert_eq!(errors.first_message("email"), Some("Bad format"));

        let (ok, errors) = validate(&rules, "a@b.com");
        assert!(ok);
        assert!(!errors.has_error("email"));
    }

    #[test]
    fn test_no_rules_is_valid_and_only_clears() {
        let data: FormData = [("email", "")].into_iter().collect();
        let rules = RuleSet::new();
        let mut errors = InlineErrors::for_document(&data);
        errors.add_error("email", "stale");

        assert!(validate_field(
            &data,
            &rules,
            &Validators::builtin(),
            &mut errors,
            "email"
        ));
        assert!(!errors.has_error("email"));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let rules = email_rules();
        let data: FormData = [("email", "")].into_iter().collect();
        let mut errors = InlineErrors::for_document(&data);
        let validators = Validators::builtin();

        let first = validate_field(&data, &rules, &validators, &mut errors, "email");
        let second = validate_field(&data, &rules, &validators, &mut errors, "email");

        assert_eq!(first, second);
        assert_eq!(errors.messages("email").len(), 1);
    }

    #[test]
    fn test_unregistered_rule_type_is_skipped() {
        let mut rules = RuleSet::new();
        rules
            .add_rule("email", Rule::new("notAType", "never shown"))
            .add_rule("email", Rule::new("required", "Required"));

        let (ok, errors) = validate(&rules, "x");
        assert!(ok);
        assert!(!errors.has_error("email"));

        // the unknown type neither fails nor masks the later rule
        let (ok, errors) = validate(&rules, "");
        assert!(!ok);
        assert_eq!(errors.first_message("email"), Some("Required"));
    }

    #[test]
    fn test_rules_for_missing_field_are_ignored() {
        // stale rule key, no matching field: valid, presenter untouched
        let data = FormData::new();
        let rules = email_rules();
        let mut errors = InlineErrors::for_document(&data);

        assert!(validate_field(
            &data,
            &rules,
            &Validators::builtin(),
            &mut errors,
            "email"
        ));
        assert!(errors.is_clean());
    }
}
