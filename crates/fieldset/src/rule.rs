//! Rule descriptors and the per-field rule store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One named check to run against a field.
///
/// Deserializes from the `{"type": ..., "message": ..., "value": ...}` shape
/// used by rule mappings. Immutable once installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Name of the validator that runs this rule.
    #[serde(rename = "type")]
    pub kind: String,

    /// Message presented when the rule fails.
    pub message: String,

    /// Rule parameter; numeric rules accept a JSON number or a numeric
    /// string, `regex` and `sameAs` take a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        kind: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// The rule value as a string, when it is one.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }

    /// The rule value as a number. Numeric strings coerce, so rule
    /// mappings may carry `"value": 5` or `"value": "5"` interchangeably.
    pub fn number(&self) -> Option<f64> {
        match self.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Ordered rule sequences keyed by field name.
///
/// Per-field order is evaluation order. Field enumeration order is stable
/// (lexicographic), which is the order whole-form validation visits fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, Vec<Rule>>);

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rule mapping literal, e.g.
    /// `{"email": [{"type": "required", "message": "Required"}]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a rule to the field's sequence, creating it if absent.
    pub fn add_rule(&mut self, field: impl Into<String>, rule: Rule) -> &mut Self {
        self.0.entry(field.into()).or_default().push(rule);
        self
    }

    /// The rule sequence for a field, in evaluation order.
    pub fn rules_for(&self, field: &str) -> Option<&[Rule]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Field names that carry at least one rule, in stable order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Rejects definitely-malformed descriptors before they are installed.
    ///
    /// Checks: non-empty type and message for every rule; `regex` rules
    /// carry a pattern that compiles; `sameAs` rules name a field; length
    /// and bound rules carry a numeric value. Rules of unknown type pass
    /// unchecked — they are skipped at evaluation time instead.
    pub fn check(&self) -> Result<(), ConfigError> {
        for (field, rules) in &self.0 {
            for (index, rule) in rules.iter().enumerate() {
                if rule.kind.is_empty() {
                    return Err(ConfigError::MissingType {
                        field: field.clone(),
                        index,
                    });
                }
                if rule.message.is_empty() {
                    return Err(ConfigError::MissingMessage {
                        field: field.clone(),
                        index,
                        kind: rule.kind.clone(),
                    });
                }
                match rule.kind.as_str() {
                    "regex" => {
                        let pattern = rule.text().ok_or_else(|| ConfigError::MissingValue {
                            field: field.clone(),
                            kind: rule.kind.clone(),
                        })?;
                        fieldset_validation::pattern_is_valid(pattern).map_err(|source| {
                            ConfigError::BadPattern {
                                field: field.clone(),
                                pattern: pattern.to_string(),
                                source,
                            }
                        })?;
                    }
                    "sameAs" => {
                        if rule.text().map_or(true, str::is_empty) {
                            return Err(ConfigError::MissingValue {
                                field: field.clone(),
                                kind: rule.kind.clone(),
                            });
                        }
                    }
                    "minlen" | "maxlen" | "min" | "max" => {
                        if rule.number().is_none() {
                            return Err(match &rule.value {
                                None => ConfigError::MissingValue {
                                    field: field.clone(),
                                    kind: rule.kind.clone(),
                                },
                                Some(value) => ConfigError::NotNumeric {
                                    field: field.clone(),
                                    kind: rule.kind.clone(),
                                    value: value.clone(),
                                },
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_value_coercion() {
        let quoted = Rule::with_value("minlen", "Too short", "5");
        let bare = Rule::with_value("minlen", "Too short", 5);
        assert_eq!(quoted.number(), Some(5.0));
        assert_eq!(bare.number(), Some(5.0));

        let pattern = Rule::with_value("regex", "Bad format", "^.+@.+$");
        assert_eq!(pattern.text(), Some("^.+@.+$"));
        assert_eq!(pattern.number(), None);
    }

    #[test]
    fn test_rule_set_preserves_per_field_order() {
        let mut rules = RuleSet::new();
        rules
            .add_rule("email", Rule::new("required", "Required"))
            .add_rule("email", Rule::with_value("regex", "Bad format", "^.+@.+$"));

        let seq = rules.rules_for("email").unwrap();
        assert_eq!(seq[0].kind, "required");
        assert_eq!(seq[1].kind, "regex");
    }

    #[test]
    fn test_from_json_mapping_literal() {
        let rules = RuleSet::from_json(
            r#"{
                "email": [
                    {"type": "required", "message": "Required"},
                    {"type": "regex", "message": "Bad format", "value": "^.+@.+$"}
                ],
                "age": [{"type": "min", "message": "Too young", "value": 18}]
            }"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules_for("age").unwrap()[0].number(), Some(18.0));
        assert!(rules.check().is_ok());
    }

    #[test]
    fn test_check_rejects_empty_type_and_message() {
        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::new("", "msg"));
        assert!(matches!(
            rules.check(),
            Err(ConfigError::MissingType { .. })
        ));

        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::new("required", ""));
        assert!(matches!(
            rules.check(),
            Err(ConfigError::MissingMessage { .. })
        ));
    }

    #[test]
    fn test_check_rejects_bad_pattern_and_missing_values() {
        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::with_value("regex", "msg", "("));
        assert!(matches!(rules.check(), Err(ConfigError::BadPattern { .. })));

        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::new("sameAs", "msg"));
        assert!(matches!(
            rules.check(),
            Err(ConfigError::MissingValue { .. })
        ));

        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::with_value("min", "msg", "not a number"));
        assert!(matches!(rules.check(), Err(ConfigError::NotNumeric { .. })));
    }

    #[test]
    fn test_check_skips_unknown_types() {
        let mut rules = RuleSet::new();
        rules.add_rule("a", Rule::new("futureType", "msg"));
        assert!(rules.check().is_ok());
    }
}
