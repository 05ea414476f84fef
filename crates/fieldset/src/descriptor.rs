// File: src/descriptor.rs
// Purpose: Declarative form descriptions and the by-id form registry

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rule::{Rule, RuleSet};

/// Message used when a descriptor rule does not carry one.
pub const DEFAULT_MESSAGE: &str = "Validation error!";

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

/// One rule inside a form description. Unlike [`Rule`], the message is
/// optional here and falls back to [`DEFAULT_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorRule {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    #[serde(default = "default_message")]
    pub message: String,
}

/// A named field of a described form: name, optional display label, and
/// its rule sequence in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub rules: Vec<DescriptorRule>,
}

/// A whole form description: an id and its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub id: String,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The installable rule store for this description.
    pub fn to_rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        for field in &self.fields {
            for rule in &field.rules {
                rules.add_rule(
                    field.name.clone(),
                    Rule {
                        kind: rule.kind.clone(),
                        message: rule.message.clone(),
                        value: rule.value.clone(),
                    },
                );
            }
        }
        rules
    }

    /// The rules of this description as the JSON mapping literal consumed
    /// by `install`: field name to rule list. `min`/`max` values are
    /// emitted as bare numbers, every other value as a string.
    pub fn rules_json(&self) -> String {
        let mut mapping = serde_json::Map::new();
        for field in &self.fields {
            let rules: Vec<serde_json::Value> = field
                .rules
                .iter()
                .map(|rule| {
                    let mut object = serde_json::Map::new();
                    object.insert("type".into(), rule.kind.clone().into());
                    if let Some(value) = wire_value(&rule.kind, rule.value.as_ref()) {
                        object.insert("value".into(), value);
                    }
                    object.insert("message".into(), rule.message.clone().into());
                    serde_json::Value::Object(object)
                })
                .collect();
            mapping.insert(field.name.clone(), rules.into());
        }
        serde_json::Value::Object(mapping).to_string()
    }
}

/// How a rule value crosses into the mapping literal: numbers stay bare
/// only for `min`/`max`, everything else is stringified. Empty values are
/// dropped.
fn wire_value(kind: &str, value: Option<&serde_json::Value>) -> Option<serde_json::Value> {
    use serde_json::Value;

    let value = value?;
    match (kind, value) {
        (_, Value::String(s)) if s.is_empty() => None,
        ("min" | "max", Value::Number(_)) => Some(value.clone()),
        ("min" | "max", Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) => serde_json::Number::from_f64(n).map(Value::Number),
            Err(_) => Some(value.clone()),
        },
        (_, Value::Number(n)) => Some(Value::String(n.to_string())),
        _ => Some(value.clone()),
    }
}

/// Form descriptions registered by id. Registering an id twice replaces
/// the earlier description.
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    forms: HashMap<String, FormDescriptor>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: FormDescriptor) -> &mut Self {
        tracing::debug!("registering form `{}`", descriptor.id);
        self.forms.insert(descriptor.id.clone(), descriptor);
        self
    }

    pub fn get(&self, id: &str) -> Option<&FormDescriptor> {
        self.forms.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.forms.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn signup_descriptor() -> FormDescriptor {
        FormDescriptor::from_json(
            r#"{
                "id": "signup",
                "fields": [
                    {
                        "name": "email",
                        "label": "Email address",
                        "rules": [
                            {"type": "required", "message": "Required"},
                            {"type": "regex", "value": "^.+@.+$", "message": "Bad format"}
                        ]
                    },
                    {
                        "name": "age",
                        "rules": [{"type": "min", "value": 18}]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_descriptor_defaults_the_message() {
        let descriptor = signup_descriptor();
        assert_eq!(descriptor.fields[1].rules[0].message, DEFAULT_MESSAGE);
        assert_eq!(descriptor.fields[1].label, None);
    }

    #[test]
    fn test_to_rule_set_preserves_rule_order() {
        let rules = signup_descriptor().to_rule_set();

        let email = rules.rules_for("email").unwrap();
        assert_eq!(email[0].kind, "required");
        assert_eq!(email[1].kind, "regex");
        assert_eq!(rules.rules_for("age").unwrap()[0].number(), Some(18.0));
        assert!(rules.check().is_ok());
    }

    #[test]
    fn test_rules_json_value_typing() {
        let descriptor = FormDescriptor {
            id: "f".into(),
            fields: vec![FieldDescriptor {
                name: "age".into(),
                label: None,
                rules: vec![
                    DescriptorRule {
                        kind: "min".into(),
                        value: Some("18".into()),
                        message: "Too young".into(),
                    },
                    DescriptorRule {
                        kind: "minlen".into(),
                        value: Some(2.into()),
                        message: "Too short".into(),
                    },
                ],
            }],
        };

        let json = descriptor.rules_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        // min stays a bare number, minlen is stringified
        assert_eq!(parsed["age"][0]["value"], serde_json::json!(18.0));
        assert_eq!(parsed["age"][1]["value"], serde_json::json!("2"));

        // the export is a valid rule mapping
        assert!(RuleSet::from_json(&json).unwrap().check().is_ok());
    }

    #[test]
    fn test_registry_replaces_by_id() {
        let mut registry = FormRegistry::new();
        registry.register(signup_descriptor());
        assert!(registry.contains("signup"));

        let replacement = FormDescriptor {
            id: "signup".into(),
            fields: vec![],
        };
        registry.register(replacement);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("signup").unwrap().fields.is_empty());
    }
}
