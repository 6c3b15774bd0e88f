//! Dynamic forms: widget descriptors from a content model, local form state and
//! required-field checks before submission.

mod html;

pub use html::render_html;

use crate::error::{FieldErrorKind, FieldErrors};
use crate::locale::Locale;
use crate::model::{ContentModel, FieldDef, FieldKind};
use crate::service::RequestValidator;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Number,
    Textarea,
    #[serde(rename = "richtext")]
    RichText,
    Select,
    Date,
    Checkbox,
}

impl InputType {
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => InputType::Text,
            FieldKind::Number => InputType::Number,
            FieldKind::Textarea => InputType::Textarea,
            FieldKind::RichText => InputType::RichText,
            FieldKind::Select { .. } => InputType::Select,
            FieldKind::Date => InputType::Date,
            FieldKind::Boolean => InputType::Checkbox,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WidgetOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One rendered input control.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Widget {
    pub name: String,
    pub label: String,
    pub input: InputType,
    pub required: bool,
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<WidgetOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    pub invalid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Values being edited in one form, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    values: HashMap<String, Value>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing row; keeps only the model's fields.
    pub fn from_row(model: &ContentModel, row: &Value) -> Self {
        let values = model
            .fields
            .iter()
            .filter_map(|f| row.get(&f.name).map(|v| (f.name.clone(), v.clone())))
            .collect();
        FormState {
            values,
            errors: FieldErrors::default(),
        }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.errors.get(field).is_some()
    }

    /// Validate the whole form. On failure the invalid fields are recorded in the state
    /// and nothing is returned for submission.
    pub fn submit(&mut self, model: &ContentModel) -> Result<HashMap<String, Value>, FieldErrors> {
        match RequestValidator::validate(model, &self.values) {
            Ok(body) => {
                self.errors = FieldErrors::default();
                Ok(body)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Record errors reported by the server for this form.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn widgets(&self, model: &ContentModel, locale: Locale) -> Vec<Widget> {
        model.fields.iter().map(|f| self.widget(f, locale)).collect()
    }

    fn widget(&self, field: &FieldDef, locale: Locale) -> Widget {
        let value = self.values.get(&field.name).cloned().unwrap_or(Value::Null);
        let current = value.as_str().unwrap_or("");
        let options = field
            .options()
            .iter()
            .map(|o| WidgetOption {
                value: o.value.clone(),
                label: o.label.get(locale).to_string(),
                selected: o.value == current,
            })
            .collect();
        let error = self.errors.get(&field.name).map(|k| error_text(k, locale).to_string());
        Widget {
            name: field.name.clone(),
            label: field.label.get(locale).to_string(),
            input: InputType::for_kind(&field.kind),
            required: field.required,
            value,
            options,
            max_length: field.max_length,
            invalid: error.is_some(),
            error,
        }
    }
}

fn error_text(kind: FieldErrorKind, locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => kind.message_fr(),
        Locale::En => kind.message_en(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builtin;
    use serde_json::json;

    #[test]
    fn submit_without_required_values_is_blocked_and_marks_fields() {
        let model = builtin::projects();
        let mut form = FormState::new();
        form.set("title", json!("Restructuration de Pikine"));

        let errors = form.submit(&model).unwrap_err();
        assert!(errors.get("slug").is_some());
        assert!(errors.get("status").is_some());
        assert!(form.is_invalid("slug"));
        assert!(form.is_invalid("status"));
        assert!(!form.is_invalid("title"));

        let widgets = form.widgets(&model, Locale::Fr);
        let slug = widgets.iter().find(|w| w.name == "slug").unwrap();
        assert!(slug.invalid);
        assert_eq!(slug.error.as_deref(), Some("Ce champ est obligatoire"));
    }

    #[test]
    fn every_required_field_blocks_submission() {
        for model in builtin::all() {
            for field in model.required_fields() {
                let mut form = FormState::new();
                for other in model.fields.iter().filter(|f| f.name != field.name) {
                    form.set(&other.name, sample_value(other));
                }
                let errors = form.submit(&model).unwrap_err();
                assert_eq!(
                    errors.get(&field.name),
                    Some(FieldErrorKind::Required),
                    "{}.{}",
                    model.segment,
                    field.name
                );
                assert_eq!(errors.0.len(), 1, "{}.{}", model.segment, field.name);
            }
        }
    }

    #[test]
    fn complete_form_submits_and_clears_errors() {
        let model = builtin::hero_slides();
        let mut form = FormState::new();
        form.submit(&model).unwrap_err();
        form.set("title", json!("Bienvenue"));
        form.set("image_url", json!("/images/hero/dakar.jpg"));
        let body = form.submit(&model).unwrap();
        assert_eq!(body["title"], json!("Bienvenue"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn widgets_follow_model_order_and_locale() {
        let model = builtin::tenders();
        let row = json!({ "id": "x", "title": "Voirie", "status": "open", "reference": "AO-1" });
        let form = FormState::from_row(&model, &row);
        assert!(form.get("id").is_none());

        let widgets = form.widgets(&model, Locale::En);
        let names: Vec<&str> = widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names[..3], ["reference", "title", "description"]);
        let status = widgets.iter().find(|w| w.name == "status").unwrap();
        assert_eq!(status.input, InputType::Select);
        assert_eq!(status.label, "Status");
        assert!(status.options.iter().any(|o| o.value == "open" && o.selected && o.label == "Open"));
        let deadline = widgets.iter().find(|w| w.name == "submission_deadline").unwrap();
        assert_eq!(deadline.input, InputType::Date);
        assert!(deadline.required);
    }

    fn sample_value(field: &FieldDef) -> Value {
        match &field.kind {
            FieldKind::Number => json!(1),
            FieldKind::Date => json!("2025-01-15"),
            FieldKind::Boolean => json!(true),
            FieldKind::Select { options } => json!(options[0].value),
            _ => json!("valeur"),
        }
    }
}
