//! Declarative content models: table, typed fields, list layout.

use crate::locale::{Label, Locale};
use serde::{Deserialize, Serialize};

/// Columns every content table carries, owned by the backend.
pub const SYSTEM_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: Label,
    /// Legacy spellings accepted on input and folded onto `value`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl SelectOption {
    pub fn new(value: &str, fr: &str, en: &str) -> Self {
        SelectOption {
            value: value.to_string(),
            label: Label::new(fr, en),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// Input kind of a field. Drives the widget, the value coercion and the column type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Textarea,
    #[serde(rename = "richtext")]
    RichText,
    Select { options: Vec<SelectOption> },
    Date,
    Boolean,
}

impl FieldKind {
    /// PostgreSQL column type used for DDL and parameter casts.
    pub fn pg_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea | FieldKind::RichText | FieldKind::Select { .. } => "text",
            FieldKind::Number => "double precision",
            FieldKind::Date => "date",
            FieldKind::Boolean => "boolean",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub label: Label,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldDef {
    fn of(kind: FieldKind, name: &str, fr: &str, en: &str) -> Self {
        FieldDef {
            name: name.to_string(),
            label: Label::new(fr, en),
            kind,
            required: false,
            unique: false,
            max_length: None,
            pattern: None,
        }
    }

    pub fn text(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::Text, name, fr, en)
    }

    pub fn number(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::Number, name, fr, en)
    }

    pub fn textarea(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::Textarea, name, fr, en)
    }

    pub fn rich_text(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::RichText, name, fr, en)
    }

    pub fn select(name: &str, fr: &str, en: &str, options: Vec<SelectOption>) -> Self {
        Self::of(FieldKind::Select { options }, name, fr, en)
    }

    pub fn date(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::Date, name, fr, en)
    }

    pub fn boolean(name: &str, fr: &str, en: &str) -> Self {
        Self::of(FieldKind::Boolean, name, fr, en)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn max_length(mut self, max: u32) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(column: &str) -> Self {
        OrderBy {
            column: column.to_string(),
            descending: false,
        }
    }

    pub fn desc(column: &str) -> Self {
        OrderBy {
            column: column.to_string(),
            descending: true,
        }
    }
}

/// One admin-managed content type: the table it lives in and how to edit and list it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModel {
    /// URL path segment, e.g. `hero-slides`.
    pub segment: String,
    pub table: String,
    pub label: Label,
    pub fields: Vec<FieldDef>,
    /// Columns shown in the admin table view.
    pub list_columns: Vec<String>,
    pub order_by: OrderBy,
    /// Column used for public detail lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_field: Option<String>,
    /// Readable without authentication under `/api/v1/content`.
    #[serde(default)]
    pub public: bool,
}

impl ContentModel {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field columns plus the backend-managed system columns.
    pub fn has_column(&self, name: &str) -> bool {
        SYSTEM_COLUMNS.contains(&name) || self.field(name).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn title(&self, locale: Locale) -> &str {
        self.label.get(locale)
    }
}
