//! HTML fragment rendering of form widgets.

use super::{InputType, Widget};
use serde_json::Value;
use std::fmt::Write;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render widgets as a `<form>` fragment. Values are always escaped, rich text included.
pub fn render_html(segment: &str, action: &str, widgets: &[Widget]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<form method="post" action="{}" data-model="{}" novalidate>"#,
        escape(action),
        escape(segment)
    );
    for w in widgets {
        render_widget(&mut out, w);
    }
    out.push_str("</form>\n");
    out
}

fn render_widget(out: &mut String, w: &Widget) {
    let id = format!("field-{}", escape(&w.name));
    let name = escape(&w.name);
    let class = if w.invalid { "field field--invalid" } else { "field" };
    let _ = writeln!(out, r#"  <div class="{}">"#, class);
    let marker = if w.required { " *" } else { "" };
    let _ = writeln!(out, r#"    <label for="{}">{}{}</label>"#, id, escape(&w.label), marker);

    let mut attrs = format!(r#"id="{}" name="{}""#, id, name);
    if w.required {
        attrs.push_str(" required");
    }
    if w.invalid {
        attrs.push_str(r#" aria-invalid="true""#);
    }
    if let Some(max) = w.max_length {
        let _ = write!(attrs, r#" maxlength="{}""#, max);
    }
    let value = escape(&value_text(&w.value));

    match w.input {
        InputType::Text | InputType::Number | InputType::Date => {
            let ty = match w.input {
                InputType::Number => "number",
                InputType::Date => "date",
                _ => "text",
            };
            let step = if w.input == InputType::Number { r#" step="any""# } else { "" };
            let _ = writeln!(out, r#"    <input type="{}" {}{} value="{}">"#, ty, attrs, step, value);
        }
        InputType::Textarea | InputType::RichText => {
            let editor = if w.input == InputType::RichText { r#" data-editor="richtext""# } else { "" };
            let _ = writeln!(out, r#"    <textarea {}{}>{}</textarea>"#, attrs, editor, value);
        }
        InputType::Select => {
            let _ = writeln!(out, r#"    <select {}>"#, attrs);
            out.push_str("      <option value=\"\"></option>\n");
            for o in &w.options {
                let selected = if o.selected { " selected" } else { "" };
                let _ = writeln!(
                    out,
                    r#"      <option value="{}"{}>{}</option>"#,
                    escape(&o.value),
                    selected,
                    escape(&o.label)
                );
            }
            out.push_str("    </select>\n");
        }
        InputType::Checkbox => {
            let checked = if w.value == Value::Bool(true) { " checked" } else { "" };
            let _ = writeln!(out, r#"    <input type="checkbox" {} value="true"{}>"#, attrs, checked);
        }
    }
    if let Some(err) = &w.error {
        let _ = writeln!(out, r#"    <p class="field__error">{}</p>"#, escape(err));
    }
    out.push_str("  </div>\n");
}
