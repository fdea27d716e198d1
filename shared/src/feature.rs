use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::style::{IDENTIFIER_ATTRIBUTE, INCOME_ATTRIBUTE};

pub const INDICATOR_PROMPT: &str =
    "Hover your cursor over a CT to see the median income here, or click on it to view the CTUID.";

/// A rendered census tract as returned by a hit-test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn income(&self) -> Option<&Value> {
        self.attribute(INCOME_ATTRIBUTE)
    }

    pub fn ctuid(&self) -> Option<&Value> {
        self.attribute(IDENTIFIER_ATTRIBUTE)
    }
}

/// Renders an attribute the way string concatenation in the page would:
/// whole numbers drop the fraction, very large or small numbers switch to
/// exponent form, strings are verbatim, arrays join their items with commas,
/// objects read `[object Object]` and a missing value reads `undefined`.
pub fn display_attribute(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_owned(),
        Some(value) => js_string(value),
    }
}

fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                js_number(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => js_string(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn js_number(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if f == 0.0 {
        return "0".to_owned();
    }
    if f.abs() >= 1e21 || f.abs() < 1e-6 {
        let formatted = format!("{f:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Indicator text for the topmost feature under the cursor, or the prompt
/// when nothing is hovered.
pub fn indicator_text(feature: Option<&Feature>) -> String {
    match feature {
        Some(feature) => format!(
            "It's median household income is ${}",
            display_attribute(feature.income())
        ),
        None => INDICATOR_PROMPT.to_owned(),
    }
}

pub fn popup_html(feature: &Feature) -> String {
    format!("CTUID: {}", display_attribute(feature.ctuid()))
}
