//! Field-catalog plumbing shared by every facility kind.
//!
//! Each kind declares a table of `field id → decode fn`. [`apply_fields`]
//! walks the raw field list once and hands every recognized field to its
//! function, which mutates the kind's builder. Ids missing from the table
//! are ignored on purpose: the upstream catalog is much wider than what the
//! sink models.

use cip_schemas::{RawFeature, RawField};

use crate::DecodeError;

/// Decoded text of one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub id: i64,
    text: String,
}

impl FieldValue {
    /// `None` when the field carries no value.
    ///
    /// JSON strings lose their surrounding quotes and escapes; any other JSON
    /// (numbers, booleans, arrays) is kept as its raw text.
    pub fn of(field: &RawField) -> Option<Self> {
        let raw = field.raw()?.trim();
        let text = if raw.starts_with('"') {
            serde_json::from_str::<String>(raw).unwrap_or_else(|_| strip_quotes(raw).to_string())
        } else {
            raw.to_string()
        };
        Some(Self { id: field.id, text })
    }

    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with any leftover `\/` escapes resolved (URLs, free text).
    pub fn unescaped(&self) -> String {
        self.text.replace("\\/", "/")
    }

    /// Toggle fields: `Ja` means yes.
    pub fn is_yes(&self) -> bool {
        self.text == "Ja"
    }

    /// `Ok(None)` for empty text.
    pub fn number(&self) -> Result<Option<f64>, DecodeError> {
        let t = self.text.trim();
        if t.is_empty() {
            return Ok(None);
        }
        t.parse::<f64>()
            .map(Some)
            .map_err(|_| self.invalid_number(t))
    }

    pub fn invalid_number(&self, value: &str) -> DecodeError {
        DecodeError::InvalidNumber {
            field_id: self.id,
            value: value.to_string(),
        }
    }

    /// Map the text through a fixed label table. Unknown labels are an error,
    /// never a silent default.
    pub fn lookup<T: Copy>(&self, table: &[(&str, T)]) -> Result<T, DecodeError> {
        table
            .iter()
            .find(|(label, _)| *label == self.text)
            .map(|(_, v)| *v)
            .ok_or_else(|| DecodeError::UnknownEnumValue {
                field_id: self.id,
                value: self.text.clone(),
            })
    }
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Parse the feature's field catalog.
pub fn field_catalog(feature: &RawFeature) -> Result<Vec<RawField>, DecodeError> {
    feature
        .properties
        .parse_fields()
        .map_err(|e| DecodeError::Fields(e.to_string()))
}

pub type FieldFn<B> = fn(&mut B, &FieldValue) -> Result<(), DecodeError>;

/// Run every known field through its decode fn, in upstream order.
pub fn apply_fields<B>(
    builder: &mut B,
    fields: &[RawField],
    table: &[(i64, FieldFn<B>)],
) -> Result<(), DecodeError> {
    for field in fields {
        let Some((_, decode)) = table.iter().find(|(id, _)| *id == field.id) else {
            continue;
        };
        let Some(value) = FieldValue::of(field) else {
            continue;
        };
        decode(builder, &value)?;
    }
    Ok(())
}

/// Public access window labels shared by trails, fields and venues.
pub const PUBLIC_ACCESS: &[(&str, &str)] = &[
    ("Hela dygnet", "always"),
    ("Nej", "no"),
    ("Särskilda öppettider", "opening-hours"),
    ("Utanför skoltid", "after-school"),
];
