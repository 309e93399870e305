//! Raw menu document schema and JSON boundary parsing.
//!
//! The extraction step upstream returns loosely-structured JSON, sometimes
//! wrapped in a Markdown code fence. Everything here is tolerant by design:
//! missing keys become empty lists, missing sub-fields become `None`, and
//! numeric fields accept both JSON numbers and formatted strings.

use std::fmt;

use serde::{Deserialize, Deserializer};

////////////////////////////////////////////////////////////////////////////////
// #region RawDocumentModels

/// Scalar that may arrive as a JSON number or a formatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumRawScalar {
    /// Integer literal.
    Integer(i64),
    /// Decimal literal.
    Decimal(f64),
    /// Text form, possibly with currency or grouping characters.
    Text(String),
}

/// One top-level menu item as extracted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecRawMenuItem {
    /// Caller-supplied record number.
    #[serde(default)]
    pub number: Option<EnumRawScalar>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Listed price.
    #[serde(default)]
    pub price: Option<EnumRawScalar>,
    /// Free-text description; accepted but not emitted into any row.
    #[serde(default)]
    pub description: Option<String>,
    /// Names of modifier groups this item declares.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub modifiers: Vec<String>,
}

/// One member item inside a modifier group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecRawModifierGroupItem {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Listed price.
    #[serde(default)]
    pub price: Option<EnumRawScalar>,
}

/// One modifier group as extracted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecRawModifierGroup {
    /// Caller-supplied group number.
    #[serde(default)]
    pub number: Option<EnumRawScalar>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Declared member items.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub items: Vec<SpecRawModifierGroupItem>,
}

/// One submenu as extracted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecRawSubmenu {
    /// Caller-supplied record number.
    #[serde(default)]
    pub number: Option<EnumRawScalar>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Names of the items placed on this submenu.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub items: Vec<String>,
}

/// The raw extraction document; validated once at this boundary.
///
/// Any list key may be absent or null. Absence is a valid state, not an
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecRawMenuDocument {
    /// Top-level menu items.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub items: Vec<SpecRawMenuItem>,
    /// Submenus.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub submenus: Vec<SpecRawSubmenu>,
    /// Modifier groups.
    #[serde(default, deserialize_with = "convert_null_to_default")]
    pub modifier_groups: Vec<SpecRawModifierGroup>,
}

fn convert_null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BoundaryParsing

/// "Input document could not be parsed" errors at the JSON boundary.
#[derive(Debug)]
pub enum MenuParseError {
    /// No JSON payload could be located in the input text.
    PayloadNotFound,
    /// Payload located but rejected by the JSON parser.
    InvalidJson(String),
}

impl fmt::Display for MenuParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadNotFound => {
                write!(f, "No JSON payload found in extraction output.")
            }
            Self::InvalidJson(msg) => write!(f, "Invalid JSON payload: {msg}"),
        }
    }
}

impl std::error::Error for MenuParseError {}

/// Locate the JSON payload inside extraction output.
///
/// Accepts a bare JSON document, a ```` ```json ```` fenced block, or a
/// plain ```` ``` ```` fenced block. Returns `None` when no payload
/// boundary can be located.
pub fn derive_json_payload(text: &str) -> Option<&str> {
    let c_trimmed = text.trim();
    if c_trimmed.starts_with('{') || c_trimmed.starts_with('[') {
        return Some(c_trimmed);
    }

    for c_marker in ["```json", "```"] {
        let Some(n_idx_open) = text.find(c_marker) else {
            continue;
        };
        let c_rest = &text[n_idx_open + c_marker.len()..];
        let Some(n_idx_close) = c_rest.find("```") else {
            continue;
        };
        let c_payload = c_rest[..n_idx_close].trim();
        if !c_payload.is_empty() {
            return Some(c_payload);
        }
    }

    None
}

/// Parse extraction output into a raw menu document.
///
/// Never panics on malformed optional data; the only failure modes are a
/// missing payload and JSON that does not parse at all.
pub fn parse_menu_document(text: &str) -> Result<SpecRawMenuDocument, MenuParseError> {
    let c_payload = derive_json_payload(text).ok_or(MenuParseError::PayloadNotFound)?;
    serde_json::from_str(c_payload).map_err(|err| MenuParseError::InvalidJson(err.to_string()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ScalarCoercion

/// Coerce a raw scalar into a non-negative price.
///
/// Text forms may carry currency/grouping characters ("$9.50", "1,200.00").
/// Parse failures and negative values fall back to 0.0; this never fails.
pub fn convert_scalar_to_price(value: Option<&EnumRawScalar>) -> f64 {
    let n_price = match value {
        None => 0.0,
        Some(EnumRawScalar::Integer(v)) => *v as f64,
        Some(EnumRawScalar::Decimal(v)) => *v,
        Some(EnumRawScalar::Text(raw)) => raw
            .replace('$', "")
            .replace(',', "")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0),
    };

    if n_price.is_finite() && n_price > 0.0 {
        n_price
    } else {
        0.0
    }
}

/// Coerce a raw scalar into an integer record number when possible.
pub fn convert_scalar_to_number(value: Option<&EnumRawScalar>) -> Option<i64> {
    match value {
        None => None,
        Some(EnumRawScalar::Integer(v)) => Some(*v),
        Some(EnumRawScalar::Decimal(v)) => {
            if v.is_finite() && v.fract() == 0.0 {
                Some(*v as i64)
            } else {
                None
            }
        }
        Some(EnumRawScalar::Text(raw)) => raw.trim().parse::<i64>().ok(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
