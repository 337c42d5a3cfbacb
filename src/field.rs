//! Field identities, values, and raw input normalization.

use core::fmt;
use core::str::FromStr;

use crate::error::FieldError;

/// One named unit of user input on the account form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Username,
    FavFood,
    FavLanguage,
    Agreement,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 4] = [
        Field::Username,
        Field::FavLanguage,
        Field::FavFood,
        Field::Agreement,
    ];

    /// The name used by input elements and by the request payload.
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::FavFood => "favFood",
            Field::FavLanguage => "favLanguage",
            Field::Agreement => "agreement",
        }
    }

    /// The kind of value this field stores.
    pub fn kind(self) -> ValueKind {
        match self {
            Field::Agreement => ValueKind::Flag,
            Field::Username | Field::FavFood | Field::FavLanguage => ValueKind::Text,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Field::Username => 0,
            Field::FavFood => 1,
            Field::FavLanguage => 2,
            Field::Agreement => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| FieldError::Unknown(name.to_owned()))
    }
}

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => f.write_str("string"),
            ValueKind::Flag => f.write_str("boolean"),
        }
    }
}

/// A candidate value for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Flag(_) => ValueKind::Flag,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

/// The kind of input element a change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Radio,
    Select,
    Checkbox,
}

/// A raw change notification, shaped like an input element's state.
///
/// Renderers build these from whatever their widget toolkit reports and hand
/// them to [`FormProps::on_change`](crate::FormProps::on_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub name: String,
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
}

impl ChangeEvent {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(name, InputKind::Text, value)
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            checked: true,
            ..Self::with_value(name, InputKind::Radio, value)
        }
    }

    pub fn select(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(name, InputKind::Select, value)
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Checkbox,
            value: "on".to_owned(),
            checked,
        }
    }

    fn with_value(name: impl Into<String>, kind: InputKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
        }
    }

    /// Resolve the target field and convert the raw state into its value.
    ///
    /// Checkboxes report their checked state; every other input passes its
    /// value through as text.
    pub fn normalize(&self) -> Result<(Field, FieldValue), FieldError> {
        let field = self.name.parse::<Field>()?;
        let value = match self.kind {
            InputKind::Checkbox => FieldValue::Flag(self.checked),
            InputKind::Text | InputKind::Radio | InputKind::Select => {
                FieldValue::Text(self.value.clone())
            }
        };
        Ok((field, value))
    }
}
