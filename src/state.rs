//! Form values and inline error messages.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::field::{Field, FieldValue};

/// Current value of every field.
///
/// All four fields are always present; [`Default`] is the empty form. The
/// serialized shape is the registration request body:
/// `{"username": .., "favFood": .., "favLanguage": .., "agreement": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub username: String,
    pub fav_food: String,
    pub fav_language: String,
    pub agreement: bool,
}

impl FormState {
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Username => FieldValue::Text(self.username.clone()),
            Field::FavFood => FieldValue::Text(self.fav_food.clone()),
            Field::FavLanguage => FieldValue::Text(self.fav_language.clone()),
            Field::Agreement => FieldValue::Flag(self.agreement),
        }
    }

    /// Store `value` in `field`.
    ///
    /// Fails without touching the state when the value has the wrong kind.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            (Field::Username, FieldValue::Text(text)) => self.username = text,
            (Field::FavFood, FieldValue::Text(text)) => self.fav_food = text,
            (Field::FavLanguage, FieldValue::Text(text)) => self.fav_language = text,
            (Field::Agreement, FieldValue::Flag(flag)) => self.agreement = flag,
            (field, _) => {
                return Err(FieldError::TypeMismatch {
                    field,
                    expected: field.kind(),
                })
            }
        }
        Ok(())
    }
}

/// Inline error message per field; an empty string means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    messages: [String; 4],
}

impl ErrorState {
    pub fn get(&self, field: Field) -> &str {
        &self.messages[field.index()]
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.messages[field.index()] = message.into();
    }

    pub fn clear(&mut self, field: Field) {
        self.messages[field.index()].clear();
    }

    /// Whether no field currently shows an error.
    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(String::is_empty)
    }

    /// Fields with a non-empty message, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, message)| !message.is_empty())
    }
}
