//! Field rules and whole-form validity for the account form.

use crate::error::ValidationError;
use crate::field::{Field, FieldValue, ValueKind};
use crate::state::{ErrorState, FormState};

pub const USERNAME_REQUIRED: &str = "username is required";
pub const USERNAME_MIN: &str = "username must be at least 3 characters";
pub const USERNAME_MAX: &str = "username cannot exceed 20 characters";
pub const FAV_FOOD_REQUIRED: &str = "a favorite food must be selected";
pub const FAV_LANGUAGE_REQUIRED: &str = "favLanguage is a required field";
pub const AGREEMENT_REQUIRED: &str = "the agreement must be accepted";

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;

/// Accepted favorite foods.
pub const FOOD_OPTIONS: &[&str] = &["broccoli", "spaghetti", "pizza"];

/// Languages offered by the form. The schema itself accepts any non-empty
/// language.
pub const LANGUAGE_OPTIONS: &[&str] = &["javascript", "rust"];

/// A single predicate with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-empty.
    Required { message: &'static str },
    /// Text must have at least `min` characters.
    MinLength { min: usize, message: &'static str },
    /// Text must have at most `max` characters.
    MaxLength { max: usize, message: &'static str },
    /// Text must be one of `options`.
    OneOf {
        options: &'static [&'static str],
        message: &'static str,
    },
    /// Flag must be set.
    Accepted { message: &'static str },
}

impl Rule {
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::Accepted { message } => message,
        }
    }

    fn holds(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Rule::Required { .. }, FieldValue::Text(text)) => !text.is_empty(),
            (Rule::MinLength { min, .. }, FieldValue::Text(text)) => text.chars().count() >= *min,
            (Rule::MaxLength { max, .. }, FieldValue::Text(text)) => text.chars().count() <= *max,
            (Rule::OneOf { options, .. }, FieldValue::Text(text)) => {
                options.contains(&text.as_str())
            }
            (Rule::Accepted { .. }, FieldValue::Flag(flag)) => *flag,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldRules {
    field: Field,
    kind: ValueKind,
    rules: Vec<Rule>,
}

/// The registration form's validation rules.
///
/// Field-level errors and form-level validity are computed separately:
/// [`validate_field`](Self::validate_field) feeds inline messages while
/// [`validate_form`](Self::validate_form) only gates the submit control.
///
/// ```rust
/// use account_form::{Field, FieldValue, ValidationSchema};
///
/// let schema = ValidationSchema::new();
///
/// let err = schema
///     .validate_field(Field::Username, &FieldValue::from("bo"))
///     .unwrap_err();
/// assert_eq!(err.message, "username must be at least 3 characters");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    fields: Vec<FieldRules>,
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationSchema {
    pub fn new() -> Self {
        let fields = vec![
            FieldRules {
                field: Field::Username,
                kind: ValueKind::Text,
                rules: vec![
                    Rule::Required {
                        message: USERNAME_REQUIRED,
                    },
                    Rule::MinLength {
                        min: USERNAME_MIN_LENGTH,
                        message: USERNAME_MIN,
                    },
                    Rule::MaxLength {
                        max: USERNAME_MAX_LENGTH,
                        message: USERNAME_MAX,
                    },
                ],
            },
            FieldRules {
                field: Field::FavFood,
                kind: ValueKind::Text,
                rules: vec![Rule::OneOf {
                    options: FOOD_OPTIONS,
                    message: FAV_FOOD_REQUIRED,
                }],
            },
            FieldRules {
                field: Field::FavLanguage,
                kind: ValueKind::Text,
                rules: vec![Rule::Required {
                    message: FAV_LANGUAGE_REQUIRED,
                }],
            },
            FieldRules {
                field: Field::Agreement,
                kind: ValueKind::Flag,
                rules: vec![Rule::Accepted {
                    message: AGREEMENT_REQUIRED,
                }],
            },
        ];

        Self { fields }
    }

    /// The rules declared for `field`, in evaluation order.
    pub fn rules(&self, field: Field) -> &[Rule] {
        self.entry(field)
            .map(|entry| entry.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Check `value` against the rules of `field`.
    ///
    /// Rules run in declaration order and the first failure wins, so an empty
    /// username reports the required message, not the length one.
    pub fn validate_field(&self, field: Field, value: &FieldValue) -> Result<(), ValidationError> {
        let Some(entry) = self.entry(field) else {
            return Ok(());
        };

        if value.kind() != entry.kind {
            return Err(ValidationError::new(
                field,
                format!("{field} must be a `{}` type", entry.kind),
            ));
        }

        match entry.rules.iter().find(|rule| !rule.holds(value)) {
            Some(rule) => Err(ValidationError::new(field, rule.message())),
            None => Ok(()),
        }
    }

    /// Whether every field of `state` passes [`validate_field`](Self::validate_field).
    pub fn validate_form(&self, state: &FormState) -> bool {
        Field::ALL
            .into_iter()
            .all(|field| self.validate_field(field, &state.get(field)).is_ok())
    }

    /// Inline errors for every field of `state` at once.
    pub fn validate_all(&self, state: &FormState) -> ErrorState {
        let mut errors = ErrorState::default();
        for field in Field::ALL {
            if let Err(err) = self.validate_field(field, &state.get(field)) {
                errors.set(field, err.message);
            }
        }
        errors
    }

    fn entry(&self, field: Field) -> Option<&FieldRules> {
        self.fields.iter().find(|entry| entry.field == field)
    }
}
