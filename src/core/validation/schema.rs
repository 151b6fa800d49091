//! Field schemas and the invoice projections
//!
//! A [`Schema`] is an ordered list of fields. Each field declares how raw form
//! text is coerced and which rules then apply. Narrower schemas are derived
//! from the canonical invoice schema with [`Schema::omit`] and
//! [`Schema::pick`], so the create, update and delete shapes never drift from
//! one another.

use super::extractor::FormPayload;
use super::validators::{max_value, min_value, non_empty, one_of, positive};
use crate::core::error::{FieldErrors, ValidationError};
use crate::core::model::{InvoiceStatus, MAX_AMOUNT};
use indexmap::IndexMap;
use std::sync::{Arc, LazyLock};

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

/// How raw input is turned into a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    /// Text; `required` is reported when the key is absent from the form
    Text { required: &'static str },
    /// Number coerced from text. Absent or blank input coerces to zero.
    Number,
}

pub type Rule = Arc<dyn Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync>;

/// One field of a schema
#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn text(name: &'static str, required: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Text { required },
            rules: Vec::new(),
        }
    }

    pub fn number(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Number,
            rules: Vec::new(),
        }
    }

    pub fn rule(
        mut self,
        rule: impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Coerce then check every rule, collecting all messages
    fn check(&self, raw: Option<&str>) -> Result<FieldValue, Vec<String>> {
        let value = coerce(self.field_type, raw).map_err(|message| vec![message])?;

        let messages: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule(self.name, &value).err())
            .collect();

        if messages.is_empty() {
            Ok(value)
        } else {
            Err(messages)
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("rules", &self.rules.len())
            .finish()
    }
}

const NOT_A_NUMBER: &str = "Expected number, received nan";

fn is_infinity_literal(text: &str) -> bool {
    text.strip_prefix(['+', '-']).unwrap_or(text) == "Infinity"
}

fn coerce(field_type: FieldType, raw: Option<&str>) -> Result<FieldValue, String> {
    match field_type {
        FieldType::Text { required } => raw
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(|| required.to_string()),
        FieldType::Number => {
            let trimmed = raw.unwrap_or_default().trim();
            if trimmed.is_empty() {
                return Ok(FieldValue::Number(0.0));
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_nan() => Err(NOT_A_NUMBER.to_string()),
                // Only the spelled-out literal counts as infinity; "inf" and
                // friends are not numbers
                Ok(n) if n.is_infinite() && !is_infinity_literal(trimmed) => {
                    Err(NOT_A_NUMBER.to_string())
                }
                Ok(n) => Ok(FieldValue::Number(n)),
                Err(_) => Err(NOT_A_NUMBER.to_string()),
            }
        }
    }
}

/// Ordered set of fields validated together
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Same schema without the named fields
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|f| !names.contains(&f.name))
                .cloned()
                .collect(),
        }
    }

    /// Same schema restricted to the named fields
    pub fn pick(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|f| names.contains(&f.name))
                .cloned()
                .collect(),
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Validate without faulting: every problem is returned as data
    pub fn safe_parse(&self, payload: &FormPayload) -> Result<ValidatedFields, FieldErrors> {
        let mut values = IndexMap::new();
        let mut errors = FieldErrors::new();

        for field in &self.fields {
            match field.check(payload.get(field.name)) {
                Ok(value) => {
                    values.insert(field.name, value);
                }
                Err(messages) => {
                    errors.insert(field.name.to_string(), messages);
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedFields(values))
        } else {
            Err(errors)
        }
    }

    /// Validate strictly: malformed input is an error for the caller to raise
    pub fn parse(&self, payload: &FormPayload) -> Result<ValidatedFields, ValidationError> {
        self.safe_parse(payload).map_err(ValidationError::FieldErrors)
    }
}

/// Coerced values of a successful parse, keyed by field name
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields(IndexMap<&'static str, FieldValue>);

impl ValidatedFields {
    pub fn text(&self, name: &str) -> Result<&str, ValidationError> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Ok(s.as_str()),
            _ => Err(missing(name)),
        }
    }

    pub fn number(&self, name: &str) -> Result<f64, ValidationError> {
        match self.0.get(name) {
            Some(FieldValue::Number(n)) => Ok(*n),
            _ => Err(missing(name)),
        }
    }

    pub fn status(&self, name: &str) -> Result<InvoiceStatus, ValidationError> {
        self.text(name)?.parse().map_err(|message: String| {
            let mut errors = FieldErrors::new();
            errors.insert(name.to_string(), vec![message]);
            ValidationError::FieldErrors(errors)
        })
    }
}

fn missing(name: &str) -> ValidationError {
    let mut errors = FieldErrors::new();
    errors.insert(name.to_string(), vec!["Required".to_string()]);
    ValidationError::FieldErrors(errors)
}

// =============================================================================
// Invoice schema
// =============================================================================

const STATUSES: &[&str] = &["pending", "paid"];

static INVOICE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(FieldSpec::text("id", "Required").rule(non_empty("Invoice ID must not be empty")))
        .field(
            FieldSpec::text("customerId", "Customer ID is required")
                .rule(non_empty("Customer ID expected.")),
        )
        .field(
            FieldSpec::number("amount")
                .rule(positive())
                .rule(min_value(1.0))
                .rule(max_value(MAX_AMOUNT)),
        )
        .field(
            FieldSpec::text("status", "Status is required")
                .rule(one_of(STATUSES, "Please select an invoice status.")),
        )
        .field(FieldSpec::text("date", "Required").rule(non_empty("Date must not be empty")))
});

static CREATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| INVOICE_SCHEMA.omit(&["id", "date"]));
static UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| INVOICE_SCHEMA.omit(&["date"]));
static DELETE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| INVOICE_SCHEMA.pick(&["id"]));

/// The canonical invoice schema and its projections
pub struct InvoiceSchema;

impl InvoiceSchema {
    pub fn canonical() -> &'static Schema {
        &INVOICE_SCHEMA
    }

    /// Canonical minus `id` and `date`
    pub fn create() -> &'static Schema {
        &CREATE_SCHEMA
    }

    /// Canonical minus `date`
    pub fn update() -> &'static Schema {
        &UPDATE_SCHEMA
    }

    /// Canonical restricted to `id`
    pub fn delete() -> &'static Schema {
        &DELETE_SCHEMA
    }
}

/// Validated input of the create action
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoiceInput {
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl TryFrom<&ValidatedFields> for CreateInvoiceInput {
    type Error = ValidationError;

    fn try_from(fields: &ValidatedFields) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_id: fields.text("customerId")?.to_string(),
            amount: fields.number("amount")?,
            status: fields.status("status")?,
        })
    }
}

/// Validated input of the update action
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInvoiceInput {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl TryFrom<&ValidatedFields> for UpdateInvoiceInput {
    type Error = ValidationError;

    fn try_from(fields: &ValidatedFields) -> Result<Self, Self::Error> {
        Ok(Self {
            id: fields.text("id")?.to_string(),
            customer_id: fields.text("customerId")?.to_string(),
            amount: fields.number("amount")?,
            status: fields.status("status")?,
        })
    }
}

/// Validated input of the delete action
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteInvoiceInput {
    pub id: String,
}

impl TryFrom<&ValidatedFields> for DeleteInvoiceInput {
    type Error = ValidationError;

    fn try_from(fields: &ValidatedFields) -> Result<Self, Self::Error> {
        Ok(Self {
            id: fields.text("id")?.to_string(),
        })
    }
}
