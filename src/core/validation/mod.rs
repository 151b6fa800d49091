//! Form validation
//!
//! One canonical invoice schema, narrowed per action by field projection,
//! plus the extractor that turns a submitted form into a [`FormPayload`].

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::FormPayload;
pub use schema::{
    CreateInvoiceInput, DeleteInvoiceInput, FieldSpec, FieldValue, InvoiceSchema, Schema,
    UpdateInvoiceInput, ValidatedFields,
};
