//! # Annotations
//!
//! Raw span input ([`SpanRecord`], or JSON records under configurable
//! [`FieldNames`]) is validated once into an immutable [`Annotation`].

mod annotation;
mod field_names;
mod records;
mod validation;

#[doc(inline)]
pub use annotation::*;
#[doc(inline)]
pub use field_names::*;
#[doc(inline)]
pub use records::*;
#[doc(inline)]
pub use validation::*;
