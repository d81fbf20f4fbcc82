//! Foundation types for annodiff.
//!
//! This crate provides the element model that the diff engine operates on.
//! Every other annodiff crate depends on `annodiff-types`.
//!
//! # Key Types
//!
//! - [`Element`] -- One unit of an annotated sequence: a character or a structural marker
//! - [`Annotation`] -- Immutable formatting/metadata record attached to text
//! - [`AnnotationKey`] -- Content-addressed identifier for an annotation (BLAKE3 hash)

pub mod annotation;
pub mod element;
pub mod error;
pub mod key;

pub use annotation::Annotation;
pub use element::Element;
pub use error::{TypeError, TypeResult};
pub use key::AnnotationKey;
