//! Regulated-entity domain model.

pub mod entities_model;

#[cfg(test)]
mod entities_model_tests;

pub use entities_model::{
    compute_check_digit, format_nit, normalize_name_key, normalize_published_nit, Entity,
    EntityClass,
};
