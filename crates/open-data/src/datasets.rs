//! Per-population, per-vintage dataset descriptors.
//!
//! The portal republishes the balance datasets every few years and the
//! column names drift across vintages (the account-code column and the
//! value column in particular). Each population keeps an ordered table of
//! [`DatasetVintage`] descriptors; [`vintage_for_year`] picks the newest
//! vintage that covers a reporting year.

pub const PORTAL_BASE_URL: &str = "https://www.datos.gov.co/resource";

/// Month names as they appear in the portal's `mes` column.
pub const SPANISH_MONTHS: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Uppercase Spanish month name for a 1-based month, if in range.
pub fn month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(SPANISH_MONTHS[(month - 1) as usize])
    } else {
        None
    }
}

/// One published vintage of a balance dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetVintage {
    /// First reporting year this vintage covers.
    pub first_year: i32,
    /// Portal dataset identifier (the `xxxx-xxxx` resource id).
    pub dataset_id: &'static str,
    /// Column holding the chart-of-accounts code.
    pub account_field: &'static str,
    /// Column holding the monetary value.
    pub value_field: &'static str,
    /// Column identifying the entity (`nit` or `nombre_entidad`).
    pub entity_field: &'static str,
}

/// Solidarity-sector (cooperative) vintages, newest first.
pub const SOLIDARIA_VINTAGES: [DatasetVintage; 2] = [
    DatasetVintage {
        first_year: 2020,
        dataset_id: "78mw-y37e",
        account_field: "codigo_cuenta",
        value_field: "valor_en_pesos",
        entity_field: "nit",
    },
    DatasetVintage {
        first_year: 2016,
        dataset_id: "tn24-bdr6",
        account_field: "cuenta",
        value_field: "valor",
        entity_field: "nit",
    },
];

/// Supervised-financial-institution vintages, newest first.
pub const FINANCIERA_VINTAGES: [DatasetVintage; 2] = [
    DatasetVintage {
        first_year: 2019,
        dataset_id: "g4sw-qkvj",
        account_field: "codigo_cuenta",
        value_field: "valor_en_pesos",
        entity_field: "nombre_entidad",
    },
    DatasetVintage {
        first_year: 2015,
        dataset_id: "xht5-pzmd",
        account_field: "cuenta",
        value_field: "valor",
        entity_field: "nombre_entidad",
    },
];

/// Newest vintage covering `year`, or `None` when the year predates the
/// oldest published dataset.
pub fn vintage_for_year(vintages: &'static [DatasetVintage], year: i32) -> Option<&'static DatasetVintage> {
    vintages.iter().find(|v| year >= v.first_year)
}
