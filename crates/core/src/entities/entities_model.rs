//! Entity model and tax-identifier normalization.
//!
//! An entity is joined against external data by its formatted tax id
//! (`NNN-NNN-NNN-D`) and against the local store by its legal name. Both
//! keys must resolve to the same logical entity; the helpers here produce
//! both normalized forms.

use serde::{Deserialize, Serialize};

/// Prime weights for the national tax-id check digit, applied to the
/// identifier digits right to left.
const CHECK_DIGIT_WEIGHTS: [u32; 15] = [3, 7, 13, 17, 19, 23, 29, 37, 41, 43, 47, 53, 59, 67, 71];

/// Entity-class code distinguishing the two regulated populations.
///
/// The class decides which chart of accounts applies and which portal
/// pipeline serves the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityClass {
    /// Supervised financial institution (banking chart of accounts).
    Financiera,
    /// Credit cooperative (solidarity-sector chart of accounts).
    Solidaria,
}

impl EntityClass {
    /// Maps the caller-supplied numeric class code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Financiera),
            2 => Some(Self::Solidaria),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Financiera => 1,
            Self::Solidaria => 2,
        }
    }
}

/// A regulated organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Tax identifier digits, without the check digit.
    pub nit: String,
    /// Declared check digit.
    pub check_digit: u8,
    /// Legal name; the join key for the local store.
    pub legal_name: String,
    /// Short display name.
    pub short_name: String,
    /// Population the entity belongs to.
    pub class: EntityClass,
    /// Supervisory registry code, when known.
    #[serde(default)]
    pub supervisory_code: Option<String>,
}

impl Entity {
    /// The external-source join key: `NNN-NNN-NNN-D` with the declared
    /// check digit.
    pub fn formatted_nit(&self) -> String {
        format_nit(&self.nit, self.check_digit)
    }

    /// Fallback external key with the check digit recomputed from the
    /// identifier digits; covers datasets that publish the NIT without a
    /// check digit when the declared digit disagrees with the computed one.
    pub fn computed_nit_key(&self) -> Option<String> {
        compute_check_digit(&self.nit).map(|dv| format_nit(&self.nit, dv))
    }

    /// The local-store join key: normalized legal name.
    pub fn name_key(&self) -> String {
        normalize_name_key(&self.legal_name)
    }
}

/// Formats a tax identifier as `NNN-NNN-NNN-D`, left-padding the digits
/// to nine places. Identifiers longer than nine digits keep every digit:
/// the leading digits form an extra group ahead of the standard trailing
/// three.
pub fn format_nit(digits: &str, check_digit: u8) -> String {
    let clean: String = digits.chars().filter(|c| c.is_ascii_digit()).collect();
    if clean.len() > 9 {
        let (head, tail) = clean.split_at(clean.len() - 9);
        return format!(
            "{}-{}-{}-{}-{}",
            head,
            &tail[..3],
            &tail[3..6],
            &tail[6..9],
            check_digit
        );
    }
    let padded = format!("{:0>9}", clean);
    format!(
        "{}-{}-{}-{}",
        &padded[..3],
        &padded[3..6],
        &padded[6..9],
        check_digit
    )
}

/// Standard check-digit computation over the identifier digits.
///
/// Returns `None` when the input carries no digits or more digits than
/// the weight table covers.
pub fn compute_check_digit(digits: &str) -> Option<u8> {
    let clean: Vec<u32> = digits
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| c.to_digit(10).unwrap_or(0))
        .collect();
    if clean.is_empty() || clean.len() > CHECK_DIGIT_WEIGHTS.len() {
        return None;
    }

    let sum: u32 = clean
        .iter()
        .rev()
        .zip(CHECK_DIGIT_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    let remainder = sum % 11;
    let dv = if remainder > 1 { 11 - remainder } else { remainder };
    Some(dv as u8)
}

/// Normalizes a NIT as published on the portal into the formatted join
/// key. Accepts `900123456`, `900123456-7`, and already-formatted values;
/// when no check digit is published, the standard one is computed.
pub fn normalize_published_nit(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    match trimmed.rsplit_once('-') {
        Some((base, dv)) if dv.len() == 1 && dv.chars().all(|c| c.is_ascii_digit()) => {
            let base_digits: String = base.chars().filter(|c| c.is_ascii_digit()).collect();
            if base_digits.is_empty() {
                return None;
            }
            let dv = dv.parse::<u8>().ok()?;
            Some(format_nit(&base_digits, dv))
        }
        _ => {
            let dv = compute_check_digit(&digits)?;
            Some(format_nit(&digits, dv))
        }
    }
}

/// Normalizes a legal name into the local-store join key.
pub fn normalize_name_key(name: &str) -> String {
    name.trim().to_uppercase()
}
