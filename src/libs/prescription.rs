//! Contact lens prescription record.
//!
//! Holds the per-eye values written on a contact lens prescription, the
//! expiration date, and a reference to a photo of the prescription. Numeric
//! values are only accepted if they appear in the standard value tables
//! (see [`PrescriptionField::allowed_values`]) and are stored in the table's
//! canonical spelling, e.g. `-1.5` is stored as `-1.50`.

use crate::libs::state::{load_prescription, prescription_writes};
use crate::libs::store::{PersistenceAdapter, StoreError};
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrescriptionError {
    #[error("'{value}' is not a valid {field} value")]
    InvalidValue { field: PrescriptionField, value: String },
    #[error("brand '{0}' is not in the brand catalog")]
    UnknownBrand(String),
    #[error("unknown prescription field '{0}'")]
    UnknownField(String),
    #[error("unknown eye '{0}', expected 'left', 'right' or 'both'")]
    UnknownEye(String),
    #[error("prescription image '{0}' does not exist")]
    ImageNotFound(String),
    #[error("failed to save prescription: {0}")]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    pub fn key(self) -> &'static str {
        match self {
            EyeSide::Left => "left",
            EyeSide::Right => "right",
        }
    }
}

/// Which eye(s) an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeTarget {
    Left,
    Right,
    Both,
}

impl EyeTarget {
    fn sides(self) -> &'static [EyeSide] {
        match self {
            EyeTarget::Left => &[EyeSide::Left],
            EyeTarget::Right => &[EyeSide::Right],
            EyeTarget::Both => &[EyeSide::Left, EyeSide::Right],
        }
    }
}

impl FromStr for EyeTarget {
    type Err = PrescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" | "os" => Ok(EyeTarget::Left),
            "right" | "r" | "od" => Ok(EyeTarget::Right),
            "both" | "ou" => Ok(EyeTarget::Both),
            other => Err(PrescriptionError::UnknownEye(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrescriptionField {
    /// Power (SPH)
    Sph,
    /// Cylinder (CYL)
    Cyl,
    Axis,
    /// Add power
    Add,
    /// Base curve (BC)
    Bc,
    /// Diameter (DIA)
    Dia,
    Brand,
}

impl PrescriptionField {
    pub const ALL: [PrescriptionField; 7] = [
        PrescriptionField::Sph,
        PrescriptionField::Cyl,
        PrescriptionField::Axis,
        PrescriptionField::Add,
        PrescriptionField::Bc,
        PrescriptionField::Dia,
        PrescriptionField::Brand,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PrescriptionField::Sph => "sph",
            PrescriptionField::Cyl => "cyl",
            PrescriptionField::Axis => "axis",
            PrescriptionField::Add => "add",
            PrescriptionField::Bc => "bc",
            PrescriptionField::Dia => "dia",
            PrescriptionField::Brand => "brand",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrescriptionField::Sph => "Power (SPH)",
            PrescriptionField::Cyl => "Cylinder (CYL)",
            PrescriptionField::Axis => "Axis",
            PrescriptionField::Add => "Add Power",
            PrescriptionField::Bc => "Base Curve (BC)",
            PrescriptionField::Dia => "Diameter (DIA)",
            PrescriptionField::Brand => "Brand",
        }
    }

    /// Accepted values in canonical spelling. `None` for free-form fields.
    pub fn allowed_values(self) -> Option<Vec<String>> {
        let signed_hundredths = |from: i32, through: i32| -> Vec<String> {
            (from..=through).step_by(25).map(|v| format!("{:+.2}", v as f64 / 100.0)).collect()
        };
        let tenths = |from: i32, through: i32| -> Vec<String> { (from..=through).map(|v| format!("{:.1}", v as f64 / 10.0)).collect() };

        match self {
            PrescriptionField::Sph => Some(signed_hundredths(-1000, 800)),
            PrescriptionField::Cyl => Some(signed_hundredths(-400, 400)),
            PrescriptionField::Axis => Some((0..=180).map(|v: i32| v.to_string()).collect()),
            PrescriptionField::Add => Some(signed_hundredths(75, 300)),
            PrescriptionField::Bc => Some(tenths(80, 100)),
            PrescriptionField::Dia => Some(tenths(130, 150)),
            PrescriptionField::Brand => None,
        }
    }

    /// Rewrites user input into the table spelling, e.g. `-1.5` into `-1.50`.
    fn canonical(self, input: &str) -> Option<String> {
        let input = input.trim();
        match self {
            PrescriptionField::Sph | PrescriptionField::Cyl | PrescriptionField::Add => {
                input.parse::<f64>().ok().map(|v| format!("{:+.2}", v + 0.0))
            }
            PrescriptionField::Bc | PrescriptionField::Dia => input.parse::<f64>().ok().map(|v| format!("{:.1}", v)),
            PrescriptionField::Axis => input.parse::<u32>().ok().map(|v| v.to_string()),
            PrescriptionField::Brand => Some(input.to_string()).filter(|s| !s.is_empty()),
        }
    }
}

impl fmt::Display for PrescriptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrescriptionField {
    type Err = PrescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        PrescriptionField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or(PrescriptionError::UnknownField(s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EyePrescription {
    pub sph: Option<String>,
    pub cyl: Option<String>,
    pub axis: Option<String>,
    pub add: Option<String>,
    pub bc: Option<String>,
    pub dia: Option<String>,
    pub brand: Option<String>,
}

impl EyePrescription {
    pub fn get(&self, field: PrescriptionField) -> Option<&String> {
        self.slot(field).as_ref()
    }

    pub fn set(&mut self, field: PrescriptionField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn is_empty(&self) -> bool {
        PrescriptionField::ALL.into_iter().all(|field| self.get(field).is_none())
    }

    fn slot(&self, field: PrescriptionField) -> &Option<String> {
        match field {
            PrescriptionField::Sph => &self.sph,
            PrescriptionField::Cyl => &self.cyl,
            PrescriptionField::Axis => &self.axis,
            PrescriptionField::Add => &self.add,
            PrescriptionField::Bc => &self.bc,
            PrescriptionField::Dia => &self.dia,
            PrescriptionField::Brand => &self.brand,
        }
    }

    fn slot_mut(&mut self, field: PrescriptionField) -> &mut Option<String> {
        match field {
            PrescriptionField::Sph => &mut self.sph,
            PrescriptionField::Cyl => &mut self.cyl,
            PrescriptionField::Axis => &mut self.axis,
            PrescriptionField::Add => &mut self.add,
            PrescriptionField::Bc => &mut self.bc,
            PrescriptionField::Dia => &mut self.dia,
            PrescriptionField::Brand => &mut self.brand,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prescription {
    pub same_for_both_eyes: bool,
    pub left: EyePrescription,
    pub right: EyePrescription,
    pub expiration: Option<NaiveDate>,
    /// Path of the prescription photo; the file itself is not managed here.
    pub image_path: Option<String>,
}

impl Prescription {
    pub fn load<S: PersistenceAdapter + ?Sized>(store: &S) -> Self {
        load_prescription(store)
    }

    pub fn save<S: PersistenceAdapter + ?Sized>(&self, store: &mut S) -> Result<(), PrescriptionError> {
        store.apply(&prescription_writes(self))?;
        Ok(())
    }

    /// Values for `side`. With `same_for_both_eyes` both sides read the left eye.
    pub fn eye(&self, side: EyeSide) -> &EyePrescription {
        match side {
            EyeSide::Right if !self.same_for_both_eyes => &self.right,
            _ => &self.left,
        }
    }

    /// Validates and stores one field. `None` clears it.
    ///
    /// Brands are checked against `brands` unless the catalog is empty.
    pub fn set_field(&mut self, target: EyeTarget, field: PrescriptionField, value: Option<&str>, brands: &[String]) -> Result<(), PrescriptionError> {
        let value = match value {
            Some(raw) => Some(Self::validate(field, raw, brands)?),
            None => None,
        };
        for &side in target.sides() {
            match side {
                EyeSide::Left => self.left.set(field, value.clone()),
                EyeSide::Right => self.right.set(field, value.clone()),
            }
        }
        Ok(())
    }

    pub fn attach_image(&mut self, path: &str) -> Result<(), PrescriptionError> {
        if !Path::new(path).is_file() {
            return Err(PrescriptionError::ImageNotFound(path.to_string()));
        }
        self.image_path = Some(path.to_string());
        Ok(())
    }

    pub fn detach_image(&mut self) {
        self.image_path = None;
    }

    /// Expired once `today` is past the expiration date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration.is_some_and(|expiration| today > expiration)
    }

    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration.map(|expiration| (expiration - today).num_days())
    }

    fn validate(field: PrescriptionField, raw: &str, brands: &[String]) -> Result<String, PrescriptionError> {
        let invalid = || PrescriptionError::InvalidValue {
            field,
            value: raw.to_string(),
        };
        let canonical = field.canonical(raw).ok_or_else(invalid)?;

        match field.allowed_values() {
            Some(allowed) if allowed.contains(&canonical) => Ok(canonical),
            Some(_) => Err(invalid()),
            None if brands.is_empty() => Ok(canonical),
            None => brands
                .iter()
                .find(|brand| brand.eq_ignore_ascii_case(&canonical))
                .cloned()
                .ok_or(PrescriptionError::UnknownBrand(canonical)),
        }
    }
}
