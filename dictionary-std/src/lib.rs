//! This crate implements the built-in DICOM data dictionary and constants.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: information about the DICOM attributes
//!   known to the engine, including repeating groups
//!   such as curves `(50xx,eeee)` and overlays `(60xx,eeee)`.
//!   It is used by default when decoding implicit VR data sets.
//!   The dictionary is provided as a singleton
//!   behind the unit type [`StandardDataDictionary`].
//!
//! ## Constants
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for the transfer syntax unique identifiers
//!   and a few other normative UIDs
pub mod data_element;
pub mod tags;
pub mod uids;

pub use data_element::{registry, StandardDataDictionary};
