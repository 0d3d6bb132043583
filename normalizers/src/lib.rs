//! Normalizers Crate
//!
//! Converts loosely-shaped provider payloads into the canonical records defined
//! in `shared-types`, and builds the flat property maps the CRM expects.
//!
//! # Architecture
//!
//! - **Types**: Canonical records live in the `shared-types` crate
//! - **Implementations**: Pure conversion functions live here; nothing in this
//!   crate performs I/O and no function in it can fail
//!
//! # Available Normalizers
//!
//! - `normalize_contact`: contact-search records, with nested fallbacks for
//!   phone, organization and email status
//! - `normalize_person`: organization top-people records
//! - `normalize_organization`: organization-search records
//! - `company_domain`, `flatten_filter`: input clean-up helpers
//! - `contact_properties`, `company_properties`: CRM property maps
//!
//! # Example
//!
//! ```rust,ignore
//! use normalizers::normalize_contact;
//!
//! let contact = normalize_contact(&raw_json);
//! ```

pub mod contact;
pub mod domain;
pub mod filters;
pub mod organization;
pub mod properties;
mod value;

pub use contact::{normalize_contact, normalize_person};
pub use domain::company_domain;
pub use filters::flatten_filter;
pub use organization::normalize_organization;
pub use properties::{company_properties, contact_properties, CrmProperties};
