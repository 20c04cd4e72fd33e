//! Account operations
//!
//! Reference implementations of the operation contract for the "account"
//! entity type. These are example payloads, not engine design: each one is a
//! small, independently testable unit that declares when it is active, which
//! records it cares about, and what it does to them.

pub mod cascade;
pub mod validation;

pub use cascade::EmployeeHeadcountCascade;
pub use validation::ProspectPhoneValidation;
