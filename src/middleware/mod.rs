//! Custom middleware definitions

mod policy;

pub use policy::PolicyLayer;
