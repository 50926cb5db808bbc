#[macro_use]
extern crate tracing;

mod evenement;
mod gebruiker;
mod gereedschap;
mod linkage;
mod plaats;

pub use evenement::*;
pub use gebruiker::*;
pub use gereedschap::*;
pub use linkage::*;
pub use plaats::*;
