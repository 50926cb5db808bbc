mod evenement;
mod gebruiker;
mod gereedschap;
mod plaats;

pub use evenement::*;
pub use gebruiker::*;
pub use gereedschap::*;
pub use plaats::*;
