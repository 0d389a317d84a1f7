pub mod loader;
pub mod models;

mod errors;

pub use errors::RosterError;
pub use loader::{load_roster, parse_roster};
pub use models::{Roster, RosterEntry};
