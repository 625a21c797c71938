//! Zammad API data models
//!
//! Flat snapshots of the records returned by the helpdesk API. Unknown
//! upstream fields are ignored so new Zammad versions don't break decoding.

mod organization;
mod ticket;
mod user;

pub use organization::Organization;
pub use ticket::Ticket;
pub use user::User;
