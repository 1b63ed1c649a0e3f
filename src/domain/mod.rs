pub mod film;
pub mod user;

pub use film::*;
pub use user::*;
