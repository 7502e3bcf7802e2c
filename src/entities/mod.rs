pub mod prelude;

pub mod movie;
pub mod user;
