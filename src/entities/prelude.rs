pub use super::movie::Entity as Movie;
pub use super::user::Entity as User;
