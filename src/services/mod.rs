pub mod credentials;
pub mod provision;
pub mod validation;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieService};
pub use movie_service_impl::SeaOrmMovieService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;
