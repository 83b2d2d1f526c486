pub mod director;
pub mod film;
pub mod user;
