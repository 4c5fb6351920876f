// HTTP surface: the question form, its submission endpoint and a health probe.
pub mod handlers;
pub mod page;
pub mod routes;

pub use routes::routes;
