mod handlers;
mod model;
mod routes;

pub use model::*;
pub use routes::routes;
