mod guard;
mod handlers;
mod model;
mod password;
mod routes;
mod token;

pub use guard::{mount, require_identity, Access, ApiRoute};
pub use model::*;
pub use routes::routes;
pub use token::{Claims, TokenConfig, TokenService};
