mod common;
mod members;

pub use common::common_routes_with_ready;
pub use members::member_routes;
