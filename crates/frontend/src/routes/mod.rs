pub mod routes;
pub mod table;

pub use table::{route_table, RouteError, RouteTable};
