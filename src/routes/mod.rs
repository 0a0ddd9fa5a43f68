pub mod auth_routes;
pub mod location_routes;
pub mod lorry_routes;
pub mod route_routes;
pub mod routing_proxy_routes;
