pub mod reload_response;
pub mod reload_route;
