pub mod fruit_response;
pub mod get_fruit_route;
