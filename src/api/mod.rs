//! HTTP layer: request parsing, dispatch, handlers and middleware.

pub mod context;
pub mod dispatch;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod reply;
pub mod routes;


pub use routes::create_router;
