//! Middleware wrapped around the dispatcher: request ids, request logging,
//! and the conversion of errors and panics into JSON replies.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::handle_panic;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
