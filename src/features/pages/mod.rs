//! Server-rendered UI: the upload wizard with the record grid, and the
//! record detail page. Both only talk to the JSON API from the browser.

pub mod handlers;
pub mod routes;

pub use routes::routes;
