// HTTP boundary for the movie API: envelope, routing, error mapping

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::ApiServer;
