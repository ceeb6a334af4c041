pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod movies;

pub mod util {
    pub mod env;
}
