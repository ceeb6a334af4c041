//! The movie query layer: parameter validation, statement construction, execution
//! through the storage capability and transformation into served records.

pub mod model;
pub mod params;
pub mod queries;
pub mod service;

pub use model::{ListField, Movie, MovieRecord, NamedEntry};
pub use params::{Pagination, SortOrder, Year};
pub use service::MovieService;
