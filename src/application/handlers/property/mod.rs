//! Property tools - `get_property`, `list_properties`.

mod get_property;

pub use get_property::{GetPropertyHandler, ListPropertiesHandler};
