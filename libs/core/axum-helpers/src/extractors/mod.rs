//! Extractors that turn bad input into the standard 400 envelope.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
