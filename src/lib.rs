pub mod error;
pub mod tree;
pub mod models;
pub mod extract;
pub mod media;
pub mod fetch;
pub mod inspect;
pub mod render;

pub use error::{Result, VastError};
pub use extract::{extract, parse_vast};
pub use media::{select_playable, to_rows};
pub use models::{AdCreative, Impression, MediaFileVariant, MediaRow};
