pub mod entity_repo;
pub mod image_repo;
pub mod user_repo;

pub use entity_repo::{EntityRecord, EntityRepository};
pub use image_repo::{ImageRepository, NewImage};
pub use user_repo::UserRepository;
