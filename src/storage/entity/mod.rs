pub mod divinity_details;
pub mod entity_image;
pub mod hero_details;
pub mod image_with_caption;
pub mod myth_entity;
pub mod mythical_creature_details;
pub mod user;
