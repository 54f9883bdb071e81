pub mod pinterest;
pub mod wildberries;
pub mod youtube;
