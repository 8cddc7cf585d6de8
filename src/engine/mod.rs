pub mod bridge;
pub mod color;
pub mod layout;
