pub mod boundary;
pub mod constants;
pub mod input;
pub mod layout;
pub mod render;
