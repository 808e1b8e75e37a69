pub mod binding;
pub mod window;
pub mod workspace;
