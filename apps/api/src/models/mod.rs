pub mod resume;
pub mod template;
