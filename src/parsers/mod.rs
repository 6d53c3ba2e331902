pub mod html;
pub mod template;

#[cfg(test)]
mod tests;

pub use template::{AnchorTemplateResolver, TemplateDefaults};
