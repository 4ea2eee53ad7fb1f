mod builder;
mod format;
mod markdown;
mod page;
mod paths;
mod render;
mod routes;
mod template;
mod write;

pub use builder::Builder;
