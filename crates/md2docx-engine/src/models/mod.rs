pub mod document;
pub mod picture;

pub use document::{BodyItem, Document, Paragraph, Run, RunContent, Table};
pub use picture::Picture;
