pub mod convert;
pub mod docx;
pub mod emit;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod sink;
pub mod styles;

// Re-export key types for easier usage
pub use convert::*;
pub use docx::Template;
pub use emit::{EmitSummary, Emitter};
pub use error::{ConvertError, FormatError};
pub use io::*;
pub use models::Document;
pub use sink::DocumentSink;
