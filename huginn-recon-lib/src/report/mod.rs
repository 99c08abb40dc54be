pub mod escape;
pub mod mode;
pub mod reporter;

pub use escape::escape_html;
pub use mode::ReportMode;
pub use reporter::{render, Reporter, Surface, MAX_RANKED};
