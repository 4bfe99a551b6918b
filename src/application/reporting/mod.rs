pub mod highlight;
pub mod html_report;

pub use highlight::{Highlighter, highlight};
pub use html_report::{HtmlReport, subject_line};
