//! PDF adapters implementing the [`PdfRenderer`](crate::ports::PdfRenderer) port.

mod plain_text;

pub use plain_text::PlainTextPdfRenderer;
