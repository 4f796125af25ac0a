mod pdf_adapter;
mod text_sanitizer;

pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::sanitize_extracted_text;
