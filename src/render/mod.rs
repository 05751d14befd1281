//! Pass rendering: one declarative layout, drawn as a bitmap on screen and as a PDF for download.

pub mod document;
pub mod export;
pub mod layout;
pub mod pattern;
pub mod raster;

pub use export::{pass_file_name, ExportedPass, PassExporter, PassView};
pub use layout::PassLayout;
pub use pattern::CodePattern;
pub use raster::{encode_png, Rasterizer};
