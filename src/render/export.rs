use crate::client::Notice;
use crate::config::{EventConfig, ExportConfig};
use crate::domain::{DocumentSink, RegistrationRecord};
use crate::render::document::{render_document, DocumentImages};
use crate::render::layout::PassLayout;
use crate::render::pattern::CodePattern;
use crate::render::raster::Rasterizer;
use crate::utils::error::{PassError, Result};
use image::RgbaImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const FILE_PREFIX: &str = "TEDx-Pass-";
pub const FILE_EXTENSION: &str = "pdf";

const DOWNLOAD_LABEL: &str = "Download Pass";
const DOWNLOADING_LABEL: &str = "Generating...";

/// `TEDx-Pass-<name>.pdf`, with every run of whitespace in the name replaced by one hyphen.
/// Path separators and other characters that are not letters, digits, `.`, `_` or `-` also
/// become hyphens, so the result is always a single file name.
pub fn pass_file_name(name: &str) -> String {
    let hyphenated: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{}{}.{}", FILE_PREFIX, hyphenated, FILE_EXTENSION)
}

/// A rendered pass as shown on screen. The code pattern is drawn once, when the view is built,
/// and every export of this view reuses it.
#[derive(Debug, Clone)]
pub struct PassView {
    record: RegistrationRecord,
    layout: PassLayout,
    pattern: CodePattern,
}

impl PassView {
    pub fn new(record: RegistrationRecord, event: &EventConfig, pattern: CodePattern) -> Self {
        let layout = PassLayout::build(&record, event);
        Self {
            record,
            layout,
            pattern,
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    pub fn layout(&self) -> &PassLayout {
        &self.layout
    }

    pub fn pattern(&self) -> &CodePattern {
        &self.pattern
    }

    pub fn display(&self, rasterizer: &Rasterizer) -> RgbaImage {
        rasterizer.render_pass(&self.layout, &self.pattern)
    }

    pub fn file_name(&self) -> String {
        pass_file_name(&self.record.name)
    }
}

#[derive(Debug, Clone)]
pub struct ExportedPass {
    pub file_name: String,
    /// Where the sink put the document.
    pub location: String,
    pub document: Vec<u8>,
    /// Bitmap of the whole pass taken at export time.
    pub snapshot: RgbaImage,
}

/// Turns pass views into PDF documents and hands them to a [`DocumentSink`].
pub struct PassExporter<S: DocumentSink> {
    sink: S,
    rasterizer: Arc<Rasterizer>,
    in_flight: AtomicBool,
}

impl<S: DocumentSink> PassExporter<S> {
    pub fn new(sink: S, rasterizer: Rasterizer) -> Self {
        Self {
            sink,
            rasterizer: Arc::new(rasterizer),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Builds the rasterizer from config, loading the event logo when one is set.
    pub fn from_config(sink: S, event: &EventConfig, export: &ExportConfig) -> Result<Self> {
        let mut rasterizer = Rasterizer::new(export.pixels_per_mm);
        if let Some(path) = &event.logo_path {
            rasterizer = rasterizer.with_logo_file(path)?;
        }
        Ok(Self::new(sink, rasterizer))
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn download_label(&self) -> &'static str {
        if self.is_exporting() {
            DOWNLOADING_LABEL
        } else {
            DOWNLOAD_LABEL
        }
    }

    /// Snapshot, code-pattern bitmap, PDF page, then save. Rejected while another export runs.
    pub async fn export(&self, view: &PassView) -> Result<ExportedPass> {
        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(PassError::ExportInProgress)?;
        let file_name = view.file_name();
        tracing::info!("Generating pass document {}", file_name);

        let rasterizer = Arc::clone(&self.rasterizer);
        let layout = view.layout.clone();
        let pattern = view.pattern;
        let title = format!("TEDx Pass {}", view.record.pass_id);

        let (snapshot, document) = tokio::task::spawn_blocking(move || -> Result<_> {
            let snapshot = rasterizer.render_pass(&layout, &pattern);

            let code_rect = layout
                .code_pattern_rect()
                .ok_or_else(|| PassError::render("layout has no code pattern"))?;
            let code_pattern = rasterizer.render_code_pattern(&pattern, code_rect.width);

            let logo_rect = layout
                .logo_rect()
                .ok_or_else(|| PassError::render("layout has no logo"))?;
            let logo = rasterizer.render_logo(logo_rect.width, logo_rect.height);

            let images = DocumentImages {
                logo: &logo,
                code_pattern: &code_pattern,
            };
            let document = render_document(&layout, &images, &title)?;
            Ok((snapshot, document))
        })
        .await??;

        let location = self.sink.write_file(&file_name, &document).await?;
        tracing::info!("Pass saved to {}", location);

        Ok(ExportedPass {
            file_name,
            location,
            document,
            snapshot,
        })
    }

    /// `export` for the download control: failures are logged and become a notice.
    pub async fn download(&self, view: &PassView) -> std::result::Result<ExportedPass, Notice> {
        self.export(view).await.map_err(|e| {
            tracing::error!("Failed to generate pass document: {}", e);
            Notice::download_failed()
        })
    }
}

/// Holds the export flag for the duration of one export, on every exit path.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_hyphenates_whitespace_runs() {
        assert_eq!(pass_file_name("Jane Doe"), "TEDx-Pass-Jane-Doe.pdf");
        assert_eq!(pass_file_name("Jane \t  Q Doe"), "TEDx-Pass-Jane-Q-Doe.pdf");
        assert_eq!(pass_file_name("Prince"), "TEDx-Pass-Prince.pdf");
        assert_eq!(pass_file_name("  Jane Doe "), "TEDx-Pass-Jane-Doe.pdf");
    }

    #[test]
    fn file_name_never_contains_path_separators() {
        assert_eq!(
            pass_file_name("a/../../../escaped"),
            "TEDx-Pass-a-..-..-..-escaped.pdf"
        );
        assert_eq!(pass_file_name(r"..\win\dir"), "TEDx-Pass-..-win-dir.pdf");
        assert_eq!(pass_file_name("José Ñúñez"), "TEDx-Pass-José-Ñúñez.pdf");
        assert!(!pass_file_name("/etc/passwd").contains('/'));
    }

    #[test]
    fn in_flight_flag_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);
        let first = InFlight::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlight::acquire(&flag).is_none());

        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlight::acquire(&flag).is_some());
    }
}
