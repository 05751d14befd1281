use std::sync::Arc;
use tedx_pass::config::EventConfig;
use tedx_pass::domain::DocumentSink;
use tedx_pass::render::Rasterizer;
use tedx_pass::{
    LocalStorage, Notice, PassError, PassExporter, PassId, PassView, RegistrationRecord, Result,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use tempfile::TempDir;
use tokio::sync::Notify;

fn view_for(name: &str) -> PassView {
    let record = RegistrationRecord {
        name: name.to_string(),
        email: "j@x.com".to_string(),
        pass_id: PassId::from("p1"),
    };
    PassView::new(
        record,
        &EventConfig::default(),
        tedx_pass::render::CodePattern::seeded(5),
    )
}

fn jane_view() -> PassView {
    view_for("Jane Doe")
}

/// Text shown by the page's `Tj` operators and the number of XObjects it paints.
fn page_contents(pdf: &[u8]) -> (Vec<String>, usize) {
    let doc = Document::load_mem(pdf).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();

    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let texts = content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect();
    let painted = content
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .count();
    (texts, painted)
}

fn image_count(pdf: &[u8]) -> usize {
    let doc = Document::load_mem(pdf).unwrap();
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            matches!(
                stream.dict.get(b"Subtype").and_then(Object::as_name),
                Ok(name) if name == b"Image"
            )
        })
        .count()
}

/// Holds every write until the test releases it.
struct GatedSink {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl DocumentSink for GatedSink {
    async fn write_file(&self, path: &str, _data: &[u8]) -> Result<String> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(path.to_string())
    }
}

struct FailingSink;

impl DocumentSink for FailingSink {
    async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<String> {
        Err(PassError::storage("disk full"))
    }
}

#[tokio::test]
async fn test_export_writes_named_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = PassExporter::new(LocalStorage::new(temp_dir.path()), Rasterizer::new(2));
    let view = jane_view();

    let exported = exporter.export(&view).await.unwrap();

    assert_eq!(exported.file_name, "TEDx-Pass-Jane-Doe.pdf");
    assert!(exported.document.starts_with(b"%PDF"));
    assert_eq!(exported.snapshot.dimensions(), (340, 360));
    let saved = std::fs::read(temp_dir.path().join("TEDx-Pass-Jane-Doe.pdf")).unwrap();
    assert_eq!(saved, exported.document);
    assert!(!exporter.is_exporting());
}

#[tokio::test]
async fn test_sequential_exports_both_succeed() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = PassExporter::new(LocalStorage::new(temp_dir.path()), Rasterizer::new(1));
    let view = jane_view();

    let first = exporter.export(&view).await.unwrap();
    let second = exporter.export(&view).await.unwrap();

    assert_eq!(first.file_name, second.file_name);
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(exporter.download_label(), "Download Pass");
}

#[tokio::test]
async fn test_export_rejected_while_one_is_running() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let sink = GatedSink {
        entered: entered.clone(),
        release: release.clone(),
    };
    let exporter = Arc::new(PassExporter::new(sink, Rasterizer::new(1)));
    let view = jane_view();

    let running = {
        let exporter = exporter.clone();
        let view = view.clone();
        tokio::spawn(async move { exporter.export(&view).await })
    };
    entered.notified().await;

    assert!(exporter.is_exporting());
    assert_eq!(exporter.download_label(), "Generating...");
    let err = exporter.export(&view).await.unwrap_err();
    assert!(matches!(err, PassError::ExportInProgress));

    release.notify_one();
    let exported = running.await.unwrap().unwrap();
    assert_eq!(exported.location, "TEDx-Pass-Jane-Doe.pdf");
    assert!(!exporter.is_exporting());
}

#[tokio::test]
async fn test_failed_download_reports_notice_and_recovers() {
    let exporter = PassExporter::new(FailingSink, Rasterizer::new(1));
    let view = jane_view();

    let notice = exporter.download(&view).await.unwrap_err();

    assert_eq!(notice, Notice::download_failed());
    assert!(notice.is_error());
    assert!(!exporter.is_exporting());
    assert_eq!(exporter.download_label(), "Download Pass");
}

#[tokio::test]
async fn test_on_screen_pass_matches_export_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = PassExporter::new(LocalStorage::new(temp_dir.path()), Rasterizer::new(2));
    let view = jane_view();

    let shown = view.display(exporter.rasterizer());
    let exported = exporter.export(&view).await.unwrap();

    assert_eq!(shown, exported.snapshot);
}

#[tokio::test]
async fn test_document_carries_every_pass_field() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = PassExporter::new(LocalStorage::new(temp_dir.path()), Rasterizer::new(2));

    let exported = exporter.export(&jane_view()).await.unwrap();
    let (texts, painted) = page_contents(&exported.document);

    for expected in [
        "EVENT PASS",
        "p1",
        "TEDx Community Talk",
        "Ideas Change Everything",
        "ATTENDEE",
        "Jane Doe",
        "EMAIL",
        "j@x.com",
        "August 6, 2025 - 6:00 PM",
        "University Auditorium",
        "Student Community Event",
    ] {
        assert!(
            texts.iter().any(|text| text == expected),
            "missing {:?} in {:?}",
            expected,
            texts
        );
    }
    // logo and code pattern
    assert_eq!(painted, 2);
    assert_eq!(image_count(&exported.document), 2);
}

#[tokio::test]
async fn test_hostile_name_stays_inside_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("passes");
    let exporter = PassExporter::new(LocalStorage::new(&output_dir), Rasterizer::new(1));

    let exported = exporter
        .export(&view_for("a/../../../escaped"))
        .await
        .unwrap();

    assert!(!exported.file_name.contains('/'));
    let written = std::path::Path::new(&exported.location);
    assert_eq!(written.parent(), Some(output_dir.as_path()));
    assert!(written.exists());

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("passes")]);
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 1);
}
