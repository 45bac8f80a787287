//! Response rendering into temporary files.
//!
//! Each rendered response is written to its own `.txt` file in the temp
//! directory and handed to the platform's default viewer. Files are tracked
//! and deleted when the renderer is cleaned up or dropped.

use std::env;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::ApiResponse;

/// Content written when a response has neither a payload nor any text.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "Empty Response!";

const BANNER: &str = "/////////////////////////////////////////////////////";

/// Errors that can occur while rendering a response.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to create the temporary file.
    #[error("Failed to create temporary file: {0}")]
    TempFileCreation(#[source] io::Error),

    /// Failed to write the rendered content.
    #[error("Failed to write temporary file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Something that can show a file to the operator.
pub trait Viewer {
    fn view(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn view(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// Format a response for display.
///
/// The payload is pretty-printed as indented JSON. If there is no payload,
/// or it fails to serialize, the raw text is used, and failing that the
/// placeholder.
pub fn format_response<T: Serialize>(response: &ApiResponse<T>) -> String {
    let fallback = || {
        response
            .text
            .clone()
            .unwrap_or_else(|| EMPTY_RESPONSE_PLACEHOLDER.to_string())
    };

    match &response.payload {
        Some(payload) => serde_json::to_string_pretty(payload).unwrap_or_else(|e| {
            debug!("Payload serialization failed, using raw text: {}", e);
            fallback()
        }),
        None => fallback(),
    }
}

/// Writes responses to temp files and opens them.
pub struct ResponseRenderer<V: Viewer = SystemViewer> {
    viewer: V,
    temp_dir: PathBuf,
    /// The temporary files generated during the session.
    temporary_files: Vec<PathBuf>,
}

impl ResponseRenderer<SystemViewer> {
    /// A renderer using the system temp directory and default viewer.
    pub fn new() -> Self {
        Self::with_viewer(SystemViewer, env::temp_dir())
    }
}

impl Default for ResponseRenderer<SystemViewer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Viewer> ResponseRenderer<V> {
    pub fn with_viewer(viewer: V, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            viewer,
            temp_dir: temp_dir.into(),
            temporary_files: Vec::new(),
        }
    }

    /// Render an API response and open it.
    ///
    /// Prints a status banner to stdout and returns the path of the file.
    pub fn render<T: Serialize>(
        &mut self,
        description: &str,
        response: &ApiResponse<T>,
    ) -> Result<PathBuf, RenderError> {
        println!("{}", BANNER);
        println!(
            "{} Response with Status Code: {} ({})",
            description,
            response.status.as_u16(),
            response.reason_phrase()
        );
        println!("{}", BANNER);

        self.write_and_view(&format_response(response))
    }

    /// Render a failure that produced no response at all.
    pub fn render_failure(
        &mut self,
        description: &str,
        error: &dyn Display,
    ) -> Result<PathBuf, RenderError> {
        println!("{}", BANNER);
        println!("{} failed without a response: {}", description, error);
        println!("{}", BANNER);

        self.write_and_view(&error.to_string())
    }

    fn write_and_view(&mut self, content: &str) -> Result<PathBuf, RenderError> {
        let (mut file, path) = self.create_temp_file()?;

        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| RenderError::Write {
                path: path.clone(),
                source,
            })?;
        drop(file);

        if let Err(e) = self.viewer.view(&path) {
            warn!("Failed to open {:?} in the default viewer: {}", path, e);
            println!("Response written to {}", path.display());
        }

        Ok(path)
    }

    /// Create a randomly named `.txt` file and record it for cleanup.
    fn create_temp_file(&mut self) -> Result<(File, PathBuf), RenderError> {
        let (file, path) = tempfile::Builder::new()
            .prefix("issuetrak-")
            .suffix(".txt")
            .tempfile_in(&self.temp_dir)
            .and_then(|temp| temp.keep().map_err(|e| e.error))
            .map_err(RenderError::TempFileCreation)?;

        self.temporary_files.push(path.clone());
        Ok((file, path))
    }

    /// The files created so far.
    pub fn temporary_files(&self) -> &[PathBuf] {
        &self.temporary_files
    }

    /// Delete every temporary file that still exists.
    ///
    /// Failures are logged and do not stop the remaining deletions.
    pub fn cleanup(&mut self) {
        for path in self.temporary_files.drain(..) {
            if !path.exists() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Removed temporary file {:?}", path),
                Err(e) => warn!("Failed to clean up temporary file {:?}: {}", path, e),
            }
        }
    }
}

impl<V: Viewer> Drop for ResponseRenderer<V> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use reqwest::StatusCode;
    use serde::Serializer;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    use super::*;

    /// Records the paths it was asked to show.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingViewer {
        pub(crate) viewed: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl Viewer for RecordingViewer {
        fn view(&self, path: &Path) -> io::Result<()> {
            self.viewed.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct FailingViewer;

    impl Viewer for FailingViewer {
        fn view(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no handler"))
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn test_payload_is_indented_json_that_round_trips() {
        let payload = json!({
            "IssueNumber": 1,
            "Subject": "Printer on fire",
            "Notes": [{ "NoteID": 3, "NoteText": "Extinguisher applied" }]
        });
        let response = ApiResponse::new(StatusCode::OK, None, Some(payload.clone()));

        let rendered = format_response(&response);

        assert!(rendered.contains("\n  \"IssueNumber\": 1"));
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_payload_keeps_server_field_order() {
        let response = ApiResponse::from_body(
            StatusCode::OK,
            Some("application/json"),
            br#"{"Subject":"Printer on fire","IssueNumber":1,"AssignedTo":"jsmith"}"#,
        );

        let rendered = format_response(&response);

        let subject = rendered.find("\"Subject\"").unwrap();
        let number = rendered.find("\"IssueNumber\"").unwrap();
        let assigned = rendered.find("\"AssignedTo\"").unwrap();
        assert!(subject < number && number < assigned);
    }

    #[test]
    fn test_text_used_without_payload() {
        let response: ApiResponse =
            ApiResponse::new(StatusCode::BAD_REQUEST, Some("Bad thing".to_string()), None);
        assert_eq!(format_response(&response), "Bad thing");
    }

    #[test]
    fn test_placeholder_without_payload_or_text() {
        let response: ApiResponse = ApiResponse::new(StatusCode::NO_CONTENT, None, None);
        assert_eq!(format_response(&response), EMPTY_RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_serialization_failure_falls_back_to_text() {
        let response = ApiResponse::new(
            StatusCode::OK,
            Some("raw body".to_string()),
            Some(Unserializable),
        );
        assert_eq!(format_response(&response), "raw body");
    }

    #[test]
    fn test_serialization_failure_without_text_uses_placeholder() {
        let response = ApiResponse::new(StatusCode::OK, None, Some(Unserializable));
        assert_eq!(format_response(&response), EMPTY_RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_render_writes_txt_file_and_views_it() {
        let dir = tempdir().unwrap();
        let viewer = RecordingViewer::default();
        let mut renderer = ResponseRenderer::with_viewer(viewer.clone(), dir.path());

        let response = ApiResponse::new(StatusCode::OK, None, Some(json!({ "CauseID": 5 })));
        let path = renderer.render("GetCauseForCauseID", &response).unwrap();

        assert_eq!(path.extension().unwrap(), "txt");
        assert!(path.starts_with(dir.path()));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"CauseID\": 5\n}");
        assert_eq!(*viewer.viewed.borrow(), vec![path.clone()]);
        assert_eq!(renderer.temporary_files(), &[path]);
    }

    #[test]
    fn test_each_render_gets_a_unique_file() {
        let dir = tempdir().unwrap();
        let mut renderer = ResponseRenderer::with_viewer(RecordingViewer::default(), dir.path());
        let response: ApiResponse = ApiResponse::new(StatusCode::OK, None, None);

        let first = renderer.render("a", &response).unwrap();
        let second = renderer.render("b", &response).unwrap();

        assert_ne!(first, second);
        assert_eq!(renderer.temporary_files().len(), 2);
    }

    #[test]
    fn test_viewer_failure_is_not_fatal() {
        let dir = tempdir().unwrap();
        let mut renderer = ResponseRenderer::with_viewer(FailingViewer, dir.path());
        let response: ApiResponse = ApiResponse::new(StatusCode::OK, None, None);

        let path = renderer.render("GetAllCauses", &response).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_failure_writes_error_text() {
        let dir = tempdir().unwrap();
        let mut renderer = ResponseRenderer::with_viewer(RecordingViewer::default(), dir.path());

        let path = renderer
            .render_failure("GetAllUsers", &"Network error: connection refused")
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn test_cleanup_removes_all_files() {
        let dir = tempdir().unwrap();
        let mut renderer = ResponseRenderer::with_viewer(RecordingViewer::default(), dir.path());
        let response: ApiResponse = ApiResponse::new(StatusCode::OK, None, None);

        let first = renderer.render("a", &response).unwrap();
        let second = renderer.render("b", &response).unwrap();
        std::fs::remove_file(&first).unwrap();

        renderer.cleanup();

        assert!(!first.exists());
        assert!(!second.exists());
        assert!(renderer.temporary_files().is_empty());
    }

    #[test]
    fn test_drop_removes_files() {
        let dir = tempdir().unwrap();
        let path = {
            let mut renderer =
                ResponseRenderer::with_viewer(RecordingViewer::default(), dir.path());
            let response: ApiResponse = ApiResponse::new(StatusCode::OK, None, None);
            renderer.render("a", &response).unwrap()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_missing_temp_dir_is_creation_error() {
        let dir = tempdir().unwrap();
        let mut renderer =
            ResponseRenderer::with_viewer(RecordingViewer::default(), dir.path().join("gone"));
        let response: ApiResponse = ApiResponse::new(StatusCode::OK, None, None);

        let result = renderer.render("a", &response);
        assert!(matches!(result, Err(RenderError::TempFileCreation(_))));
        assert!(renderer.temporary_files().is_empty());
    }
}
