//! Interaction state machine for the classification workflow.
//!
//! [`ClassifierSession`] owns all client-side state: the selected file,
//! its decoded preview, the shot configuration, and the lifecycle of the
//! current lookup request. It is UI-agnostic; the egui front end and the
//! CLI both drive it through the same operations.
//!
//! # Request lifecycle
//!
//! ```text
//! NoFile -> FileSelected -> Loading -> Succeeded | Failed
//!            ^                            |          |
//!            |        retry() ------------+----------+
//!            +------- reset() (from any state)
//! ```
//!
//! Each selection carries a generation number. Outgoing requests are
//! tagged with it, and a response whose tag no longer matches the current
//! generation is discarded, so a slow response for a replaced file can
//! never overwrite fresher state.

use crate::error::Result;
use crate::prediction::{PredictionResult, ShotCount};
use image::DynamicImage;

/// The user's currently selected file and its decoded preview.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pub file_name: String,
    pub size_bytes: u64,
    pub media_type: Option<String>,
    /// Decoded preview image. Decoding is asynchronous and best-effort;
    /// this stays `None` if it fails.
    pub preview: Option<DynamicImage>,
}

impl Selection {
    /// File name with only its final extension removed.
    ///
    /// `tile_042.png` -> `tile_042`, `archive.tar.gz` -> `archive.tar`,
    /// and a name with no extension passes through unchanged.
    pub fn base_name(&self) -> &str {
        base_name(&self.file_name)
    }
}

/// Strips the final dot-delimited suffix from a file name, if present.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i + 1 < file_name.len() && !file_name[i + 1..].contains('/') => &file_name[..i],
        _ => file_name,
    }
}

/// Lifecycle of the current lookup request.
///
/// A tagged enum rather than separate flags: a result and an error can
/// never be populated at the same time.
#[derive(Clone, Debug, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a completed outcome (result or error) is on display,
    /// which is what makes retry available.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// An outgoing lookup request, tagged with the selection generation it
/// was issued against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifyRequest {
    pub generation: u64,
    pub base_name: String,
    pub shots: ShotCount,
}

/// Client-side state for the classification page.
#[derive(Debug, Default)]
pub struct ClassifierSession {
    selection: Option<Selection>,
    generation: u64,
    shots: ShotCount,
    request: RequestState,
}

impl ClassifierSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn shots(&self) -> ShotCount {
        self.shots
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    /// Generation of the current selection. Bumped on every
    /// `select_file` and `reset`, orphaning any in-flight request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the selection wholesale and clears any prior result or
    /// error. Returns the new generation so the caller can tag the
    /// asynchronous preview decode.
    pub fn select_file(
        &mut self,
        file_name: impl Into<String>,
        size_bytes: u64,
        media_type: Option<String>,
    ) -> u64 {
        self.generation += 1;
        self.selection = Some(Selection {
            file_name: file_name.into(),
            size_bytes,
            media_type,
            preview: None,
        });
        self.request = RequestState::Idle;
        self.generation
    }

    /// Attaches a decoded preview to the selection it was decoded for.
    /// Ignored if a newer selection has replaced it in the meantime.
    pub fn set_preview(&mut self, generation: u64, preview: DynamicImage) {
        if generation != self.generation {
            return;
        }
        if let Some(selection) = &mut self.selection {
            selection.preview = Some(preview);
        }
    }

    /// Updates the shot configuration. Pure state change: never triggers
    /// a fetch, legal in any state, and survives `reset`.
    pub fn set_shots(&mut self, shots: ShotCount) {
        self.shots = shots;
    }

    /// Starts a lookup for the current selection.
    ///
    /// Returns `None` (no state change) when no file is selected, or when
    /// a request is already in flight: a second classify while loading is
    /// ignored to keep at most one request outstanding.
    pub fn begin_classify(&mut self) -> Option<ClassifyRequest> {
        if self.request.is_loading() {
            return None;
        }
        let selection = self.selection.as_ref()?;
        let request = ClassifyRequest {
            generation: self.generation,
            base_name: selection.base_name().to_string(),
            shots: self.shots,
        };
        self.request = RequestState::Loading;
        Some(request)
    }

    /// Re-issues the lookup after a completed outcome. Only legal once a
    /// result or error is on display.
    pub fn retry(&mut self) -> Option<ClassifyRequest> {
        if !self.request.is_settled() {
            return None;
        }
        self.begin_classify()
    }

    /// Records a successful response, unless its generation tag shows it
    /// belongs to a superseded selection.
    pub fn apply_success(&mut self, generation: u64, result: PredictionResult) {
        if generation != self.generation {
            return;
        }
        self.request = RequestState::Succeeded(result);
    }

    /// Records a failed response, with the same staleness guard.
    pub fn apply_failure(&mut self, generation: u64, message: impl Into<String>) {
        if generation != self.generation {
            return;
        }
        self.request = RequestState::Failed(message.into());
    }

    /// Convenience for the worker thread: applies a fetch outcome.
    pub fn apply_outcome(&mut self, generation: u64, outcome: Result<PredictionResult>) {
        match outcome {
            Ok(result) => self.apply_success(generation, result),
            Err(e) => self.apply_failure(generation, e.user_message()),
        }
    }

    /// Clears the selection, preview, and request state. The shot
    /// configuration is preserved so the user need not reselect it.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.selection = None;
        self.request = RequestState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn sample_result() -> PredictionResult {
        PredictionResult {
            filename: "tile_042".to_string(),
            split: "test".to_string(),
            true_class: "Forest".to_string(),
            predicted_class: "Forest".to_string(),
            correct: true,
            confidence: 0.95,
            shot: 5,
            way: 5,
            iteration: 12,
        }
    }

    #[test]
    fn base_name_strips_only_final_extension() {
        assert_eq!(base_name("tile_042.png"), "tile_042");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("README"), "README");
        assert_eq!(base_name("trailing."), "trailing.");
    }

    #[test]
    fn classify_is_noop_without_file() {
        let mut session = ClassifierSession::new();
        assert!(session.begin_classify().is_none());
        assert!(matches!(session.request(), RequestState::Idle));
    }

    #[test]
    fn classify_carries_base_name_and_shots() {
        let mut session = ClassifierSession::new();
        session.set_shots(ShotCount::One);
        session.select_file("tile_042.png", 1024, Some("image/png".to_string()));

        let request = session.begin_classify().unwrap();
        assert_eq!(request.base_name, "tile_042");
        assert_eq!(request.shots, ShotCount::One);
        assert!(session.request().is_loading());
    }

    #[test]
    fn second_classify_while_loading_is_ignored() {
        let mut session = ClassifierSession::new();
        session.select_file("tile_042.png", 1024, None);
        assert!(session.begin_classify().is_some());
        assert!(session.begin_classify().is_none());
    }

    #[test]
    fn reset_clears_everything_but_shots() {
        let mut session = ClassifierSession::new();
        session.set_shots(ShotCount::One);
        let generation = session.select_file("tile_042.png", 1024, None);
        session.set_preview(generation, DynamicImage::new_rgb8(2, 2));
        session.begin_classify();
        session.apply_success(generation, sample_result());

        session.reset();

        assert!(session.selection().is_none());
        assert!(matches!(session.request(), RequestState::Idle));
        assert_eq!(session.shots(), ShotCount::One);
    }

    #[test]
    fn select_file_clears_prior_outcome() {
        let mut session = ClassifierSession::new();
        let generation = session.select_file("a.png", 10, None);
        session.begin_classify();
        session.apply_failure(generation, "nope");
        assert!(session.request().is_settled());

        session.select_file("b.png", 20, None);
        assert!(matches!(session.request(), RequestState::Idle));
    }

    #[test]
    fn stale_response_is_discarded_after_new_selection() {
        let mut session = ClassifierSession::new();
        session.select_file("a.png", 10, None);
        let request = session.begin_classify().unwrap();

        // New file picked while the first request is still in flight.
        session.select_file("b.png", 20, None);

        session.apply_success(request.generation, sample_result());
        assert!(
            matches!(session.request(), RequestState::Idle),
            "response for the old selection must not land"
        );
    }

    #[test]
    fn stale_response_is_discarded_after_reset() {
        let mut session = ClassifierSession::new();
        session.select_file("a.png", 10, None);
        let request = session.begin_classify().unwrap();

        session.reset();
        session.apply_failure(request.generation, "late failure");

        assert!(matches!(session.request(), RequestState::Idle));
    }

    #[test]
    fn stale_preview_is_discarded() {
        let mut session = ClassifierSession::new();
        let old_generation = session.select_file("a.png", 10, None);
        session.select_file("b.png", 20, None);

        session.set_preview(old_generation, DynamicImage::new_rgb8(2, 2));
        assert!(session.selection().unwrap().preview.is_none());
    }

    #[test]
    fn retry_requires_settled_outcome() {
        let mut session = ClassifierSession::new();
        session.select_file("tile_042.png", 1024, None);
        assert!(session.retry().is_none(), "nothing to retry yet");

        let request = session.begin_classify().unwrap();
        assert!(session.retry().is_none(), "no retry while loading");

        session.apply_outcome(request.generation, Err(AppError::lookup("404")));
        let retried = session.retry().unwrap();
        assert_eq!(retried.base_name, request.base_name);
        assert_eq!(retried.shots, request.shots);
    }

    #[test]
    fn outcome_failure_uses_user_message() {
        let mut session = ClassifierSession::new();
        let generation = session.select_file("tile_042.png", 1024, None);
        session.begin_classify();
        session.apply_outcome(generation, Err(AppError::parse("bad json")));

        match session.request() {
            RequestState::Failed(message) => {
                assert_eq!(message, crate::error::LOOKUP_FAILED_MESSAGE);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
