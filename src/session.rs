use std::rc::Rc;

use yew::Reducible;

use crate::download::download_filename;
use crate::error::{AppError, Stage};
use crate::prompts::{next_loading_index, RealismLevel, LOADING_MESSAGES};

/// Which full-screen view is showing. The info modal overlays either one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Form,
    Cropping,
}

/// All interactive state of one page session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub upload_seq: u64,
    pub file_name: Option<String>,
    /// Image shown in the crop tool, awaiting Apply or Cancel.
    pub pending_crop: Option<String>,
    pub original: Option<String>,
    pub prompt: String,
    pub level: RealismLevel,
    pub generated: Option<String>,
    pub generating: bool,
    pub enhancing: bool,
    pub error: Option<String>,
    pub info_open: bool,
    pub loading_index: usize,
}

/// Inputs captured when a generation starts.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationJob {
    pub image: String,
    pub prompt: String,
    pub level: RealismLevel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    UploadStarted { seq: u64, file_name: String },
    UploadLoaded { seq: u64, data_url: String },
    UploadFailed { seq: u64, error: AppError },
    ApplyCrop(String),
    CropFailed(AppError),
    CancelCrop,
    Recrop,
    SetPrompt(String),
    SetLevel(RealismLevel),
    GenerationStarted,
    GenerationFinished(Result<String, AppError>),
    EnhanceStarted,
    EnhanceFinished(Result<String, AppError>),
    LoadingTick,
    ShowInfo(bool),
}

impl Session {
    pub fn mode(&self) -> ViewMode {
        if self.pending_crop.is_some() && self.original.is_some() {
            ViewMode::Cropping
        } else {
            ViewMode::Form
        }
    }

    pub fn can_generate(&self) -> bool {
        self.original.is_some() && !self.prompt.is_empty() && !self.generating
    }

    pub fn can_enhance(&self) -> bool {
        !self.prompt.is_empty() && !self.enhancing
    }

    pub fn generation_job(&self) -> Option<GenerationJob> {
        if !self.can_generate() {
            return None;
        }
        Some(GenerationJob {
            image: self.original.clone()?,
            prompt: self.prompt.clone(),
            level: self.level,
        })
    }

    pub fn loading_message(&self) -> &'static str {
        LOADING_MESSAGES[self.loading_index % LOADING_MESSAGES.len()]
    }

    pub fn download_filename(&self) -> String {
        download_filename(self.file_name.as_deref())
    }

    pub fn can_download(&self) -> bool {
        self.generated.is_some() && !self.generating
    }

    /// Applies one transition; returns false when the action was ignored.
    pub fn apply(&mut self, action: SessionAction) -> bool {
        match action {
            SessionAction::UploadStarted { seq, file_name } => {
                self.upload_seq = seq;
                self.file_name = Some(file_name);
                self.generated = None;
                self.error = None;
                self.original = None;
                self.pending_crop = None;
            }
            SessionAction::UploadLoaded { seq, data_url } => {
                if seq != self.upload_seq {
                    return false;
                }
                // Cropping is optional: the raw upload is usable as-is.
                self.original = Some(data_url.clone());
                self.pending_crop = Some(data_url);
            }
            SessionAction::UploadFailed { seq, error } => {
                if seq != self.upload_seq {
                    return false;
                }
                self.error = Some(error.banner(Stage::Upload));
            }
            SessionAction::ApplyCrop(data_url) => {
                self.original = Some(data_url);
                self.pending_crop = None;
            }
            SessionAction::CropFailed(error) => {
                self.error = Some(error.banner(Stage::Crop));
            }
            SessionAction::CancelCrop => {
                self.pending_crop = None;
            }
            SessionAction::Recrop => {
                if self.original.is_none() {
                    return false;
                }
                self.pending_crop = self.original.clone();
            }
            SessionAction::SetPrompt(prompt) => {
                self.prompt = prompt;
            }
            SessionAction::SetLevel(level) => {
                self.level = level;
            }
            SessionAction::GenerationStarted => {
                if !self.can_generate() {
                    return false;
                }
                self.generating = true;
                self.error = None;
                self.generated = None;
                self.loading_index = 0;
            }
            SessionAction::GenerationFinished(result) => {
                self.generating = false;
                self.loading_index = 0;
                match result {
                    Ok(url) => self.generated = Some(url),
                    Err(error) => self.error = Some(error.banner(Stage::Generate)),
                }
            }
            SessionAction::EnhanceStarted => {
                if !self.can_enhance() {
                    return false;
                }
                self.enhancing = true;
                self.error = None;
            }
            SessionAction::EnhanceFinished(result) => {
                self.enhancing = false;
                match result {
                    // Replaces whatever is in the field now, including edits
                    // made while the request was running.
                    Ok(text) => self.prompt = text,
                    Err(error) => self.error = Some(error.banner(Stage::Enhance)),
                }
            }
            SessionAction::LoadingTick => {
                if !self.generating {
                    return false;
                }
                self.loading_index = next_loading_index(self.loading_index);
            }
            SessionAction::ShowInfo(open) => {
                self.info_open = open;
            }
        }
        true
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &str = "data:image/jpeg;base64,/9j/4AAQ";
    const CROPPED: &str = "data:image/png;base64,iVBORw0K";

    fn run(session: &mut Session, actions: Vec<SessionAction>) {
        for action in actions {
            session.apply(action);
        }
    }

    fn uploaded(name: &str) -> Session {
        let mut s = Session::default();
        run(
            &mut s,
            vec![
                SessionAction::UploadStarted { seq: 1, file_name: name.into() },
                SessionAction::UploadLoaded { seq: 1, data_url: JPEG.into() },
            ],
        );
        s
    }

    #[test]
    fn fresh_session_defaults() {
        let s = Session::default();
        assert_eq!(s.level, RealismLevel::Ultra);
        assert_eq!(s.mode(), ViewMode::Form);
        assert!(!s.can_generate());
        assert_eq!(s.loading_message(), LOADING_MESSAGES[0]);
    }

    #[test]
    fn upload_enters_cropping_once_loaded() {
        let mut s = Session::default();
        s.apply(SessionAction::UploadStarted { seq: 1, file_name: "photo.jpg".into() });
        assert_eq!(s.mode(), ViewMode::Form);
        s.apply(SessionAction::UploadLoaded { seq: 1, data_url: JPEG.into() });
        assert_eq!(s.mode(), ViewMode::Cropping);
        assert_eq!(s.original.as_deref(), Some(JPEG));
    }

    #[test]
    fn new_upload_clears_result_and_error() {
        let mut s = uploaded("a.png");
        run(
            &mut s,
            vec![
                SessionAction::CancelCrop,
                SessionAction::SetPrompt("sky".into()),
                SessionAction::GenerationStarted,
                SessionAction::GenerationFinished(Ok(CROPPED.into())),
            ],
        );
        s.error = Some("old".into());
        s.apply(SessionAction::UploadStarted { seq: 2, file_name: "b.png".into() });
        assert_eq!(s.generated, None);
        assert_eq!(s.error, None);
        assert_eq!(s.original, None);
        assert_eq!(s.prompt, "sky");
    }

    #[test]
    fn stale_upload_completion_is_ignored() {
        let mut s = Session::default();
        s.apply(SessionAction::UploadStarted { seq: 1, file_name: "old.png".into() });
        s.apply(SessionAction::UploadStarted { seq: 2, file_name: "new.png".into() });
        assert!(!s.apply(SessionAction::UploadLoaded { seq: 1, data_url: JPEG.into() }));
        assert_eq!(s.original, None);
    }

    #[test]
    fn apply_crop_replaces_original_and_returns_to_form() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::ApplyCrop(CROPPED.into()));
        assert_eq!(s.mode(), ViewMode::Form);
        assert_eq!(s.original.as_deref(), Some(CROPPED));
    }

    #[test]
    fn cancel_crop_keeps_existing_original() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::CancelCrop);
        assert_eq!(s.mode(), ViewMode::Form);
        assert_eq!(s.original.as_deref(), Some(JPEG));
    }

    #[test]
    fn recrop_uses_current_original() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::ApplyCrop(CROPPED.into()));
        s.apply(SessionAction::Recrop);
        assert_eq!(s.mode(), ViewMode::Cropping);
        assert_eq!(s.pending_crop.as_deref(), Some(CROPPED));

        let mut empty = Session::default();
        assert!(!empty.apply(SessionAction::Recrop));
    }

    #[test]
    fn crop_failure_shows_generic_message_and_stays_in_cropper() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::CropFailed(AppError::RenderContext("x".into())));
        assert_eq!(s.error.as_deref(), Some("Could not crop the image. Please try again."));
        assert_eq!(s.mode(), ViewMode::Cropping);
    }

    #[test]
    fn generate_enabled_only_with_image_prompt_and_idle() {
        let mut s = Session::default();
        s.apply(SessionAction::SetPrompt("a beach".into()));
        assert!(!s.can_generate(), "no image");

        let mut s = uploaded("photo.jpg");
        assert!(!s.can_generate(), "empty prompt");
        s.apply(SessionAction::SetPrompt("a beach".into()));
        assert!(s.can_generate());
        s.apply(SessionAction::GenerationStarted);
        assert!(!s.can_generate(), "in flight");
        assert_eq!(s.generation_job(), None);
    }

    #[test]
    fn generate_with_empty_prompt_changes_nothing() {
        let mut s = uploaded("photo.jpg");
        let before = s.clone();
        assert_eq!(s.generation_job(), None);
        assert!(!s.apply(SessionAction::GenerationStarted));
        assert_eq!(s, before);
    }

    #[test]
    fn successful_generation_scenario() {
        let mut s = uploaded("photo.jpg");
        run(
            &mut s,
            vec![
                SessionAction::ApplyCrop(CROPPED.into()),
                SessionAction::SetPrompt("a beach at sunset".into()),
                SessionAction::SetLevel(RealismLevel::Standard),
            ],
        );
        let job = s.generation_job().unwrap();
        assert_eq!(job.image, CROPPED);
        assert_eq!(job.level, RealismLevel::Standard);

        s.error = Some("previous".into());
        s.apply(SessionAction::GenerationStarted);
        assert!(s.generating);
        assert_eq!(s.error, None);
        assert!(!s.can_download());

        s.apply(SessionAction::GenerationFinished(Ok("data:image/png;base64,NEW".into())));
        assert!(!s.generating);
        assert!(s.generated.as_deref().unwrap().starts_with("data:image/png;base64,"));
        assert!(s.can_download());
        assert_eq!(s.download_filename(), "photo_background_changed.png");
    }

    #[test]
    fn missing_image_response_ends_loading_with_message() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::SetPrompt("a beach".into()));
        s.apply(SessionAction::GenerationStarted);
        s.apply(SessionAction::GenerationFinished(Err(AppError::NoImageReturned)));
        assert!(!s.generating);
        assert_eq!(s.generated, None);
        assert_eq!(
            s.error.as_deref(),
            Some("Error: The AI did not return an image. Please try a different prompt or image.")
        );
    }

    #[test]
    fn switching_level_keeps_prompt() {
        let mut s = Session::default();
        s.apply(SessionAction::SetPrompt("mountains".into()));
        for level in RealismLevel::ALL {
            s.apply(SessionAction::SetLevel(level));
            assert_eq!(s.prompt, "mountains");
        }
    }

    #[test]
    fn enhancement_overwrites_prompt_even_if_edited() {
        let mut s = Session::default();
        s.apply(SessionAction::SetPrompt("a forest".into()));
        assert!(s.apply(SessionAction::EnhanceStarted));
        assert!(!s.can_enhance());
        s.apply(SessionAction::SetPrompt("a forest with a river".into()));
        s.apply(SessionAction::EnhanceFinished(Ok("A dense misty forest at dawn.".into())));
        assert_eq!(s.prompt, "A dense misty forest at dawn.");
        assert!(!s.enhancing);
    }

    #[test]
    fn enhancement_failure_only_sets_error() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::SetPrompt("a forest".into()));
        s.apply(SessionAction::EnhanceStarted);
        s.apply(SessionAction::EnhanceFinished(Err(AppError::service("boom"))));
        assert_eq!(s.prompt, "a forest");
        assert_eq!(s.original.as_deref(), Some(JPEG));
        assert_eq!(s.error.as_deref(), Some("Error getting ideas: boom"));
    }

    #[test]
    fn enhancement_and_generation_can_overlap() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::SetPrompt("a forest".into()));
        assert!(s.apply(SessionAction::GenerationStarted));
        assert!(s.apply(SessionAction::EnhanceStarted));
        assert!(s.generating && s.enhancing);
    }

    #[test]
    fn loading_caption_rotates_and_resets() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::SetPrompt("x".into()));
        assert!(!s.apply(SessionAction::LoadingTick), "idle ticks are ignored");
        s.apply(SessionAction::GenerationStarted);
        s.apply(SessionAction::LoadingTick);
        s.apply(SessionAction::LoadingTick);
        assert_eq!(s.loading_message(), LOADING_MESSAGES[2]);
        s.apply(SessionAction::GenerationFinished(Err(AppError::service("x"))));
        assert_eq!(s.loading_message(), LOADING_MESSAGES[0]);
        s.apply(SessionAction::GenerationStarted);
        assert_eq!(s.loading_index, 0);
    }

    #[test]
    fn info_modal_is_independent_of_mode() {
        let mut s = uploaded("photo.jpg");
        s.apply(SessionAction::ShowInfo(true));
        assert!(s.info_open);
        assert_eq!(s.mode(), ViewMode::Cropping);
        s.apply(SessionAction::ShowInfo(false));
        assert!(!s.info_open);
    }

    #[test]
    fn reducer_keeps_same_rc_when_ignored() {
        let s = Rc::new(Session::default());
        let next = s.clone().reduce(SessionAction::LoadingTick);
        assert!(Rc::ptr_eq(&s, &next));
    }
}
