use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use qureplus_common::models::{
    AnalysisResult, FieldErrors, ImageUpload, NewAnalysis, UserForm, UserRecord,
};
use qureplus_common::traits::{ImageAnalyzer, LeadRepository};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::Error;
use crate::intake::state::{ImagePreview, IntakeState, IntakeStep, IntakeView, ResultView};
use crate::repositories::supabase::storage::MAX_IMAGE_BYTES;
use crate::validation::validate_user_form;

/// Drives one visitor through form → upload → results.
///
/// State sits behind a sync mutex that is never held across an `.await`.
/// Submitting and analysing each have a busy flag; a second request while
/// one is outstanding is rejected with [`Error::Busy`].
pub struct IntakeController {
    repo: Option<Arc<dyn LeadRepository>>,
    analyzer: Arc<dyn ImageAnalyzer>,
    state: Mutex<IntakeState>,
    submitting: AtomicBool,
    analyzing: AtomicBool,
    last_active: Mutex<Instant>,
    pending_save: Mutex<Option<JoinHandle<()>>>,
}

/// Holds a busy flag for the duration of one operation.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool, what: &str) -> Result<Self, Error> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy(what.to_string()))?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IntakeController {
    pub fn new(repo: Option<Arc<dyn LeadRepository>>, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self {
            repo,
            analyzer,
            state: Mutex::new(IntakeState::default()),
            submitting: AtomicBool::new(false),
            analyzing: AtomicBool::new(false),
            last_active: Mutex::new(Instant::now()),
            pending_save: Mutex::new(None),
        }
    }

    fn repo(&self) -> Result<&Arc<dyn LeadRepository>, Error> {
        self.repo
            .as_ref()
            .ok_or_else(|| Error::BackendUnavailable("Database not configured".into()))
    }

    fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().elapsed()
    }

    pub fn step(&self) -> IntakeStep {
        self.state.lock().step
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::Acquire)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Analyze is only offered in the upload step, with an image, while idle.
    pub fn can_analyze(&self) -> bool {
        let st = self.state.lock();
        st.step == IntakeStep::Upload && st.image.is_some() && !self.is_analyzing()
    }

    pub fn view(&self) -> IntakeView {
        let st = self.state.lock();
        let is_analyzing = self.is_analyzing();
        IntakeView {
            step: st.step,
            user: st.user.clone(),
            image: st.image.as_ref().map(ImagePreview::from),
            result: st.result.as_ref().map(ResultView::from),
            can_analyze: st.step == IntakeStep::Upload && st.image.is_some() && !is_analyzing,
            is_submitting: self.is_submitting(),
            is_analyzing,
            field_errors: st.field_errors.clone(),
            error: st.last_error.clone(),
        }
    }

    /// Validates the form and stores the user. Only on success does the
    /// intake move to the upload step.
    pub async fn submit_form(&self, form: UserForm) -> Result<UserRecord, Error> {
        self.touch();
        let _busy = BusyGuard::acquire(&self.submitting, "form submission")?;

        let validated = validate_user_form(&form);
        let generation = {
            let mut st = self.state.lock();
            if st.step != IntakeStep::Form {
                return Err(Error::InvalidState(format!(
                    "form already submitted (step={:?})",
                    st.step
                )));
            }
            st.last_error = None;
            st.field_errors = match &validated {
                Ok(_) => FieldErrors::new(),
                Err(errors) => errors.clone(),
            };
            st.generation
        };

        let new_user = validated.map_err(|errors| {
            debug!("Form rejected: {}", errors);
            Error::Validation(errors)
        })?;

        let saved = match self.repo() {
            Ok(repo) => repo.create_user(&new_user).await,
            Err(e) => Err(e),
        };

        let mut st = self.state.lock();
        match saved {
            Ok(user) => {
                if st.generation != generation {
                    warn!("Intake was reset while saving user {}; discarding", user.id);
                    return Err(Error::InvalidState("intake was reset".into()));
                }
                info!("User saved successfully: {}", user.id);
                st.user = Some(user.clone());
                st.step = IntakeStep::Upload;
                Ok(user)
            }
            Err(e) => {
                error!("Error saving user data: {}", e);
                if st.generation != generation {
                    return Err(e);
                }
                st.last_error = Some(format!(
                    "Failed to save user information: {e}. Please check your internet connection and try again."
                ));
                Err(e)
            }
        }
    }

    /// Selects (or replaces) the image. Non-images are rejected and leave the
    /// current selection untouched.
    pub fn select_image(&self, image: ImageUpload) -> Result<(), Error> {
        self.touch();
        let mut st = self.state.lock();
        if self.is_analyzing() {
            return Err(Error::Busy("analysis".into()));
        }
        if st.step != IntakeStep::Upload {
            return Err(Error::InvalidState(format!(
                "images can only be selected in the upload step (step={:?})",
                st.step
            )));
        }
        if !image.is_image() {
            return Err(Error::UnsupportedImage(image.content_type.clone()));
        }
        if image.len() as u64 > MAX_IMAGE_BYTES {
            return Err(Error::ImageTooLarge(image.len()));
        }
        debug!("Image selected: {} ({} bytes)", image.file_name, image.len());
        st.image = Some(image);
        st.result = None;
        st.last_error = None;
        Ok(())
    }

    pub fn remove_image(&self) -> Result<(), Error> {
        self.touch();
        let mut st = self.state.lock();
        if self.is_analyzing() {
            return Err(Error::Busy("analysis".into()));
        }
        if st.step != IntakeStep::Upload {
            return Err(Error::InvalidState(format!(
                "no image to remove (step={:?})",
                st.step
            )));
        }
        st.image = None;
        st.result = None;
        Ok(())
    }

    /// Runs the analysis and moves to results. The analysis record is stored
    /// in a background task; a failure there is logged and the result stands.
    pub async fn analyze(&self) -> Result<AnalysisResult, Error> {
        self.touch();
        let _busy = BusyGuard::acquire(&self.analyzing, "analysis")?;

        let (image, user, generation) = {
            let st = self.state.lock();
            if st.step != IntakeStep::Upload {
                return Err(Error::InvalidState(format!(
                    "analysis requires the upload step (step={:?})",
                    st.step
                )));
            }
            let image = st
                .image
                .clone()
                .ok_or_else(|| Error::InvalidState("no image selected".into()))?;
            (image, st.user.clone(), st.generation)
        };

        let result = self.analyzer.analyze_image(&image).await;

        {
            let mut st = self.state.lock();
            if st.generation != generation {
                warn!("Intake was reset during analysis; discarding result");
                return Err(Error::InvalidState("intake was reset".into()));
            }
            st.result = Some(result.clone());
            st.step = IntakeStep::Results;
        }

        match user {
            Some(user) => self.spawn_save(user, result.clone(), image),
            None => warn!("No user on intake; analysis not saved"),
        }

        Ok(result)
    }

    fn spawn_save(&self, user: UserRecord, result: AnalysisResult, image: ImageUpload) {
        let repo = match self.repo() {
            Ok(repo) => repo.clone(),
            Err(e) => {
                warn!("Analysis completed but failed to save to database: {}", e);
                return;
            }
        };
        let handle = tokio::spawn(async move {
            debug!("Saving analysis record for user: {}", user.id);
            match repo
                .create_analysis(&NewAnalysis::from_result(user.id, &result), Some(&image))
                .await
            {
                Ok(record) => info!("Analysis record saved successfully: {}", record.id),
                Err(e) => {
                    error!("Error saving analysis record: {}", e);
                    warn!("Analysis completed but failed to save to database");
                }
            }
        });
        *self.pending_save.lock() = Some(handle);
    }

    /// Waits for the most recent background save, if one is still running.
    pub async fn wait_for_save(&self) {
        let handle = self.pending_save.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Analysis save task failed: {}", e);
            }
        }
    }

    /// Clears everything and returns to the form step.
    pub fn reset(&self) {
        self.touch();
        self.state.lock().reset();
    }
}
