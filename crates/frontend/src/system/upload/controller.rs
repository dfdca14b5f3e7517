use async_trait::async_trait;
use contracts::system::upload::{UploadHistoryItem, UploadHistoryResponse, UploadResult};
use std::cell::RefCell;
use std::rc::Rc;

use crate::shared::api_client::{decode, ApiFailure};
use crate::shared::config::UploadConfig;
use crate::shared::errors::{classify, ErrorKind};
use crate::shared::validators::{is_valid_file_extension, is_valid_file_size};
use crate::system::auth::identity::IdentityProvider;

pub const UPLOAD_PATH: &str = "/dashboard/upload/upload/";
pub const HISTORY_PATH: &str = "/dashboard/upload/history/";

/// Where uploads go. `File` is whatever the platform hands out for a picked file.
#[async_trait(?Send)]
pub trait UploadTransport {
    type File;

    async fn upload(
        &self,
        file: &Self::File,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure>;

    async fn history(&self, token: Option<&str>) -> Result<serde_json::Value, ApiFailure>;
}

/// A picked file together with what validation needs to know about it.
pub struct SelectedFile<F> {
    pub name: String,
    pub size_bytes: u64,
    pub handle: F,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Please select a file to upload.")]
    NoFile,
    #[error("Only Excel or CSV files can be uploaded ({allowed}).")]
    UnsupportedExtension { file_name: String, allowed: String },
    #[error("{file_name} is larger than {max_mb} MB.")]
    TooLarge { file_name: String, max_mb: u32 },
    #[error("An upload is already in progress.")]
    Busy,
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadState {
    /// Name and size of the file waiting to be uploaded
    pub selected: Option<(String, u64)>,
    pub uploading: bool,
    pub result: Option<UploadResult>,
    pub error: Option<String>,
    pub history: Vec<UploadHistoryItem>,
}

type Listener = Rc<dyn Fn(&UploadState)>;

/// State and actions of the upload page.
pub struct UploadController<T: UploadTransport> {
    transport: Rc<T>,
    identity: Rc<dyn IdentityProvider>,
    config: UploadConfig,
    state: RefCell<UploadState>,
    file: RefCell<Option<T::File>>,
    listeners: RefCell<Vec<Listener>>,
}

impl<T: UploadTransport> UploadController<T> {
    pub fn new(transport: Rc<T>, identity: Rc<dyn IdentityProvider>, config: UploadConfig) -> Self {
        Self {
            transport,
            identity,
            config,
            state: RefCell::new(UploadState::default()),
            file: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&UploadState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn update(&self, change: impl FnOnce(&mut UploadState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            change(&mut state);
            state.clone()
        };
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn validate(&self, name: &str, size_bytes: u64) -> Result<(), UploadError> {
        if !is_valid_file_extension(name, &self.config.allowed_extensions) {
            let allowed = self
                .config
                .allowed_extensions
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(UploadError::UnsupportedExtension {
                file_name: name.to_string(),
                allowed,
            });
        }
        let max_bytes = u64::from(self.config.max_size_mb) * 1024 * 1024;
        if !is_valid_file_size(size_bytes, max_bytes) {
            return Err(UploadError::TooLarge {
                file_name: name.to_string(),
                max_mb: self.config.max_size_mb,
            });
        }
        Ok(())
    }

    /// Accept a picked file, or reject it without touching the network.
    pub fn select_file(&self, file: SelectedFile<T::File>) -> Result<(), UploadError> {
        if let Err(e) = self.validate(&file.name, file.size_bytes) {
            log::debug!("Rejected upload candidate {}: {}", file.name, e);
            self.update(|s| s.error = Some(e.to_string()));
            return Err(e);
        }

        self.file.replace(Some(file.handle));
        self.update(|s| {
            s.selected = Some((file.name, file.size_bytes));
            s.error = None;
            s.result = None;
        });
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.file.replace(None);
        self.update(|s| s.selected = None);
    }

    /// Upload the selected file, then refresh the history best-effort.
    pub async fn upload(&self) -> Result<UploadResult, UploadError> {
        if self.state.borrow().uploading {
            return Err(UploadError::Busy);
        }
        let file = self.file.borrow_mut().take();
        let Some(file) = file else {
            let e = UploadError::NoFile;
            self.update(|s| s.error = Some(e.to_string()));
            return Err(e);
        };

        self.update(|s| {
            s.uploading = true;
            s.error = None;
            s.result = None;
        });

        let token = self.identity.get_token().await;
        let outcome = match self.transport.upload(&file, token.as_deref()).await {
            Ok(value) => decode::<UploadResult>(value),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                log::info!(
                    "Upload finished: success={}, rows={}",
                    result.success,
                    result.records_processed
                );
                self.update(|s| {
                    s.uploading = false;
                    s.selected = None;
                    s.result = Some(result.clone());
                });
                self.refresh_history().await;
                Ok(result)
            }
            Err(failure) => {
                let info = classify(&failure);
                log::warn!("Upload failed ({}): {}", info.kind.as_str(), failure);
                // Keep the file so the user can try again
                self.file.replace(Some(file));
                let message = match info.kind {
                    ErrorKind::Network | ErrorKind::Auth => info.message,
                    _ => failure
                        .server_body()
                        .and_then(|b| b.message())
                        .map(str::to_string)
                        .unwrap_or_else(|| "An error occurred during upload.".to_string()),
                };
                self.update(|s| {
                    s.uploading = false;
                    s.error = Some(message.clone());
                });
                if info.kind == ErrorKind::Auth {
                    self.identity.sign_out().await;
                }
                Err(UploadError::Rejected(message))
            }
        }
    }

    /// Reload the upload history. Failures are logged and otherwise ignored.
    pub async fn refresh_history(&self) {
        let token = self.identity.get_token().await;
        let history = match self.transport.history(token.as_deref()).await {
            Ok(value) => decode::<UploadHistoryResponse>(value),
            Err(e) => Err(e),
        };
        match history {
            Ok(history) => self.update(|s| s.history = history.items),
            Err(e) => log::error!("Failed to fetch upload history: {}", e),
        }
    }
}
