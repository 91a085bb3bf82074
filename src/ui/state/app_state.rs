use dioxus::prelude::{use_signal, Signal};

use crate::ui::state::page::PagePhase;
use crate::usecase::ports::repo::UploadMeta;

pub struct AppState {
    pub phase: Signal<PagePhase>,
    pub upload: Signal<Option<UploadMeta>>,
    pub upload_error: Signal<Option<String>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub preview_open: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: use_signal(|| PagePhase::AwaitingUpload),
            upload: use_signal(|| None::<UploadMeta>),
            upload_error: use_signal(|| None::<String>),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            preview_open: use_signal(|| false),
        }
    }
}
