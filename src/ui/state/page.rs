/// Where the page is between uploads and render passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    AwaitingUpload,
    DataLoaded,
    Rendered,
}

impl PagePhase {
    pub fn on_upload(self) -> PagePhase {
        PagePhase::DataLoaded
    }

    pub fn on_clear(self) -> PagePhase {
        PagePhase::AwaitingUpload
    }

    /// A render pass only advances a page that has data.
    pub fn on_render(self) -> PagePhase {
        match self {
            PagePhase::AwaitingUpload => PagePhase::AwaitingUpload,
            PagePhase::DataLoaded | PagePhase::Rendered => PagePhase::Rendered,
        }
    }

    pub fn has_data(self) -> bool {
        !matches!(self, PagePhase::AwaitingUpload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_then_render_reaches_rendered() {
        let phase = PagePhase::AwaitingUpload.on_render();
        assert_eq!(phase, PagePhase::AwaitingUpload);

        let phase = phase.on_upload();
        assert_eq!(phase, PagePhase::DataLoaded);
        assert!(phase.has_data());

        let phase = phase.on_render().on_render();
        assert_eq!(phase, PagePhase::Rendered);

        assert_eq!(phase.on_upload(), PagePhase::DataLoaded);
        assert_eq!(phase.on_clear(), PagePhase::AwaitingUpload);
    }
}
