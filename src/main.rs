mod app;
mod config;

mod domain {
    pub mod entities {
        #[cfg(test)]
        pub mod fixture;
        pub mod recipe;
        pub mod record;
        pub mod result;
    }
}

mod infra {
    pub mod import {
        pub mod csv;
        pub mod xlsx;
    }
    pub mod sqlite {
        pub mod queries;
        pub mod repo;
        pub mod schema;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod chart;
    pub mod format;
    pub mod kpi;
    pub mod components {
        pub mod charts;
        pub mod preview;
        pub mod widgets;
    }
    pub mod state {
        pub mod app_state;
        pub mod page;
    }
}

mod usecase {
    pub mod ports {
        pub mod repo;
    }
    pub mod services {
        pub mod dashboard_service;
        pub mod upload_service;
    }
}


use tracing::{error, info};

use crate::config::{default_webview_data_dir, init_tracing, APP_TITLE};

fn main() {
    init_tracing();

    let webview_data_dir = match default_webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed to prepare webview data directory");
            std::process::exit(1);
        }
    };
    info!(data_dir = %webview_data_dir.display(), "starting {APP_TITLE}");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(APP_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
