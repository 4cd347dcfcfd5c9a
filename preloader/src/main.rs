// Negatron Preloader — Entry Point
//
// Installs the tracing subscriber, creates the PreloaderApp
// (adw::Application subclass) and runs the GTK main loop.

use gtk4::glib;
use gtk4::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use negatron_preloader::PreloaderApp;

fn main() -> glib::ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = PreloaderApp::new();
    app.run()
}
