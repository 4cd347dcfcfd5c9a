// Splash Window — adw::ApplicationWindow subclass
//
// Logo, progress bar and status line shown while the main application
// initialises. The bar either shows a fraction or pulses when the remaining
// work cannot be measured.

use std::cell::RefCell;
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;

use gtk4::subclass::prelude::ObjectSubclassIsExt;

use crate::config::APP_NAME;
use crate::i18n::{keys, Catalog};
use crate::paths::{self, PathKind};

const PULSE_INTERVAL: Duration = Duration::from_millis(100);

mod imp {
    use super::*;
    use gtk4::subclass::prelude::*;
    use libadwaita::subclass::prelude::*;

    #[derive(Default)]
    pub struct SplashWindow {
        pub bar: RefCell<Option<gtk4::ProgressBar>>,
        pub status: RefCell<Option<gtk4::Label>>,
        pub pulse_source: RefCell<Option<glib::SourceId>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SplashWindow {
        const NAME: &'static str = "NegatronSplashWindow";
        type Type = super::SplashWindow;
        type ParentType = adw::ApplicationWindow;
    }

    impl ObjectImpl for SplashWindow {
        fn constructed(&self) {
            self.parent_constructed();
            let obj = self.obj();
            obj.set_default_size(300, 150);
            obj.set_resizable(false);
        }

        fn dispose(&self) {
            if let Some(source) = self.pulse_source.take() {
                source.remove();
            }
        }
    }

    impl WidgetImpl for SplashWindow {}
    impl WindowImpl for SplashWindow {}
    impl ApplicationWindowImpl for SplashWindow {}
    impl AdwApplicationWindowImpl for SplashWindow {}
}

glib::wrapper! {
    pub struct SplashWindow(ObjectSubclass<imp::SplashWindow>)
        @extends adw::ApplicationWindow, gtk4::ApplicationWindow,
                 gtk4::Window, gtk4::Widget,
        @implements gtk4::gio::ActionGroup, gtk4::gio::ActionMap;
}

impl SplashWindow {
    pub fn new(app: &impl IsA<gtk4::Application>, catalog: &Catalog) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", catalog.text(keys::WELCOME))
            .build();
        window.build_ui();
        window
    }

    fn build_ui(&self) {
        let imp = self.imp();

        let logo_name = format!("{APP_NAME}Logo.png");
        let logo = match paths::locate(PathKind::File, &["theme", "preloader", &logo_name]) {
            Some(path) => gtk4::Image::from_file(path),
            None => gtk4::Image::from_icon_name("applications-games"),
        };
        logo.set_pixel_size(64);

        let bar = gtk4::ProgressBar::builder()
            .margin_start(24)
            .margin_end(24)
            .build();
        let status = gtk4::Label::builder()
            .ellipsize(gtk4::pango::EllipsizeMode::End)
            .build();

        let content = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Vertical)
            .spacing(5)
            .valign(gtk4::Align::Center)
            .halign(gtk4::Align::Fill)
            .build();
        content.append(&logo);
        content.append(&bar);
        content.append(&status);

        self.set_content(Some(&content));

        imp.bar.replace(Some(bar));
        imp.status.replace(Some(status));
    }

    pub fn set_status(&self, text: &str) {
        if let Some(ref status) = *self.imp().status.borrow() {
            status.set_label(text);
        }
    }

    /// Show a measured fraction, stopping any pulse.
    pub fn set_fraction(&self, fraction: f64) {
        self.stop_pulse();
        if let Some(ref bar) = *self.imp().bar.borrow() {
            bar.set_fraction(fraction.clamp(0.0, 1.0));
        }
    }

    /// Switch the bar to indeterminate mode.
    pub fn start_pulse(&self) {
        let imp = self.imp();
        if imp.pulse_source.borrow().is_some() {
            return;
        }
        let Some(bar) = imp.bar.borrow().clone() else {
            return;
        };
        let source = glib::timeout_add_local(PULSE_INTERVAL, move || {
            bar.pulse();
            glib::ControlFlow::Continue
        });
        imp.pulse_source.replace(Some(source));
    }

    fn stop_pulse(&self) {
        if let Some(source) = self.imp().pulse_source.take() {
            source.remove();
        }
    }

    /// Hide the splash once the main application is ready.
    pub fn dismiss(&self) {
        self.stop_pulse();
        self.set_visible(false);
    }
}
