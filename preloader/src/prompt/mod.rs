// Prompt Dialog — adw::AlertDialog subclass
//
// First-run configuration: emulator binary, EXTRAs folder, multimedia folder
// and language, laid out in a four-row grid under the header text and the
// flavor graphic. Every widget signal becomes a PromptMessage for the
// PromptForm; the dialog then copies the form's view back onto the widgets.
// `prompt()` resolves once the user confirms or cancels.

pub mod form;

use std::cell::RefCell;

use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use tokio::sync::oneshot;

use gtk4::subclass::prelude::ObjectSubclassIsExt;

use crate::config::Configuration;
use crate::flavor::{Flavor, Platform};
use crate::i18n::locale;
use crate::paths::{self, PathKind};
use crate::splash::SplashWindow;

pub use form::{Field, FolderRequest, PromptForm, PromptMessage, PromptView};

const RESPONSE_OK: &str = "ok";
const RESPONSE_CANCEL: &str = "cancel";
const ERROR_CLASS: &str = "error";

/// Widgets the dialog updates after construction.
#[derive(Debug)]
pub struct PromptWidgets {
    graphic: gtk4::Image,
    binary_label: gtk4::Label,
    binary_entry: gtk4::Entry,
    binary_button: gtk4::Button,
    extras_label: gtk4::Label,
    extras_entry: gtk4::Entry,
    extras_button: gtk4::Button,
    multimedia_label: gtk4::Label,
    multimedia_entry: gtk4::Entry,
    multimedia_button: gtk4::Button,
    language_label: gtk4::Label,
    language_choice: gtk4::DropDown,
}

// ---------------------------------------------------------------------------
// PromptDialog — adw::AlertDialog subclass
// ---------------------------------------------------------------------------

mod imp {
    use super::*;
    use gtk4::subclass::prelude::*;
    use libadwaita::subclass::prelude::*;

    #[derive(Default)]
    pub struct PromptDialog {
        pub form: RefCell<Option<PromptForm>>,
        pub widgets: RefCell<Option<PromptWidgets>>,
        pub splash: RefCell<Option<SplashWindow>>,
        pub shown_flavor: RefCell<Option<Flavor>>,
        pub result: RefCell<Option<oneshot::Sender<Option<Configuration>>>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PromptDialog {
        const NAME: &'static str = "NegatronPromptDialog";
        type Type = super::PromptDialog;
        type ParentType = adw::AlertDialog;
    }

    impl ObjectImpl for PromptDialog {}
    impl WidgetImpl for PromptDialog {}
    impl AdwDialogImpl for PromptDialog {}
    impl AdwAlertDialogImpl for PromptDialog {}
}

glib::wrapper! {
    pub struct PromptDialog(ObjectSubclass<imp::PromptDialog>)
        @extends adw::AlertDialog, adw::Dialog, gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget;
}

impl PromptDialog {
    pub fn new(splash: &SplashWindow, form: PromptForm) -> Self {
        let dialog: Self = glib::Object::builder()
            .property("prefer-wide-layout", true)
            .build();

        let imp = dialog.imp();
        imp.splash.replace(Some(splash.clone()));
        imp.form.replace(Some(form));

        dialog.build_ui();
        dialog.refresh();
        dialog
    }

    fn build_ui(&self) {
        let imp = self.imp();
        let Some(view) = self.view() else {
            return;
        };
        let locale_names = imp
            .form
            .borrow()
            .as_ref()
            .map(PromptForm::locale_names)
            .unwrap_or_default();

        self.add_response(RESPONSE_CANCEL, &view.texts.cancel);
        self.add_response(RESPONSE_OK, &view.texts.ok);
        self.set_response_appearance(RESPONSE_OK, adw::ResponseAppearance::Suggested);
        self.set_default_response(Some(RESPONSE_OK));
        self.set_close_response(RESPONSE_CANCEL);

        let graphic = gtk4::Image::builder()
            .pixel_size(64)
            .halign(gtk4::Align::Center)
            .build();

        let grid = gtk4::Grid::builder()
            .row_spacing(10)
            .column_spacing(10)
            .margin_top(20)
            .margin_start(10)
            .margin_end(10)
            .margin_bottom(10)
            .width_request(500)
            .build();

        let (binary_label, binary_entry, binary_button) = path_row(&grid, 0);
        let (extras_label, extras_entry, extras_button) = path_row(&grid, 1);
        let (multimedia_label, multimedia_entry, multimedia_button) = path_row(&grid, 2);

        let language_label = gtk4::Label::builder().halign(gtk4::Align::Start).build();
        let names: Vec<&str> = locale_names.iter().map(String::as_str).collect();
        let language_choice = gtk4::DropDown::from_strings(&names);
        language_choice.set_selected(view.selected_locale as u32);
        grid.attach(&language_label, 0, 3, 1, 1);
        grid.attach(&language_choice, 1, 3, 2, 1);

        let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
        content.append(&graphic);
        content.append(&grid);
        self.set_extra_child(Some(&content));

        // Text edits
        for (entry, field) in [
            (&binary_entry, Field::Binary),
            (&extras_entry, Field::Extras),
            (&multimedia_entry, Field::Multimedia),
        ] {
            let dialog = self.downgrade();
            entry.connect_changed(move |entry| {
                if let Some(dialog) = dialog.upgrade() {
                    dialog.dispatch(PromptMessage::TextChanged(field, entry.text().to_string()));
                }
            });
        }

        // Browse buttons
        let dialog = self.downgrade();
        binary_button.connect_clicked(move |_| {
            let Some(dialog) = dialog.upgrade() else {
                return;
            };
            glib::MainContext::default().spawn_local(async move {
                dialog.choose_binary().await;
            });
        });

        for (button, field) in [
            (&extras_button, Field::Extras),
            (&multimedia_button, Field::Multimedia),
        ] {
            let dialog = self.downgrade();
            button.connect_clicked(move |_| {
                let Some(dialog) = dialog.upgrade() else {
                    return;
                };
                glib::MainContext::default().spawn_local(async move {
                    dialog.choose_folder(field).await;
                });
            });
        }

        // Language choice
        let dialog = self.downgrade();
        language_choice.connect_selected_notify(move |choice| {
            if let Some(dialog) = dialog.upgrade() {
                dialog.on_locale_selected(choice.selected() as usize);
            }
        });

        // Confirm / cancel
        self.connect_response(None, |dialog, response| {
            if let Some(dialog) = dialog.downcast_ref::<PromptDialog>() {
                dialog.finish(response == RESPONSE_OK);
            }
        });

        imp.widgets.replace(Some(PromptWidgets {
            graphic,
            binary_label,
            binary_entry,
            binary_button,
            extras_label,
            extras_entry,
            extras_button,
            multimedia_label,
            multimedia_entry,
            multimedia_button,
            language_label,
            language_choice,
        }));
    }

    /// Present the dialog over the splash window and wait for the answer.
    /// `None` means the user cancelled.
    pub async fn prompt(&self) -> Option<Configuration> {
        let (tx, rx) = oneshot::channel();
        self.imp().result.replace(Some(tx));

        let splash = self.imp().splash.borrow().clone();
        adw::prelude::AdwDialogExt::present(self, splash.as_ref());

        if let Some(ref widgets) = *self.imp().widgets.borrow() {
            let entry = widgets.binary_entry.clone();
            glib::idle_add_local_once(move || {
                entry.grab_focus();
            });
        }

        rx.await.ok().flatten()
    }

    fn finish(&self, confirmed: bool) {
        let configuration = if confirmed {
            self.imp()
                .form
                .borrow()
                .as_ref()
                .and_then(PromptForm::configuration)
        } else {
            None
        };
        if let Some(tx) = self.imp().result.take() {
            let _ = tx.send(configuration);
        }
    }

    // -- Messages ------------------------------------------------------------

    fn dispatch(&self, message: PromptMessage) {
        {
            let mut form = self.imp().form.borrow_mut();
            let Some(form) = form.as_mut() else {
                return;
            };
            if let Err(e) = form.update(message) {
                tracing::error!("couldn't apply prompt change: {e}");
            }
        }
        self.refresh();
    }

    fn on_locale_selected(&self, index: usize) {
        let selected = self
            .imp()
            .form
            .borrow()
            .as_ref()
            .and_then(|form| form.locales().get(index).cloned());
        if let Some(selected) = selected {
            locale::set_current(selected);
        }
        self.dispatch(PromptMessage::LocaleSelected(index));
    }

    async fn choose_binary(&self) {
        let Some((filters, folder)) = self.imp().form.borrow().as_ref().map(|form| {
            (form.binary_filters(Platform::current()), form.binary_folder())
        }) else {
            return;
        };

        let store = gio::ListStore::new::<gtk4::FileFilter>();
        for spec in &filters {
            let filter = gtk4::FileFilter::new();
            filter.set_name(Some(&spec.name));
            filter.add_pattern(&spec.pattern);
            store.append(&filter);
        }

        let chooser = gtk4::FileDialog::builder()
            .modal(true)
            .filters(&store)
            .initial_folder(&gio::File::for_path(&folder))
            .build();

        match chooser.open_future(self.parent_window().as_ref()).await {
            Ok(file) => {
                if let Some(path) = file.path() {
                    self.dispatch(PromptMessage::BinaryChosen(path));
                }
            }
            Err(e) => tracing::debug!("binary chooser dismissed: {e}"),
        }
    }

    async fn choose_folder(&self, field: Field) {
        let Some(request) = self.imp().form.borrow().as_ref().map(|form| match field {
            Field::Multimedia => form.multimedia_request(),
            _ => form.extras_request(),
        }) else {
            return;
        };
        let FolderRequest {
            title,
            initial_folder,
        } = request;

        let chooser = gtk4::FileDialog::builder()
            .title(&title)
            .modal(true)
            .initial_folder(&gio::File::for_path(&initial_folder))
            .build();

        match chooser.select_folder_future(self.parent_window().as_ref()).await {
            Ok(folder) => {
                if let Some(path) = folder.path() {
                    self.dispatch(PromptMessage::FolderChosen(field, path));
                }
            }
            Err(e) => tracing::debug!("folder chooser dismissed: {e}"),
        }
    }

    fn parent_window(&self) -> Option<gtk4::Window> {
        self.imp()
            .splash
            .borrow()
            .as_ref()
            .map(|splash| splash.clone().upcast::<gtk4::Window>())
    }

    // -- View ----------------------------------------------------------------

    fn view(&self) -> Option<PromptView> {
        self.imp().form.borrow().as_ref().map(PromptForm::view)
    }

    /// Copy the form's view onto the widgets. Widgets are only written when
    /// their content differs so that programmatic edits do not loop back.
    fn refresh(&self) {
        let Some(view) = self.view() else {
            return;
        };
        let imp = self.imp();

        self.set_title(&view.texts.dialog_title);
        self.set_heading(Some(&view.texts.dialog_title));
        self.set_body(&view.texts.header);
        self.set_response_label(RESPONSE_OK, &view.texts.ok);
        self.set_response_label(RESPONSE_CANCEL, &view.texts.cancel);
        self.set_response_enabled(RESPONSE_OK, view.confirm_enabled);

        if let Some(ref splash) = *imp.splash.borrow() {
            splash.set_title(Some(&view.texts.window_title));
            splash.set_status(&view.texts.status);
        }

        let flavor_changed = imp.shown_flavor.replace(Some(view.flavor)) != Some(view.flavor);

        let guard = imp.widgets.borrow();
        let Some(widgets) = guard.as_ref() else {
            return;
        };

        if flavor_changed {
            show_flavor_graphic(&widgets.graphic, view.flavor);
        }

        widgets.binary_label.set_label(&view.binary_label);
        widgets.extras_label.set_label(&view.extras_label);
        widgets.multimedia_label.set_label(&view.multimedia_label);
        widgets.language_label.set_label(&view.texts.language_label);

        widgets.binary_entry.set_placeholder_text(Some(&view.texts.binary_prompt));
        widgets.extras_entry.set_placeholder_text(Some(&view.texts.extras_prompt));
        widgets
            .multimedia_entry
            .set_placeholder_text(Some(&view.texts.multimedia_prompt));

        for button in [
            &widgets.binary_button,
            &widgets.extras_button,
            &widgets.multimedia_button,
        ] {
            button.set_label(&view.texts.browse);
        }

        if view.binary_in_error {
            widgets.binary_entry.add_css_class(ERROR_CLASS);
        } else {
            widgets.binary_entry.remove_css_class(ERROR_CLASS);
        }

        for widget in [
            widgets.multimedia_label.upcast_ref::<gtk4::Widget>(),
            widgets.multimedia_entry.upcast_ref(),
            widgets.multimedia_button.upcast_ref(),
        ] {
            widget.set_visible(view.multimedia_visible);
        }

        // Entry and choice updates emit signals that re-enter dispatch().
        for (entry, text) in [
            (&widgets.binary_entry, &view.binary),
            (&widgets.extras_entry, &view.extras),
            (&widgets.multimedia_entry, &view.multimedia),
        ] {
            if entry.text().as_str() != text {
                entry.set_text(text);
            }
        }
        let choice = &widgets.language_choice;
        if choice.selected() as usize != view.selected_locale {
            choice.set_selected(view.selected_locale as u32);
        }
    }
}

/// Label, entry and browse button on `row` of `grid`; the entry stretches.
fn path_row(grid: &gtk4::Grid, row: i32) -> (gtk4::Label, gtk4::Entry, gtk4::Button) {
    let label = gtk4::Label::builder().halign(gtk4::Align::Start).build();
    let entry = gtk4::Entry::builder().hexpand(true).build();
    let button = gtk4::Button::new();
    grid.attach(&label, 0, row, 1, 1);
    grid.attach(&entry, 1, row, 1, 1);
    grid.attach(&button, 2, row, 1, 1);
    (label, entry, button)
}

fn show_flavor_graphic(image: &gtk4::Image, flavor: Flavor) {
    let image_name = flavor.image_name();
    match paths::locate(PathKind::File, &["theme", "preloader", &image_name]) {
        Some(path) => image.set_from_file(Some(&path)),
        None => image.set_icon_name(Some(flavor.fallback_icon())),
    }
}
