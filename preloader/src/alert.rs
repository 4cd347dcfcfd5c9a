// Blocking alerts for fatal startup errors

use std::cell::RefCell;

use libadwaita as adw;
use libadwaita::prelude::*;
use tokio::sync::oneshot;

use crate::i18n::{keys, Catalog};

const RESPONSE_CLOSE: &str = "close";

/// Show `message` under the translated "fatal error" heading and wait for
/// the user to dismiss it. Without a parent the alert gets its own window.
pub async fn show_fatal(parent: Option<&gtk4::Widget>, catalog: &Catalog, message: &str) {
    let alert = adw::AlertDialog::builder()
        .heading(catalog.text(keys::FATAL_ERROR))
        .body(message)
        .build();
    alert.add_response(RESPONSE_CLOSE, &catalog.text(keys::CLOSE));
    alert.set_default_response(Some(RESPONSE_CLOSE));
    alert.set_close_response(RESPONSE_CLOSE);

    let (tx, rx) = oneshot::channel::<()>();
    let tx = RefCell::new(Some(tx));
    alert.connect_response(None, move |_, _| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(());
        }
    });

    adw::prelude::AdwDialogExt::present(&alert, parent);
    let _ = rx.await;
}
