// Runtime prerequisites: GTK and libadwaita versions

use libadwaita as adw;

use crate::error::PreloadError;
use crate::i18n::{keys, Catalog};

pub const GTK_MINIMUM: (u32, u32) = (4, 14);
pub const ADWAITA_MINIMUM: (u32, u32) = (1, 6);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl Version {
    pub fn at_least(self, (major, minor): (u32, u32)) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

pub fn gtk_version() -> Version {
    Version {
        major: gtk4::major_version(),
        minor: gtk4::minor_version(),
        micro: gtk4::micro_version(),
    }
}

pub fn adwaita_version() -> Version {
    Version {
        major: adw::major_version(),
        minor: adw::minor_version(),
        micro: adw::micro_version(),
    }
}

/// Check the running libraries. The error carries the localized message
/// to show before aborting.
pub fn check(catalog: &Catalog) -> Result<(), PreloadError> {
    check_versions(catalog, gtk_version(), adwaita_version())
}

fn check_versions(catalog: &Catalog, gtk: Version, adwaita: Version) -> Result<(), PreloadError> {
    if !gtk.at_least(GTK_MINIMUM) {
        let message = catalog.format(keys::GTK_VERSION_ERROR, &gtk.to_string())?;
        return Err(PreloadError::PrerequisiteUnmet(message));
    }
    if !adwaita.at_least(ADWAITA_MINIMUM) {
        let message = catalog.format(keys::ADWAITA_VERSION_ERROR, &adwaita.to_string())?;
        return Err(PreloadError::PrerequisiteUnmet(message));
    }
    Ok(())
}
