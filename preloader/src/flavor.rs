// Emulator flavor — MAME or MESS
//
// The two supported emulator builds are told apart by a token in the chosen
// binary's file name. The flavor drives the dialog labels, the header image,
// the first key of the ini file and which folders are relevant.

use std::fmt;
use std::path::Path;

/// Host platform family, as far as file filters are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// A file picker filter: a display name and one glob pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFilterSpec {
    pub name: String,
    pub pattern: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flavor {
    #[default]
    Mame,
    Mess,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Flavor::Mame, Flavor::Mess];

    /// Canonical upper-case name, shown in labels and substituted in texts.
    pub fn token(self) -> &'static str {
        match self {
            Self::Mame => "MAME",
            Self::Mess => "MESS",
        }
    }

    /// Lower-case name, used as ini key and in file name patterns.
    pub fn key(self) -> &'static str {
        match self {
            Self::Mame => "mame",
            Self::Mess => "mess",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Mame => Self::Mess,
            Self::Mess => Self::Mame,
        }
    }

    /// Derive the flavor from a chosen binary. The match is a case-sensitive
    /// substring test on the file name only, so `MESS.exe` counts as MAME.
    pub fn from_binary(path: &Path) -> Self {
        let is_mess = path
            .file_name()
            .map(|name| name.to_string_lossy().contains(Self::Mess.key()))
            .unwrap_or(false);
        if is_mess {
            Self::Mess
        } else {
            Self::Mame
        }
    }

    /// Replace the other flavor's token with this one's.
    pub fn retoken(self, text: &str) -> String {
        text.replace(self.other().token(), self.token())
    }

    pub fn extras_label(self) -> String {
        format!("{} EXTRAs", self.token())
    }

    pub fn multimedia_label(self) -> String {
        format!("{} Multimedia", self.token())
    }

    /// The multimedia folder only exists for MAME.
    pub fn uses_multimedia(self) -> bool {
        self == Self::Mame
    }

    /// File name of the header image, looked up under `theme/preloader/`.
    pub fn image_name(self) -> String {
        format!("{}.png", self.token())
    }

    /// Themed icon used when the header image cannot be located.
    pub fn fallback_icon(self) -> &'static str {
        match self {
            Self::Mame => "applications-games-symbolic",
            Self::Mess => "input-gaming-symbolic",
        }
    }

    /// Binary picker filters: one per flavor, then a catch-all.
    pub fn binary_filters(platform: Platform, all_files: &str) -> Vec<FileFilterSpec> {
        let suffix = match platform {
            Platform::Windows => ".exe",
            Platform::Other => "",
        };
        let mut filters: Vec<FileFilterSpec> = Self::ALL
            .iter()
            .map(|flavor| FileFilterSpec {
                name: flavor.token().to_string(),
                pattern: format!("*{}*{}", flavor.key(), suffix),
            })
            .collect();
        filters.push(FileFilterSpec {
            name: all_files.to_string(),
            pattern: "*".to_string(),
        });
        filters
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_follows_file_name_token() {
        assert_eq!(Flavor::from_binary(Path::new("/opt/games/mame0260")), Flavor::Mame);
        assert_eq!(Flavor::from_binary(Path::new("/opt/mess-bin")), Flavor::Mess);
        assert_eq!(Flavor::from_binary(Path::new("C:\\Emu\\mess-bin.exe")), Flavor::Mess);
    }

    #[test]
    fn flavor_ignores_directories_and_case() {
        assert_eq!(Flavor::from_binary(Path::new("/home/mess/mame64")), Flavor::Mame);
        assert_eq!(Flavor::from_binary(Path::new("/usr/bin/MESS")), Flavor::Mame);
    }

    #[test]
    fn retoken_is_idempotent() {
        let text = "Please locate MAME";
        let once = Flavor::Mess.retoken(text);
        assert_eq!(once, "Please locate MESS");
        assert_eq!(Flavor::Mess.retoken(&once), once);
        assert_eq!(Flavor::Mame.retoken(&once), text);
    }

    #[test]
    fn windows_filters_require_exe() {
        let filters = Flavor::binary_filters(Platform::Windows, "All files");
        let patterns: Vec<_> = filters.iter().map(|f| f.pattern.as_str()).collect();
        assert_eq!(patterns, ["*mame*.exe", "*mess*.exe", "*"]);
        assert_eq!(filters[0].name, "MAME");
        assert_eq!(filters[1].name, "MESS");
        assert_eq!(filters[2].name, "All files");
    }

    #[test]
    fn other_platform_filters_have_no_extension() {
        let filters = Flavor::binary_filters(Platform::Other, "*");
        let patterns: Vec<_> = filters.iter().map(|f| f.pattern.as_str()).collect();
        assert_eq!(patterns, ["*mame*", "*mess*", "*"]);
    }

    #[test]
    fn labels() {
        assert_eq!(Flavor::Mess.extras_label(), "MESS EXTRAs");
        assert_eq!(Flavor::Mame.multimedia_label(), "MAME Multimedia");
        assert!(!Flavor::Mess.uses_multimedia());
    }
}
