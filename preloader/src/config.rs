// Negatron.ini — first-run configuration record and file
//
// The file is line oriented: a key at column 0, spaces up to a fixed value
// column, then the value. The preloader writes the four first-run keys and
// reads back `language` and `skin`; every other key belongs to the main
// application.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PreloadError;
use crate::flavor::Flavor;

pub const APP_NAME: &str = "Negatron";

/// Width of the key column, value included from this offset.
pub const KEY_COLUMN: usize = 26;

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

pub mod keys {
    pub const EXTRAS: &str = "extras";
    pub const MULTIMEDIA: &str = "multimedia";
    pub const LANGUAGE: &str = "language";
    pub const SKIN: &str = "skin";
}

/// Result of a confirmed first-run prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    flavor: Flavor,
    binary_path: String,
    extras_path: String,
    multimedia_path: String,
    language_tag: String,
}

impl Configuration {
    pub fn new(
        flavor: Flavor,
        binary_path: impl Into<String>,
        extras_path: impl Into<String>,
        multimedia_path: impl Into<String>,
        language_tag: impl Into<String>,
    ) -> Self {
        Self {
            flavor,
            binary_path: binary_path.into(),
            extras_path: extras_path.into(),
            multimedia_path: multimedia_path.into(),
            language_tag: language_tag.into(),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn binary_path(&self) -> &str {
        &self.binary_path
    }

    pub fn extras_path(&self) -> &str {
        &self.extras_path
    }

    /// Irrelevant when the flavor is MESS, but written all the same.
    pub fn multimedia_path(&self) -> &str {
        &self.multimedia_path
    }

    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    /// Binary path as stored: quoted when it holds a space.
    fn quoted_binary_path(&self) -> String {
        if self.binary_path.contains(' ') {
            format!("\"{}\"", self.binary_path)
        } else {
            self.binary_path.clone()
        }
    }

    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write_line(out, self.flavor.key(), &self.quoted_binary_path())?;
        write_line(out, keys::EXTRAS, &self.extras_path)?;
        write_line(out, keys::MULTIMEDIA, &self.multimedia_path)?;
        write_line(out, keys::LANGUAGE, &self.language_tag)?;
        Ok(())
    }
}

fn write_line(out: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    write!(out, "{key:<width$}{value}{LINE_SEPARATOR}", width = KEY_COLUMN)
}

/// Handle on the ini file at a given path.
#[derive(Clone, Debug)]
pub struct ConfigFile {
    path: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new(format!("./{APP_NAME}.ini"))
    }
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Value of the first line starting with `"<key> "`, trimmed. `None` when
    /// the file or the key is absent.
    pub fn value(&self, key: &str) -> Result<Option<String>, PreloadError> {
        let Some(content) = self.read()? else {
            return Ok(None);
        };
        let prefix = format!("{key} ");
        Ok(content
            .lines()
            .find(|line| line.starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string()))
    }

    /// MESS if the file carries a `mess` key, MAME otherwise.
    pub fn flavor(&self) -> Result<Flavor, PreloadError> {
        Ok(match self.value(Flavor::Mess.key())? {
            Some(_) => Flavor::Mess,
            None => Flavor::Mame,
        })
    }

    /// Write `configuration`, replacing any previous content.
    pub fn save(&self, configuration: &Configuration) -> Result<(), PreloadError> {
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(&self.path)?);
            configuration.write_to(&mut writer)?;
            writer.flush()
        };
        write().map_err(|source| PreloadError::ConfigWriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!("configuration written to {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Result<Option<String>, PreloadError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PreloadError::ConfigReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(configuration: &Configuration) -> String {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("Negatron.ini"));
        file.save(configuration).unwrap();
        fs::read_to_string(file.path()).unwrap()
    }

    /// Line-wise parse of a written file: key, value with quotes removed.
    fn parse(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(|line| {
                let (key, value) = line.split_at(KEY_COLUMN);
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                (key.trim_end().to_string(), value.to_string())
            })
            .collect()
    }

    #[test]
    fn fresh_mame_configuration() {
        let configuration = Configuration::new(Flavor::Mame, "/opt/games/mame0260", "", "", "en-GB");
        let expected = [
            "mame                      /opt/games/mame0260",
            "extras                    ",
            "multimedia                ",
            "language                  en-GB",
        ]
        .iter()
        .map(|line| format!("{line}{LINE_SEPARATOR}"))
        .collect::<String>();
        assert_eq!(saved(&configuration), expected);
    }

    #[test]
    fn mess_key_and_unquoted_path() {
        let configuration = Configuration::new(Flavor::Mess, "C:\\Emu\\mess-bin.exe", "", "", "en-GB");
        let content = saved(&configuration);
        assert_eq!(content.lines().next(), Some("mess                      C:\\Emu\\mess-bin.exe"));
    }

    #[test]
    fn path_with_space_is_quoted() {
        let configuration = Configuration::new(Flavor::Mame, "/home/a user/mame", "/x y", "", "fr-FR");
        let content = saved(&configuration);
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("mame                      \"/home/a user/mame\""));
        // Only the binary path is ever quoted.
        assert_eq!(lines.next(), Some("extras                    /x y"));
    }

    #[test]
    fn written_file_parses_back() {
        let configuration = Configuration::new(
            Flavor::Mame,
            "/home/a user/mame",
            "/data/extras",
            "/data/multimedia",
            "de-DE",
        );
        assert_eq!(
            parse(&saved(&configuration)),
            vec![
                ("mame".to_string(), "/home/a user/mame".to_string()),
                ("extras".to_string(), "/data/extras".to_string()),
                ("multimedia".to_string(), "/data/multimedia".to_string()),
                ("language".to_string(), "de-DE".to_string()),
            ]
        );
    }

    #[test]
    fn reads_language_and_skin() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("Negatron.ini"));
        assert!(!file.exists());
        assert_eq!(file.value(keys::LANGUAGE).unwrap(), None);

        fs::write(
            file.path(),
            "mess                      /usr/bin/mess\n\
             languages                 ignored\n\
             language                  fr-FR  \n\
             skin                      dark\n",
        )
        .unwrap();
        assert!(file.exists());
        assert_eq!(file.value(keys::LANGUAGE).unwrap().as_deref(), Some("fr-FR"));
        assert_eq!(file.value(keys::SKIN).unwrap().as_deref(), Some("dark"));
        assert_eq!(file.value("missing").unwrap(), None);
        assert_eq!(file.flavor().unwrap(), Flavor::Mess);
    }

    #[test]
    fn unwritable_path_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("missing").join("Negatron.ini"));
        let configuration = Configuration::new(Flavor::Mame, "/usr/bin/mame", "", "", "en-GB");
        assert!(matches!(
            file.save(&configuration),
            Err(PreloadError::ConfigWriteFailed { .. })
        ));
        assert!(!file.exists());
    }

    #[test]
    fn default_file_is_in_working_directory() {
        assert_eq!(ConfigFile::default().path(), Path::new("./Negatron.ini"));
    }
}
