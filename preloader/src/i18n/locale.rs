// Process default locale and language tag helpers

use std::sync::{OnceLock, RwLock};

use unic_langid::LanguageIdentifier;

/// The built-in locale, always offered first and backing every catalog.
pub fn builtin() -> LanguageIdentifier {
    parse_tag("en-GB")
}

static CURRENT: OnceLock<RwLock<LanguageIdentifier>> = OnceLock::new();

fn current_cell() -> &'static RwLock<LanguageIdentifier> {
    CURRENT.get_or_init(|| {
        let host = sys_locale::get_locale()
            .map(|tag| parse_tag(&tag))
            .unwrap_or_else(builtin);
        RwLock::new(host)
    })
}

/// The process default locale.
pub fn current() -> LanguageIdentifier {
    match current_cell().read() {
        Ok(locale) => locale.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_current(locale: LanguageIdentifier) {
    tracing::debug!("default locale changed to {locale}");
    match current_cell().write() {
        Ok(mut current) => *current = locale,
        Err(poisoned) => *poisoned.into_inner() = locale,
    }
}

/// Lenient tag parsing: accepts `_` separators and POSIX suffixes such as
/// `.UTF-8` or `@euro`, keeps the longest well-formed prefix and falls back
/// to the undetermined locale.
pub fn parse_tag(tag: &str) -> LanguageIdentifier {
    let tag = tag
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    let subtags: Vec<&str> = tag.split('-').filter(|s| !s.is_empty()).collect();
    (1..=subtags.len())
        .rev()
        .find_map(|n| subtags[..n].join("-").parse::<LanguageIdentifier>().ok())
        .unwrap_or_default()
}

/// The locale's name written in that locale, e.g. "français (France)".
pub fn endonym(locale: &LanguageIdentifier) -> String {
    let language = locale.language.as_str();
    let Some(name) = language_endonym(language) else {
        return locale.to_string();
    };
    match locale.region {
        Some(region) => {
            let region = region.as_str();
            let region_name = region_endonym(language, region).unwrap_or(region);
            format!("{name} ({region_name})")
        }
        None => name.to_string(),
    }
}

fn language_endonym(language: &str) -> Option<&'static str> {
    Some(match language {
        "en" => "English",
        "fr" => "français",
        "de" => "Deutsch",
        "es" => "español",
        "it" => "italiano",
        "pt" => "português",
        "nl" => "Nederlands",
        "pl" => "polski",
        "cs" => "čeština",
        "hu" => "magyar",
        "sv" => "svenska",
        "el" => "Ελληνικά",
        "tr" => "Türkçe",
        "ru" => "русский",
        "ja" => "日本語",
        "zh" => "中文",
        "ko" => "한국어",
        _ => return None,
    })
}

fn region_endonym(language: &str, region: &str) -> Option<&'static str> {
    Some(match (language, region) {
        ("en", "GB") => "United Kingdom",
        ("en", "US") => "United States",
        ("en", "CA") => "Canada",
        ("en", "AU") => "Australia",
        ("fr", "FR") => "France",
        ("fr", "CA") => "Canada",
        ("fr", "BE") => "Belgique",
        ("fr", "CH") => "Suisse",
        ("de", "DE") => "Deutschland",
        ("de", "AT") => "Österreich",
        ("de", "CH") => "Schweiz",
        ("es", "ES") => "España",
        ("es", "MX") => "México",
        ("it", "IT") => "Italia",
        ("pt", "PT") => "Portugal",
        ("pt", "BR") => "Brasil",
        ("nl", "NL") => "Nederland",
        ("pl", "PL") => "Polska",
        ("cs", "CZ") => "Česko",
        ("hu", "HU") => "Magyarország",
        ("sv", "SE") => "Sverige",
        ("el", "GR") => "Ελλάδα",
        ("tr", "TR") => "Türkiye",
        ("ru", "RU") => "Россия",
        ("ja", "JP") => "日本",
        ("zh", "CN") => "中国",
        ("zh", "TW") => "台灣",
        ("ko", "KR") => "대한민국",
        _ => return None,
    })
}
