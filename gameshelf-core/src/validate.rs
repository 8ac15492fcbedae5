//! Field validation shared by the services.
//!
//! Every check returns the normalized (trimmed) value on success so callers
//! can validate first and mutate afterwards.

use chrono::Datelike;

use crate::error::ValidationError;
use crate::media::MediaInfo;

/// Earliest non-zero release year accepted.
pub const MIN_RELEASE_YEAR: u16 = 1950;

/// Marker every user email must contain.
pub const EMAIL_DOMAIN: &str = "@gmail.com";

/// Tunable limits applied by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Latest release year accepted (inclusive).
    pub max_release_year: u16,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_release_year: current_year(),
        }
    }
}

impl ValidationRules {
    pub fn with_max_release_year(max_release_year: u16) -> Self {
        Self { max_release_year }
    }

    /// Accept `0` (unknown) or `1950..=max_release_year`.
    pub fn release_year(&self, year: u16) -> Result<u16, ValidationError> {
        if year > self.max_release_year {
            return Err(ValidationError::YearInFuture {
                year,
                max: self.max_release_year,
            });
        }
        if year != 0 && year < MIN_RELEASE_YEAR {
            return Err(ValidationError::YearTooOld(year));
        }
        Ok(year)
    }
}

/// The current calendar year from the local clock.
pub fn current_year() -> u16 {
    u16::try_from(chrono::Local::now().year()).unwrap_or(u16::MAX)
}

pub fn title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

pub fn price(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::NegativePrice(value));
    }
    Ok(value)
}

pub fn rating(value: f64) -> Result<f64, ValidationError> {
    if !(0.0..=10.0).contains(&value) {
        return Err(ValidationError::RatingOutOfRange(value));
    }
    Ok(value)
}

pub fn user_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName);
    }
    if trimmed.chars().any(char::is_numeric) {
        return Err(ValidationError::NameContainsDigits(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankEmail);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailContainsSpaces(trimmed.to_string()));
    }
    if !trimmed.contains(EMAIL_DOMAIN) {
        return Err(ValidationError::EmailMissingDomain {
            email: trimmed.to_string(),
            domain: EMAIL_DOMAIN,
        });
    }
    Ok(trimmed.to_string())
}

/// Trim a free-text list entry, returning `None` when nothing is left.
pub fn list_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate the shared media fields and normalize them in place.
///
/// Nothing is modified unless every field passes.
pub fn media_info(info: &mut MediaInfo, rules: ValidationRules) -> Result<(), ValidationError> {
    let title = title(&info.title)?;
    let year = rules.release_year(info.release_year)?;
    let price = price(info.price)?;
    let rating = rating(info.rating)?;

    info.title = title;
    info.release_year = year;
    info.price = price;
    info.rating = rating;
    info.genres = clean_list(&info.genres);
    info.platforms = clean_list(&info.platforms);
    Ok(())
}

/// Trim every entry and drop the blank ones.
pub fn clean_list(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|item| list_entry(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(title("  Portal 2 ").unwrap(), "Portal 2");
        assert_eq!(title("   "), Err(ValidationError::BlankTitle));
    }

    #[test]
    fn test_release_year_bounds() {
        let rules = ValidationRules::with_max_release_year(2025);
        assert_eq!(rules.release_year(0), Ok(0));
        assert_eq!(rules.release_year(1950), Ok(1950));
        assert_eq!(rules.release_year(2025), Ok(2025));
        assert_eq!(rules.release_year(1949), Err(ValidationError::YearTooOld(1949)));
        assert_eq!(
            rules.release_year(2026),
            Err(ValidationError::YearInFuture {
                year: 2026,
                max: 2025
            })
        );
    }

    #[test]
    fn test_default_rules_use_current_year() {
        let rules = ValidationRules::default();
        assert_eq!(rules.max_release_year, current_year());
        assert!(rules.release_year(current_year() + 1).is_err());
    }

    #[test]
    fn test_price_and_rating() {
        assert_eq!(price(0.0), Ok(0.0));
        assert!(price(-0.01).is_err());
        assert!(price(f64::NAN).is_err());
        assert_eq!(rating(10.0), Ok(10.0));
        assert!(rating(10.5).is_err());
        assert!(rating(-1.0).is_err());
        assert!(rating(f64::NAN).is_err());
    }

    #[test]
    fn test_user_name_rejects_digits() {
        assert_eq!(user_name(" Ada ").unwrap(), "Ada");
        assert!(matches!(
            user_name("R2D2"),
            Err(ValidationError::NameContainsDigits(_))
        ));
        assert_eq!(user_name(""), Err(ValidationError::BlankName));
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(email(" ada@gmail.com ").unwrap(), "ada@gmail.com");
        assert_eq!(email(" "), Err(ValidationError::BlankEmail));
        assert!(matches!(
            email("ada lovelace@gmail.com"),
            Err(ValidationError::EmailContainsSpaces(_))
        ));
        assert!(matches!(
            email("ada@example.com"),
            Err(ValidationError::EmailMissingDomain { .. })
        ));
    }

    #[test]
    fn test_media_info_is_all_or_nothing() {
        let rules = ValidationRules::with_max_release_year(2025);
        let mut info = MediaInfo::new("  Celeste ");
        info.release_year = 2018;
        info.genres = vec![" Platformer ".into(), "  ".into()];
        media_info(&mut info, rules).unwrap();
        assert_eq!(info.title, "Celeste");
        assert_eq!(info.genres, vec!["Platformer"]);

        let mut bad = MediaInfo::new("  Future ");
        bad.release_year = 3000;
        assert!(media_info(&mut bad, rules).is_err());
        assert_eq!(bad.title, "  Future ");
    }

    #[test]
    fn test_list_entry() {
        assert_eq!(list_entry("  RPG "), Some("RPG".to_string()));
        assert_eq!(list_entry("   "), None);
    }
}
