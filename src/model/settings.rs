use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;

/// Explicit time-zone and locale configuration for grouping and composition.
///
/// Passed into the core instead of reading ambient process state, so the
/// same input always produces the same groups and instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub zone: Tz,
    pub locale: Locale,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            zone: Tz::UTC,
            locale: Locale::en_US,
        }
    }
}

impl ScheduleSettings {
    /// Resolves settings once from `TZ` and `LANG`, defaulting to UTC / en_US.
    pub fn from_env() -> Self {
        let zone = std::env::var("TZ")
            .ok()
            .and_then(|tz| tz.parse().ok())
            .unwrap_or(Tz::UTC);
        let locale = std::env::var("LANG")
            .ok()
            .and_then(|lang| {
                let tag = lang.split(['.', '@']).next().unwrap_or("");
                Locale::try_from(tag).ok()
            })
            .unwrap_or(Locale::en_US);
        Self { zone, locale }
    }

    /// Formats a calendar date as a long display label, e.g. "January 20, 2025".
    pub fn long_date(&self, date: NaiveDate) -> String {
        date.format_localized("%B %-d, %Y", self.locale).to_string()
    }

    /// Human-readable name for the configured zone, evaluated at the current
    /// instant (the abbreviation can change across DST transitions).
    pub fn zone_label(&self) -> String {
        zone_label_at(self.zone, Utc::now())
    }
}

/// Derives a display name for a zone at a given instant.
///
/// Uses the zone's abbreviation (`EST`, `CET`, ...) when it is a real name;
/// abbreviations that degenerate to a raw offset (`+0545`, `GMT-3`) fall back
/// to a humanized form of the IANA identifier ("America/New_York" becomes
/// "New York Time"). Never fails; an unusable identifier yields `""` and the
/// caller simply omits the annotation.
pub fn zone_label_at(zone: Tz, at: DateTime<Utc>) -> String {
    let abbrev = at.with_timezone(&zone).format("%Z").to_string();
    if !abbrev.is_empty() && abbrev.chars().all(|c| c.is_ascii_alphabetic()) {
        return abbrev;
    }

    let segment = zone.name().rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return String::new();
    }
    format!("{} Time", segment.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn winter_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap()
    }

    mod zone_labels {
        use super::*;

        #[test]
        fn abbreviation_used_when_alphabetic() {
            assert_eq!(
                zone_label_at(Tz::America__New_York, winter_noon()),
                "EST"
            );
        }

        #[test]
        fn dst_changes_abbreviation() {
            let summer = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
            assert_eq!(zone_label_at(Tz::America__New_York, summer), "EDT");
        }

        #[test]
        fn offset_only_zone_falls_back_to_identifier() {
            assert_eq!(
                zone_label_at(Tz::Asia__Kathmandu, winter_noon()),
                "Kathmandu Time"
            );
        }

        #[test]
        fn fallback_replaces_underscores() {
            assert_eq!(
                zone_label_at(Tz::Australia__Lord_Howe, winter_noon()),
                "Lord Howe Time"
            );
        }

        #[test]
        fn utc_keeps_its_name() {
            assert_eq!(zone_label_at(Tz::UTC, winter_noon()), "UTC");
        }
    }

    mod long_dates {
        use super::*;

        #[test]
        fn english_long_date() {
            let settings = ScheduleSettings::default();
            let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
            assert_eq!(settings.long_date(date), "January 20, 2025");
        }

        #[test]
        fn single_digit_day_not_padded() {
            let settings = ScheduleSettings::default();
            let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
            assert_eq!(settings.long_date(date), "March 5, 2025");
        }

        #[test]
        fn locale_changes_month_name() {
            let settings = ScheduleSettings {
                zone: Tz::UTC,
                locale: Locale::fr_FR,
            };
            let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
            assert!(
                settings.long_date(date).contains("janvier"),
                "got {}",
                settings.long_date(date)
            );
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn default_is_utc_english() {
            let settings = ScheduleSettings::default();
            assert_eq!(settings.zone, Tz::UTC);
            assert_eq!(settings.locale, Locale::en_US);
        }
    }
}
