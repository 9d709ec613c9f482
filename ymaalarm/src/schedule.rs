//! Calcul de la prochaine occurrence d'une heure murale
//!
//! L'alarme vise HH:MM:00.000 en heure locale : aujourd'hui si cet instant
//! n'est pas encore passé, sinon demain.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use ymastore::{HOURS_MAX, MINUTES_MAX};

/// Prochaine occurrence de `hours:minutes` après `now`, en millisecondes epoch
///
/// Retourne `None` si les composantes sont hors domaine ou si l'instant
/// local ne peut pas être résolu.
pub fn next_occurrence(hours: u32, minutes: u32, now: DateTime<Local>) -> Option<i64> {
    if hours > HOURS_MAX || minutes > MINUTES_MAX {
        return None;
    }

    let today = now.date_naive().and_hms_opt(hours, minutes, 0)?;
    let mut candidate = resolve_local(today)?;

    if candidate.timestamp_millis() < now.timestamp_millis() {
        let tomorrow = today + Duration::days(1);
        candidate = resolve_local(tomorrow)?;
    }

    Some(candidate.timestamp_millis())
}

/// Résout un instant naïf en heure locale
///
/// Heure ambiguë (retour à l'heure d'hiver) : la première occurrence gagne.
/// Heure inexistante (passage à l'heure d'été) : décalage d'une heure.
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(first, _) => Some(first),
        chrono::LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_future_time_is_scheduled_today() {
        let now = Local::now();
        // Une heure dans le futur proche (en évitant le passage de minuit)
        if now.hour() < 23 {
            let at = next_occurrence(now.hour() + 1, 0, now).unwrap();
            assert!(at > now.timestamp_millis());
            assert!(at - now.timestamp_millis() <= 3_600_000);
        }
    }

    #[test]
    fn test_past_time_is_scheduled_tomorrow() {
        let now = Local::now();
        if now.hour() > 0 {
            let at = next_occurrence(now.hour() - 1, 0, now).unwrap();
            assert!(at > now.timestamp_millis());
            // Strictement plus de 12h devant : c'est bien demain
            assert!(at - now.timestamp_millis() > 12 * 3_600_000);
        }
    }

    #[test]
    fn test_out_of_domain_components_are_rejected() {
        let now = Local::now();
        assert!(next_occurrence(24, 0, now).is_none());
        assert!(next_occurrence(0, 60, now).is_none());
    }

    #[test]
    fn test_seconds_are_zeroed() {
        let now = Local::now();
        let at = next_occurrence(12, 30, now).unwrap();
        let dt = Local.timestamp_millis_opt(at).unwrap();
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.hour(), 12);
    }
}
