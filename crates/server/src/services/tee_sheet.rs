//! Tee sheet slot grid.
//!
//! The course runs ten-minute tee intervals from 06:00 to 17:50, 72 slots a
//! day. Availability is computed against the confirmed bookings for the day;
//! the grid itself never changes.

use serde::Serialize;

/// First tee time of the day.
const FIRST_SLOT_MINUTES: u32 = 6 * 60;

/// Minutes between consecutive tee times.
const SLOT_INTERVAL_MINUTES: u32 = 10;

/// Tee times per day (06:00 through 17:50).
pub const SLOTS_PER_DAY: usize = 72;

/// One entry on the tee sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeeSlot {
    /// Tee time as "HH:MM".
    pub time: String,
    /// Whether the slot is free to book.
    pub available: bool,
}

/// All tee times for a day, in order, as "HH:MM" strings.
#[must_use]
pub fn all_slots() -> Vec<String> {
    (0..SLOTS_PER_DAY)
        .map(|i| format_slot(FIRST_SLOT_MINUTES + SLOT_INTERVAL_MINUTES * i as u32))
        .collect()
}

/// Whether `time` names a tee time on the grid.
#[must_use]
pub fn is_valid_slot(time: &str) -> bool {
    let Some((hours, minutes)) = parse_clock(time) else {
        return false;
    };

    let total = hours * 60 + minutes;
    total >= FIRST_SLOT_MINUTES
        && total < FIRST_SLOT_MINUTES + SLOT_INTERVAL_MINUTES * SLOTS_PER_DAY as u32
        && total % SLOT_INTERVAL_MINUTES == 0
}

/// The tee sheet for a day: every slot with its availability, given the
/// confirmed slots already taken.
#[must_use]
pub fn sheet(taken: &[String]) -> Vec<TeeSlot> {
    all_slots()
        .into_iter()
        .map(|time| {
            let available = !taken.contains(&time);
            TeeSlot { time, available }
        })
        .collect()
}

fn format_slot(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse a canonical "HH:MM" clock string. Also used to validate event
/// start times.
#[must_use]
pub fn parse_clock(time: &str) -> Option<(u32, u32)> {
    let (h, m) = time.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let slots = all_slots();
        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert_eq!(slots.first().map(String::as_str), Some("06:00"));
        assert_eq!(slots.last().map(String::as_str), Some("17:50"));
    }

    #[test]
    fn test_valid_slots() {
        assert!(is_valid_slot("06:00"));
        assert!(is_valid_slot("12:30"));
        assert!(is_valid_slot("17:50"));
    }

    #[test]
    fn test_invalid_slots() {
        // Off-grid times
        assert!(!is_valid_slot("05:50"));
        assert!(!is_valid_slot("18:00"));
        assert!(!is_valid_slot("06:05"));
        // Malformed
        assert!(!is_valid_slot("6:00"));
        assert!(!is_valid_slot("0600"));
        assert!(!is_valid_slot("25:00"));
        assert!(!is_valid_slot(""));
    }

    #[test]
    fn test_sheet_marks_taken_slots() {
        let taken = vec!["06:00".to_owned(), "09:10".to_owned()];
        let sheet = sheet(&taken);

        assert_eq!(sheet.len(), SLOTS_PER_DAY);
        assert!(!sheet[0].available);
        assert!(sheet[1].available);
        assert!(
            sheet
                .iter()
                .filter(|slot| !slot.available)
                .map(|slot| slot.time.as_str())
                .eq(["06:00", "09:10"])
        );
    }
}
