//! AppID directory for MiWear firmware applications
//!
//! Compiled-in mapping between application names and their 16-bit ids,
//! as assigned by the firmware's app enum. Read-only for the life of the
//! process.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Known applications, sorted by id
const APPS: &[(&str, u16)] = &[
    ("NONE", 0x0000),
    ("LAUNCHER", 0x0001),
    ("WATCHFACE", 0x0002),
    ("PRESSURE", 0x0003),
    ("BREATH", 0x0004),
    ("HEARTRATE", 0x0005),
    ("ACTIVITY", 0x0006),
    ("ACTIVITY_RECORD", 0x0007),
    ("ACTIVITY_RECORD_BACKUP", 0x0008),
    ("SPORTS", 0x0009),
    ("CLOCK_STOPWATCH", 0x000A),
    ("CLOCK_TIMER", 0x000B),
    ("SLEEP", 0x000C),
    ("ENERGY", 0x000D),
    ("OXYGEN", 0x000E),
    ("CLOCK", 0x000F),
    ("HOME", 0x0010),
    ("SETUPWIZARD", 0x0011),
    ("EXAMPLE", 0x0012),
    ("ACTIVITIES", 0x0013),
    ("NOTIFICATIONS", 0x0014),
    ("MEDIA", 0x0015),
    ("SETTINGS", 0x0016),
    ("DEMO", 0x0017),
    ("COMPASS", 0x0018),
    ("OTA", 0x0019),
    ("FLASHLIGHT", 0x001A),
    ("CALENDAR", 0x001B),
    ("REMOTE_CAMERA", 0x001C),
    ("SPORTS_RECORD", 0x001D),
    ("ALIPAY", 0x001E),
    ("WOMENHEALTH", 0x001F),
    ("CHRONOGRAPH", 0x0020),
    ("WEATHER", 0x0021),
    ("SYSTEM", 0x0022),
    ("PHONE", 0x0023),
    ("REMINDER", 0x0024),
    ("WXPAY", 0x0025),
    ("TIMER", 0x0026),
    ("FIND_PHONE", 0x0027),
    ("ALARM", 0x0028),
    ("RECORDER", 0x0029),
    ("BAROMETER", 0x002A),
    ("NFCCARD", 0x002B),
    ("DEBUG", 0x002C),
    ("VOICE_ASSISTANT", 0x002D),
    ("CONTACT", 0x002E),
    ("SPORTS_COURSE", 0x002F),
    ("TEMPERATURE", 0x0030),
    ("SHARE", 0x0031),
    ("DEMONSTRATE", 0x0032),
    ("EASTER_EGG", 0x0033),
    ("BLOOD_PRESSURE", 0x0034),
    ("ECG", 0x0035),
    ("VITALITY_VALUE", 0x0036),
    ("JS", 0x0037),
    ("LUA", 0x0038),
    ("TRAINING_STATUS", 0x0039),
    ("TOMATO_TIMER", 0x003A),
    ("WORLD_CLOCK", 0x003B),
    ("TODO_LIST", 0x003C),
    ("PHONE_MUTE", 0x003D),
    ("FALL", 0x003E),
    ("MIJIA", 0x003F),
    ("LPA", 0x0040),
    ("CHECK_TOOL", 0x0041),
    ("BLOOD_SUGAR", 0x0042),
    ("INTERCONNECT", 0x0043),
    ("SPORTS_TRAINING", 0x0044),
    ("PERPETUAL_CALENDAR", 0x0045),
    ("SMS", 0x0046),
    ("AMAP", 0x0047),
    ("NAVIGATION", 0x0048),
    ("SPORTS_LACTATE", 0x0049),
    ("BLOOD_PRESSURE_RESEARCH", 0x004A),
    ("AF_RESEARCH", 0x004B),
    ("SLEEP_RESEARCH", 0x004C),
    ("NS_CONTROLLER", 0x004D),
    ("WALKIE_TALKIE", 0x004E),
    ("CONTROL_CENTER", 0x004F),
    ("CTA_TOOL", 0x0050),
    ("RESEARCH", 0x0051),
    ("FUSION_CENTER", 0x0052),
    ("CAR_CONTROL", 0x0053),
    ("AI_WATCHFACE", 0x0054),
    ("CHECKUP", 0x0055),
    ("HEALTH_RESEARCH", 0x0056),
    ("TODAY_HEALTH", 0x0057),
    ("WF_AUTOTEST", 0x0058),
    ("ACCESSORY_SPEAKER", 0x0059),
    ("DOORLOCK", 0x005A),
    ("FINDMY", 0x005B),
    ("OSA_SCREENING", 0x005C),
    ("CALORIE", 0x005D),
    ("UV", 0x005E),
    ("HEALTH_SUMMARY", 0x005F),
    ("WF_JUMP_APP", 0x00FF),
    ("OFFLOAD", 0x1000),
];

static NAME_TO_ID: LazyLock<HashMap<&'static str, u16>> =
    LazyLock::new(|| APPS.iter().copied().collect());

/// Resolve an app id to its directory name
pub fn lookup(app_id: u64) -> Option<&'static str> {
    let id = u16::try_from(app_id).ok()?;
    APPS.binary_search_by_key(&id, |&(_, id)| id)
        .ok()
        .map(|idx| APPS[idx].0)
}

/// Resolve an app id to its name, or "Unknown(appid=N)" if unmapped
pub fn app_name(app_id: u64) -> String {
    match lookup(app_id) {
        Some(name) => name.to_string(),
        None => unknown_label(app_id),
    }
}

/// Placeholder label for ids that have no directory entry
pub fn unknown_label(app_id: u64) -> String {
    format!("Unknown(appid={})", app_id)
}

/// Resolve an app name to its id
pub fn app_id(name: &str) -> Option<u16> {
    NAME_TO_ID.get(name).copied()
}

/// Whether the directory has an entry for `app_id`
pub fn is_known(app_id: u64) -> bool {
    lookup(app_id).is_some()
}

/// All `(name, id)` entries in ascending id order
pub fn entries() -> impl Iterator<Item = (&'static str, u16)> {
    APPS.iter().copied()
}

/// Number of directory entries
pub fn len() -> usize {
    APPS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_apps() {
        assert_eq!(lookup(0x0000), Some("NONE"));
        assert_eq!(lookup(0x0001), Some("LAUNCHER"));
        assert_eq!(lookup(0x000F), Some("CLOCK"));
        assert_eq!(lookup(0x0016), Some("SETTINGS"));
        assert_eq!(lookup(0x005F), Some("HEALTH_SUMMARY"));
    }

    #[test]
    fn test_sparse_high_ids() {
        assert_eq!(lookup(0x00FF), Some("WF_JUMP_APP"));
        assert_eq!(lookup(0x1000), Some("OFFLOAD"));
        assert_eq!(lookup(0x0060), None);
        assert_eq!(lookup(0x0FFF), None);
    }

    #[test]
    fn test_unknown_app_name_is_decimal() {
        assert_eq!(app_name(0x9999), "Unknown(appid=39321)");
        assert_eq!(app_name(70_000), "Unknown(appid=70000)");
    }

    #[test]
    fn test_name_to_id() {
        assert_eq!(app_id("CLOCK"), Some(0x000F));
        assert_eq!(app_id("OFFLOAD"), Some(0x1000));
        assert_eq!(app_id("clock"), None);
        assert_eq!(app_id("NOT_AN_APP"), None);
    }

    #[test]
    fn test_table_sorted_and_unique() {
        assert!(APPS.windows(2).all(|w| w[0].1 < w[1].1));
        assert_eq!(NAME_TO_ID.len(), APPS.len());
    }

    #[test]
    fn test_directory_covers_declared_range() {
        assert_eq!(len(), 98);
        for id in 0x0000..=0x005Fu64 {
            assert!(is_known(id), "missing id 0x{:04X}", id);
        }
    }

    #[test]
    fn test_entries_round_trip() {
        for (name, id) in entries() {
            assert_eq!(app_id(name), Some(id));
            assert_eq!(app_name(u64::from(id)), name);
        }
    }
}
