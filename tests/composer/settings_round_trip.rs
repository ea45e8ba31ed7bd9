#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::settings_files;
use composer::SettingsDocument;

// ============================================================================
// SETTINGS ROUND TRIP
// ============================================================================

#[test]
fn test_untouched_settings_files_round_trip() {
    for fixture in settings_files() {
        let document = SettingsDocument::parse(&fixture.text).unwrap();
        let rendered = document.render();
        assert_eq!(
            rendered,
            fixture.text,
            "Input: {}\nExpected: byte-identical output",
            fixture.name()
        );
    }
}

#[test]
fn test_frame_is_kept_verbatim() {
    for fixture in settings_files() {
        let document = SettingsDocument::parse(&fixture.text).unwrap();
        assert!(
            fixture.text.starts_with(document.prefix()),
            "Input: {}",
            fixture.name()
        );
        assert!(
            fixture.text.ends_with(document.postfix()),
            "Input: {}",
            fixture.name()
        );
        assert!(!document.config().is_empty());
    }
}
