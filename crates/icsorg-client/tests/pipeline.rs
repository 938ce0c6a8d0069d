//! End-to-end conversion tests.
//!
//! Calendars use floating times so results do not depend on the local zone.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use icsorg_client::cli::Cli;
use icsorg_client::config::{Config, Vars};
use icsorg_client::error::ClientError;
use icsorg_client::pipeline;

const CALENDAR: &str = "BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//icsorg//tests//EN\r
BEGIN:VEVENT\r
UID:standup-1@example.com\r
SUMMARY:Standup\r
DTSTART:20240108T090000\r
DTEND:20240108T091500\r
ORGANIZER;CN=Jane Doe:mailto:jane.doe@example.com\r
ATTENDEE;CN=Jane Doe;PARTSTAT=ACCEPTED:mailto:jane.doe@example.com\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:retro-1@example.com\r
SUMMARY:Retro\r
DTSTART:20240109T160000\r
DTEND:20240109T170000\r
RRULE:FREQ=DAILY;COUNT=3\r
STATUS:CONFIRMED\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:old-1@example.com\r
SUMMARY:Long ago\r
DTSTART:20230101T090000\r
DTEND:20230101T100000\r
END:VEVENT\r
END:VCALENDAR\r
";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn config(dir: &Path, ics_file: Option<PathBuf>) -> Config {
    let cli = Cli {
        author: Some("Jane Doe".to_string()),
        input_file: ics_file.map(|p| p.display().to_string()),
        output_file: Some(dir.join("calendar.org").display().to_string()),
        roam_path: Some(dir.join("roam").display().to_string()),
        daily_path: Some(dir.join("daily").display().to_string()),
        ..Default::default()
    };
    Config::resolve(&cli, &Vars::new(), &Vars::new(), dir.join("rc"), now()).unwrap()
}

fn setup() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let ics = dir.path().join("calendar.ics");
    std::fs::write(&ics, CALENDAR).unwrap();
    let config = config(dir.path(), Some(ics));
    (dir, config)
}

#[tokio::test]
async fn converts_events_and_occurrences() {
    let (dir, config) = setup();

    let entries = pipeline::run(&config).await.unwrap();
    assert_eq!(entries, 4);

    let org = std::fs::read_to_string(dir.path().join("calendar.org")).unwrap();
    assert!(org.starts_with("#+TITLE:       Calendar\n#+AUTHOR:      Jane Doe\n"));
    assert!(!org.contains("Long ago"));

    let standup = org.find("* Standup\n").unwrap();
    let retro = org.find("* Retro\n").unwrap();
    assert!(standup < retro, "single events come before occurrences");
    assert_eq!(org.matches("* Retro\n").count(), 3);

    assert!(org.contains(":ATTENDEES:     [[Jane Doe][Jane Doe]] (ACCEPTED)\n"));
    assert!(org.contains(":ORGANIZER:     [[Jane Doe][Jane Doe]]\n"));
    assert!(org.contains("<2024-01-08 Mon 09:00-09:15>\n"));
    assert!(org.contains("<2024-01-11 Thu 16:00-17:00>\n"));
    assert_eq!(org.matches(":STATUS:        CONFIRMED\n").count(), 3);
}

#[tokio::test]
async fn writes_notes_and_daily_logs() {
    let (dir, config) = setup();

    pipeline::run(&config).await.unwrap();

    let note = std::fs::read_to_string(dir.path().join("roam/20240108090000-standup.org")).unwrap();
    assert!(note.contains(":START_DATE:    <2024-01-08 Mon 09:00>\n"));
    assert!(note.ends_with("#+title: Standup\n"));
    assert!(dir.path().join("roam/20240110040000-retro.org").exists());

    let daily = std::fs::read_to_string(dir.path().join("daily/2024-01-08.org")).unwrap();
    assert!(daily.contains("#+title: 2024-01-08\n* Daily Log for: 2024-01-08\n"));
    assert!(daily.contains("][Standup]]\n  <2024-01-08 Mon 09:00-09:15>\n"));

    for day in ["2024-01-09", "2024-01-10", "2024-01-11"] {
        let path = dir.path().join(format!("daily/{}.org", day));
        let daily = std::fs::read_to_string(path).unwrap();
        assert_eq!(daily.matches("][Retro]]").count(), 1);
    }
}

#[tokio::test]
async fn daily_logs_accumulate_across_runs() {
    let (dir, config) = setup();

    pipeline::run(&config).await.unwrap();
    pipeline::run(&config).await.unwrap();

    let daily = std::fs::read_to_string(dir.path().join("daily/2024-01-08.org")).unwrap();
    assert_eq!(daily.matches(":PROPERTIES:").count(), 1);
    assert_eq!(daily.matches("][Standup]]").count(), 2);

    // The aggregate file is rewritten, not appended.
    let org = std::fs::read_to_string(dir.path().join("calendar.org")).unwrap();
    assert_eq!(org.matches("* Standup\n").count(), 1);
}

#[tokio::test]
async fn ids_link_notes_and_daily_entries() {
    let (dir, config) = setup();

    pipeline::run(&config).await.unwrap();

    let note = std::fs::read_to_string(dir.path().join("roam/20240108090000-standup.org")).unwrap();
    let id_line = note.lines().find(|l| l.starts_with(":ID:")).unwrap();
    let id = id_line.trim_start_matches(":ID:").trim();

    let daily = std::fs::read_to_string(dir.path().join("daily/2024-01-08.org")).unwrap();
    assert!(daily.contains(&format!("- [[id:{}][Standup]]", id)));

    let org = std::fs::read_to_string(dir.path().join("calendar.org")).unwrap();
    assert!(org.contains(id));
}

#[tokio::test]
async fn missing_source_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), None);

    let err = pipeline::run(&config).await.unwrap_err();

    assert!(matches!(err, ClientError::Fetch(_)));
    assert!(err.to_string().contains("source file not given"));
    assert!(!dir.path().join("calendar.org").exists());
}

#[tokio::test]
async fn missing_org_file_is_rejected_first() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli::default();
    let config = Config::resolve(&cli, &Vars::new(), &Vars::new(), dir.path().join("rc"), now())
        .unwrap();

    let err = pipeline::run(&config).await.unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[tokio::test]
async fn unwritable_org_file_is_a_render_error() {
    let (dir, mut config) = setup();
    config.org_file = dir.path().join("no/such/dir/calendar.org").display().to_string();

    let err = pipeline::run(&config).await.unwrap_err();
    assert!(err.to_string().starts_with("createOrgFile: "));
}
