mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeApi, Reply, fixed_day, numbered_report, people_report, session};
use report_client::alerts::AlertLevel;
use report_client::{Connectivity, ReportError, TableRender};

#[tokio::test]
async fn start_loads_questions_and_renders_empty_table() {
    let mut session = session(FakeApi::new(&["EMR:", "TRIR:"]));
    session.start().await;

    assert_eq!(session.connectivity(), &Connectivity::Healthy);
    assert_eq!(session.questions(), ["EMR:", "TRIR:"]);
    let renderer = session.renderer();
    assert_eq!(renderer.questions.len(), 2);
    assert!(!renderer.can_generate);
    assert_eq!(renderer.tables.last(), Some(&TableRender::Empty(None)));
    assert!(renderer.alerts.is_empty());
    assert!(!renderer.loading);
}

#[tokio::test]
async fn unhealthy_api_shows_persistent_warning() {
    let mut api = FakeApi::new(&["EMR:"]);
    api.health_status = Some("unhealthy");
    let mut session = session(api);
    session.start().await;

    assert!(matches!(session.connectivity(), Connectivity::Degraded(_)));
    let alert = &session.renderer().alerts[0];
    assert_eq!(alert.level, AlertLevel::Warning);
    assert!(alert.is_persistent());
    assert!(alert.message.starts_with("Database connection issue"));
    // The session keeps going with whatever metadata loaded
    assert_eq!(session.questions().len(), 1);
}

#[tokio::test]
async fn unreachable_api_and_failed_metadata_continue_with_no_questions() {
    let mut api = FakeApi::new(&["EMR:"]);
    api.health_status = None;
    api.metadata_fails = true;
    let mut session = session(api);
    session.start().await;

    assert!(matches!(session.connectivity(), Connectivity::Unreachable(_)));
    assert!(session.questions().is_empty());
    let renderer = session.renderer();
    assert_eq!(renderer.alerts[0].message, "Cannot connect to API server.");
    assert_eq!(
        renderer.alerts[1].message,
        "Error loading questions: HTTP 500"
    );
    assert_eq!(renderer.alerts[1].dismiss_after, Some(Duration::from_secs(5)));
    assert!(renderer.questions.is_empty());
}

#[tokio::test]
async fn generate_with_empty_selection_never_calls_network() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(people_report()));
    let mut session = session(api);
    session.start().await;

    session.toggle("EMR:");
    session.generate().await.unwrap();
    let before = session.snapshot().cloned();

    session.clear_all();
    let err = session.generate().await.unwrap_err();
    assert!(matches!(err, ReportError::EmptySelection));
    assert_eq!(session.api().calls(), 1);
    assert_eq!(session.snapshot().cloned(), before);
    let alert = session.renderer().last_alert();
    assert_eq!(alert.level, AlertLevel::Warning);
    assert_eq!(alert.message, "Please select at least one question");
}

#[tokio::test]
async fn generate_sends_selection_in_pick_order() {
    let api = FakeApi::new(&["EMR:", "TRIR:", "Fatalities"]);
    api.queue(Reply::Report(people_report()));
    let mut session = session(api);
    session.start().await;

    session.toggle("Fatalities");
    session.toggle("EMR:");
    assert_eq!(session.renderer().selected, 2);
    assert!(session.renderer().can_generate);

    session.generate().await.unwrap();
    assert_eq!(
        *session.api().last_request.lock().unwrap(),
        vec!["Fatalities".to_string(), "EMR:".to_string()]
    );
}

#[tokio::test]
async fn successful_generate_resets_page_and_announces_rows() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(25)));
    api.queue(Reply::Report(numbered_report(40)));
    let mut session = session(api);
    session.start().await;
    session.select_all();

    assert_eq!(session.generate().await.unwrap(), 25);
    session.next_page();
    session.next_page();
    assert_eq!(session.page().current_page(), 3);

    assert_eq!(session.generate().await.unwrap(), 40);
    assert_eq!(session.page().current_page(), 1);

    let renderer = session.renderer();
    assert!(renderer.export_available);
    assert_eq!(
        renderer.last_alert().message,
        "Report generated successfully with 40 rows"
    );
    assert_eq!(renderer.last_alert().level, AlertLevel::Success);
}

#[tokio::test]
async fn failed_generate_keeps_previous_report() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(12)));
    api.queue(Reply::Failure {
        status: 400,
        detail: Some("At least one question must be selected".to_string()),
    });
    api.queue(Reply::Failure {
        status: 502,
        detail: None,
    });
    api.queue(Reply::Unreachable);
    let mut session = session(api);
    session.start().await;
    session.select_all();

    session.generate().await.unwrap();
    session.next_page();
    let before = session.snapshot().cloned();

    session.generate().await.unwrap_err();
    assert_eq!(
        session.renderer().last_alert().message,
        "Error generating report: At least one question must be selected"
    );
    session.generate().await.unwrap_err();
    assert_eq!(
        session.renderer().last_alert().message,
        "Error generating report: HTTP 502"
    );
    session.generate().await.unwrap_err();
    assert_eq!(session.renderer().last_alert().level, AlertLevel::Error);

    assert_eq!(session.snapshot().cloned(), before);
    assert_eq!(session.page().current_page(), 2);
    assert!(!session.renderer().loading);
}

#[tokio::test]
async fn dropped_request_turns_loading_off() {
    let api = FakeApi::new(&["EMR:"]);
    api.hang.store(true, Ordering::SeqCst);
    api.queue(Reply::Report(numbered_report(3)));
    let mut session = session(api);
    session.start().await;
    session.select_all();

    let pending = tokio::time::timeout(Duration::from_millis(20), session.generate()).await;
    assert!(pending.is_err());
    assert!(!session.renderer().loading);
    assert_eq!(session.renderer().loading_changes, 4);
    assert!(session.snapshot().is_none());

    session.api().hang.store(false, Ordering::SeqCst);
    assert_eq!(session.generate().await.unwrap(), 3);
}

#[tokio::test]
async fn two_row_report_pages_one_row_at_a_time() {
    let api = FakeApi::new(&["age", "name"]);
    api.queue(Reply::Report(people_report()));
    let mut session = session(api);
    session.start().await;
    session.select_all();
    session.generate().await.unwrap();
    session.set_page_size(1).unwrap();

    let TableRender::Table(first) = session.render() else {
        panic!("expected a table");
    };
    let headers: Vec<&str> = first.headers.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(headers, ["Age", "name"]);
    assert_eq!(first.headers[0].key, "age");
    assert_eq!(first.rows.len(), 1);
    assert_eq!(first.rows[0][0].text, "30");
    assert!(first.rows[0][0].numeric);
    assert_eq!(first.rows[0][1].text, "Alice");
    assert!(!first.rows[0][1].numeric);

    assert!(session.next_page());
    let TableRender::Table(second) = session.render() else {
        panic!("expected a table");
    };
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0][0].text, "");
    assert!(!second.rows[0][0].numeric);
    assert_eq!(second.rows[0][1].text, "Bob");
    assert!(!second.rows[0][1].numeric);
    assert_eq!(second.summary.to_string(), "Page 2 of 2 (2 total rows)");
}

#[tokio::test]
async fn next_page_stops_at_last_page() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(25)));
    let mut session = session(api);
    session.start().await;
    session.select_all();
    session.generate().await.unwrap();

    assert!(session.next_page());
    assert!(session.next_page());
    assert!(!session.next_page());
    assert_eq!(session.page().current_page(), 3);
    assert!(session.previous_page());
    assert_eq!(session.page().current_page(), 2);
}

#[tokio::test]
async fn page_size_change_returns_to_first_page() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(60)));
    let mut session = session(api);
    session.start().await;
    session.select_all();
    session.generate().await.unwrap();
    session.next_page();
    session.next_page();

    session.set_page_size(25).unwrap();
    assert_eq!(session.page().current_page(), 1);
    assert_eq!(session.page().page_size(), 25);

    let err = session.set_page_size(0).unwrap_err();
    assert!(matches!(err, ReportError::InvalidPageSize(0)));
    assert_eq!(session.page().page_size(), 25);
}

#[tokio::test]
async fn paging_without_report_is_a_no_op() {
    let mut session = session(FakeApi::new(&[]));
    session.start().await;
    assert!(!session.next_page());
    assert!(!session.previous_page());
    assert_eq!(session.renderer().questions.len(), 0);
}

#[tokio::test]
async fn export_writes_full_report_with_dated_name() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(25)));
    let mut session = session(api);
    session.start().await;
    session.select_all();
    session.generate().await.unwrap();
    session.next_page();

    let filename = session.export().unwrap();
    assert_eq!(
        filename,
        format!("FirstVerify_Report_{}.xlsx", fixed_day().format("%Y-%m-%d"))
    );
    let (written, bytes) = &session.sink().files[0];
    assert_eq!(written, &filename);
    assert!(bytes.starts_with(b"PK"));
    assert_eq!(
        session.renderer().last_alert().message,
        "Report exported as FirstVerify_Report_2024-03-01.xlsx"
    );

    // Same day, same name
    assert_eq!(session.export().unwrap(), filename);
}

#[tokio::test]
async fn export_without_rows_produces_no_file() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(0)));
    let mut session = session(api);
    session.start().await;

    assert!(matches!(session.export(), Err(ReportError::NothingToExport)));

    session.select_all();
    session.generate().await.unwrap();
    assert!(matches!(session.export(), Err(ReportError::NothingToExport)));
    assert!(session.sink().files.is_empty());
    let alert = session.renderer().last_alert();
    assert_eq!(alert.level, AlertLevel::Warning);
    assert_eq!(alert.message, "No data to export");
    assert!(matches!(
        session.renderer().tables.last(),
        Some(TableRender::Empty(Some(_)))
    ));
}

#[tokio::test]
async fn export_write_failure_is_reported() {
    let api = FakeApi::new(&["EMR:"]);
    api.queue(Reply::Report(numbered_report(2)));
    let mut session = session(api);
    session.start().await;
    session.select_all();
    session.generate().await.unwrap();

    // Sink becomes read-only after the report arrived
    session.sink_mut().fail = true;

    let err = session.export().unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
    let alert = session.renderer().last_alert();
    assert_eq!(alert.level, AlertLevel::Error);
    assert!(alert.message.starts_with("Error exporting: I/O error"));
}
