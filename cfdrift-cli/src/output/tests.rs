use cfdrift_core::AppCount;

use crate::output;
use crate::reconcile::CountReport;

fn report(cloud_controller: AppCount) -> CountReport {
    CountReport {
        foundation: "prod-east".to_string(),
        cloud_controller,
        database: 4242,
    }
}

#[test]
fn text_renders_the_result_line() {
    let rendered = output::text(&report(AppCount::Known(42)));
    assert_eq!(
        rendered,
        "[Foundation prod-east] CloudController: 42, Database: 4242"
    );
}

#[test]
fn text_renders_unknown_remote_count() {
    let rendered = output::text(&report(AppCount::Unknown));
    assert_eq!(
        rendered,
        "[Foundation prod-east] CloudController: unknown, Database: 4242"
    );
}

#[test]
fn json_uses_numbers_for_known_counts() {
    let rendered = output::json(&report(AppCount::Known(42)), false).unwrap();
    assert_eq!(
        rendered,
        r#"{"foundation":"prod-east","cloud_controller":42,"database":4242}"#
    );
}

#[test]
fn json_uses_null_for_unknown_counts() {
    let rendered = output::json(&report(AppCount::Unknown), false).unwrap();
    assert_eq!(
        rendered,
        r#"{"foundation":"prod-east","cloud_controller":null,"database":4242}"#
    );
}

#[test]
fn pretty_json_is_multiline() {
    let rendered = output::json(&report(AppCount::Known(1)), true).unwrap();
    assert!(rendered.contains('\n'));
}
