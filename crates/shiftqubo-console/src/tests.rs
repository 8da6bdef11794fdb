use super::*;

fn visitor(event: &str) -> EventVisitor {
    EventVisitor {
        event: Some(event.to_string()),
        ..EventVisitor::default()
    }
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(250), "250ms");
    assert_eq!(format_duration_ms(1500), "1.50s");
    assert_eq!(format_duration_ms(125_000), "2m 5s");
}

#[test]
fn test_unknown_event_is_silent() {
    assert!(format_event(&visitor("sample key")).is_empty());
    assert!(format_event(&EventVisitor::default()).is_empty());
}

#[test]
fn test_pipeline_start_shows_dimensions() {
    let v = EventVisitor {
        staff: Some(7),
        days: Some(7),
        shifts: Some(3),
        variables: Some(147),
        ..visitor("pipeline_start")
    };
    let out = format_event(&v);
    assert!(out.contains("Scheduling"));
    assert!(out.contains("147"));
}

#[test]
fn test_gateway_start_shows_reads() {
    let v = EventVisitor {
        gateway: Some("remote".to_string()),
        environment: Some("testnet".to_string()),
        num_reads: Some(1000),
        annealing_time: Some(200),
        ..visitor("gateway_start")
    };
    let out = format_event(&v);
    assert!(out.contains("remote"));
    assert!(out.contains("testnet"));
    assert!(out.contains("1,000"));
    assert!(out.contains("anneal"));
    assert!(!out.contains("µs"));
}

#[test]
fn test_pipeline_end_reports_failure() {
    let v = EventVisitor {
        failure: Some("no assignments recovered".to_string()),
        energy: Some(20.0),
        ..visitor("pipeline_end")
    };
    let out = format_event(&v);
    assert!(out.contains("Decode failed"));
    assert!(out.contains("20.0000"));
}

#[test]
fn test_pipeline_end_reports_feasibility() {
    let feasible = EventVisitor {
        feasible: Some(true),
        assignments: Some(21),
        ..visitor("pipeline_end")
    };
    assert!(format_event(&feasible).contains("FEASIBLE"));
    assert!(!format_event(&feasible).contains("INFEASIBLE"));

    let infeasible = EventVisitor {
        feasible: Some(false),
        ..visitor("pipeline_end")
    };
    assert!(format_event(&infeasible).contains("INFEASIBLE"));
}

#[test]
fn test_decode_fallback_names_conventions() {
    let v = EventVisitor {
        primary: Some("staff-major".to_string()),
        convention: Some("shift-major".to_string()),
        ..visitor("decode_fallback")
    };
    let out = format_event(&v);
    assert!(out.contains("staff-major"));
    assert!(out.contains("shift-major"));
}
