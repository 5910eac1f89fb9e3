use bounce_extract::*;

// --- Normalizer ---

#[test]
fn test_normalize_mixed_line_endings() {
    let text = normalize_line_endings("a\nb\r\nc\n");
    assert_eq!(text, "a\r\nb\r\nc\r\n");
}

#[test]
fn test_normalize_empty() {
    assert_eq!(normalize_line_endings(""), "");
}

#[test]
fn test_normalize_already_crlf() {
    let text = "From: a@example.com\r\n\r\nbody\r\n";
    assert_eq!(normalize_line_endings(text), text);
}

#[test]
fn test_split_head_body() {
    let (head, body) = split_head_body("A: 1\r\nB: 2\r\n\r\nbody\r\n\r\nmore");
    assert_eq!(head, "A: 1\r\nB: 2");
    assert_eq!(body, "body\r\n\r\nmore");
}

#[test]
fn test_split_head_body_without_blank_line() {
    let (head, body) = split_head_body("A: 1\r\nB: 2");
    assert_eq!(head, "A: 1\r\nB: 2");
    assert_eq!(body, "");
}

// --- Header block parser ---

#[test]
fn test_canonical_field_name() {
    assert_eq!(canonical_field_name("CONTENT-TYPE"), "Content-type");
    assert_eq!(canonical_field_name("final-recipient"), "Final-recipient");
    assert_eq!(canonical_field_name(""), "");
}

#[test]
fn test_parse_simple_headers() {
    let map = parse_header_block("From: a@example.com\r\nSUBJECT: Hi there");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("From"), Some("a@example.com"));
    assert_eq!(map.get("subject"), Some("Hi there"));
}

#[test]
fn test_field_order_preserved() {
    let map = parse_header_block("Z-Last: 1\r\nA-First: 2");
    let names: Vec<&str> = map.fields().map(|(k, _)| k).collect();
    assert_eq!(names, ["Z-last", "A-first"]);
}

#[test]
fn test_first_occurrence_wins() {
    let map = parse_header_block("Subject: first\r\nSubject: second");
    assert_eq!(map.get("Subject"), Some("first"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_received_headers_concatenate() {
    let map = parse_header_block(
        "Received: from a by b\r\nSubject: x\r\nReceived: from c by d\r\nreceived: from e by f",
    );
    assert_eq!(
        map.get("Received"),
        Some("from a by b|from c by d|from e by f")
    );
}

#[test]
fn test_merge_policy_for_field() {
    assert_eq!(
        MergePolicy::for_field("Received"),
        MergePolicy::ConcatenateWithPipe
    );
    assert_eq!(MergePolicy::for_field("Subject"), MergePolicy::FirstWins);
}

#[test]
fn test_continuation_lines_fold() {
    let map = parse_header_block(
        "Content-Type: multipart/report;\r\n\treport-type=delivery-status;\r\n  boundary=\"abc\"",
    );
    assert_eq!(
        map.get("Content-Type"),
        Some("multipart/report; report-type=delivery-status; boundary=\"abc\"")
    );
}

#[test]
fn test_continuation_without_received() {
    let map = parse_header_block("Subject: part one\r\n part two\r\nTo: x@example.com");
    assert_eq!(map.get("Subject"), Some("part one part two"));
    assert_eq!(map.get("To"), Some("x@example.com"));
}

#[test]
fn test_continuation_of_received_appends_to_merged_value() {
    let map = parse_header_block("Received: from a\r\nReceived: from b\r\n\tby c");
    assert_eq!(map.get("Received"), Some("from a|from b by c"));
}

#[test]
fn test_continuation_of_dropped_duplicate_is_dropped() {
    let map = parse_header_block("Subject: kept\r\nSubject: dropped\r\n more dropped");
    assert_eq!(map.get("Subject"), Some("kept"));
}

#[test]
fn test_leading_continuation_ignored() {
    let map = parse_header_block("  orphan\r\nFrom: a@example.com");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("From"), Some("a@example.com"));
}

#[test]
fn test_field_without_space_after_colon_is_not_a_field() {
    let map = parse_header_block("From: a@example.com\r\nX-Odd:value");
    assert!(!map.contains("X-Odd"));
    assert_eq!(map.get("From"), Some("a@example.com X-Odd:value"));
}

#[test]
fn test_parse_header_lines_matches_block() {
    let lines = ["Status: 5.1.1", "Action: failed"];
    let from_lines = parse_header_lines(lines);
    let from_block = parse_header_block("Status: 5.1.1\r\nAction: failed");
    assert_eq!(from_lines, from_block);
}

#[test]
fn test_get_non_empty() {
    let map = parse_header_block("Subject: \r\nTo: x@example.com");
    assert_eq!(map.get("Subject"), Some(""));
    assert!(map.get_non_empty("Subject").is_none());
    assert_eq!(map.get_non_empty("To"), Some("x@example.com"));
}

// --- Content-Type and compliance ---

#[test]
fn test_content_type_parse() {
    let ct = ContentTypeInfo::parse(
        "multipart/report; Report-Type=delivery-status; boundary=\"abc123\"; charset=us-ascii",
    );
    assert_eq!(ct.mime_type, "multipart/report");
    assert_eq!(ct.report_type(), Some("delivery-status"));
    assert_eq!(ct.boundary(), Some("abc123"));
    assert_eq!(ct.parameter("charset"), Some("us-ascii"));
    assert!(ct.is_delivery_report());
}

#[test]
fn test_content_type_unquoted_boundary() {
    let ct = ContentTypeInfo::parse("multipart/report;report-type=delivery-status;boundary=xyz");
    assert_eq!(ct.boundary(), Some("xyz"));
    assert!(ct.is_delivery_report());
}

#[test]
fn test_content_type_case_insensitive_type() {
    let ct = ContentTypeInfo::parse("Multipart/Report; report-type=delivery-status; boundary=b");
    assert!(ct.is_delivery_report());
}

#[test]
fn test_not_delivery_report_variants() {
    let cases = [
        "text/plain; charset=utf-8",
        "multipart/report; report-type=disposition-notification; boundary=b",
        "multipart/report; report-type=delivery-status",
        "multipart/report; report-type=delivery-status; boundary=\"\"",
        "multipart/mixed; boundary=b",
    ];
    for value in &cases {
        assert!(
            !ContentTypeInfo::parse(value).is_delivery_report(),
            "{value} should not be a delivery report"
        );
    }
}

#[test]
fn test_is_compliant_on_header_map() {
    let compliant = parse_header_block(
        "From: MAILER-DAEMON@example.net\r\nContent-Type: multipart/report; report-type=delivery-status;\r\n\tboundary=\"b1\"",
    );
    assert!(is_compliant(&compliant));

    let plain = parse_header_block("From: a@example.com\r\nContent-Type: text/plain");
    assert!(!is_compliant(&plain));

    let missing = parse_header_block("From: a@example.com");
    assert!(!is_compliant(&missing));
}
