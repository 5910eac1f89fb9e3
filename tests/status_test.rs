use bounce_extract::*;

#[test]
fn test_parse_dotted_code() {
    let code = StatusCode::parse("5.1.1").unwrap();
    assert_eq!(
        code,
        StatusCode {
            class: 5,
            subject: 1,
            detail: 1
        }
    );
    assert_eq!(code.to_string(), "5.1.1");
}

#[test]
fn test_parse_code_with_trailing_text() {
    let code = StatusCode::parse(" 4.4.7 (delivery time expired)").unwrap();
    assert_eq!(code.to_string(), "4.4.7");
}

#[test]
fn test_parse_compact_code() {
    assert_eq!(StatusCode::parse("550").unwrap().to_string(), "5.5.0");
}

#[test]
fn test_parse_rejects_unknown_shapes() {
    for raw in ["9.9.9", "3.1.1", "5.8.1", "5.1.9", "abc", "", "5-1-1"] {
        assert!(StatusCode::parse(raw).is_none(), "{raw:?} should not parse");
    }
}

#[test]
fn test_find_code_in_diagnostic_text() {
    let code = StatusCode::find_in("550 5.1.1 <user@example.org>: No such user").unwrap();
    assert_eq!(code.to_string(), "5.1.1");
    assert!(StatusCode::find_in("550 No such user").is_none());
}

#[test]
fn test_find_code_after_reply_code_forms() {
    let cases = [
        "5.1.1 No such user",
        "550-5.1.1 The email account does not exist",
        "550 #5.1.1 RESOLVER.ADR.RecipNotFound",
        "  550 5.1.1",
    ];
    for text in cases {
        let code = StatusCode::find_in(text).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("5.1.1"), "{text}");
    }
}

#[test]
fn test_find_ignores_dotted_numbers_inside_text() {
    let cases = [
        "connect to 10.5.1.1[10.5.1.1]:25: Connection timed out",
        "host said: Postfix 2.4.5 rejected",
        "550 relay 192.4.1.1 denied",
        "5.1.10 not a code",
    ];
    for text in cases {
        assert!(StatusCode::find_in(text).is_none(), "{text}");
    }
}

#[test]
fn test_classify_permanent_bad_mailbox() {
    let c = classify("5.1.1").unwrap();
    assert_eq!(c.class_title, "Permanent Failure");
    assert_eq!(
        c.subject_title.as_deref(),
        Some("Bad destination mailbox address")
    );
    assert_eq!(
        c.message(),
        "Permanent Failure: Bad destination mailbox address"
    );
    assert!(c.details().starts_with("A permanent failure"));
}

#[test]
fn test_classify_transient() {
    let c = classify("4.2.2").unwrap();
    assert_eq!(c.class_title, "Persistent Transient Failure");
    assert_eq!(c.subject_title.as_deref(), Some("Mailbox full"));
}

#[test]
fn test_classify_success() {
    let c = classify("2.0.0").unwrap();
    assert_eq!(c.class_title, "Success");
    assert_eq!(c.subject_title.as_deref(), Some("Other undefined Status"));
}

#[test]
fn test_classify_unknown_code_is_none() {
    assert!(classify("9.9.9").is_none());
    assert!(classify("not a code").is_none());
}

#[test]
fn test_classify_without_subject_entry() {
    let c = classify("5.1.8").unwrap();
    assert!(c.subject_title.is_some());

    let c = classify("5.2.8").unwrap();
    assert_eq!(c.class_title, "Permanent Failure");
    assert!(c.subject_title.is_none());
    assert!(c.subject_description.is_none());
    assert_eq!(c.message(), "Permanent Failure");
}

#[test]
fn test_compact_code_matches_dotted() {
    assert_eq!(classify("550"), classify("5.5.0"));
}

#[test]
fn test_subject_is_independent_of_class() {
    let transient = classify("4.1.1").unwrap();
    let permanent = classify("5.1.1").unwrap();
    assert_eq!(transient.subject_title, permanent.subject_title);
    assert_eq!(transient.subject_description, permanent.subject_description);
    assert_ne!(transient.class_title, permanent.class_title);
}

#[test]
fn test_every_table_entry_classifies() {
    for class in CLASS_TABLE {
        for subject in SUBJECT_TABLE {
            let code = format!("{}.{}.{}", class.class, subject.subject, subject.detail);
            let c = classify(&code).unwrap_or_else(|| panic!("{code} should classify"));
            assert!(!c.class_title.is_empty(), "{code} class title");
            assert_eq!(c.subject_title.as_deref(), Some(subject.title), "{code}");
        }
    }
}

#[test]
fn test_subject_table_keys_are_unique() {
    for (i, a) in SUBJECT_TABLE.iter().enumerate() {
        for b in &SUBJECT_TABLE[i + 1..] {
            assert!(
                (a.subject, a.detail) != (b.subject, b.detail),
                "duplicate entry {}.{}",
                a.subject,
                a.detail
            );
        }
    }
}
