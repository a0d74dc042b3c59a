use super::*;

const NS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

#[test]
fn derive_is_deterministic() {
    let ns = ContentId::parse(NS).unwrap();
    for payload in [&b""[..], b"{}", b"avatar", &[0u8, 255, 7][..]] {
        assert_eq!(derive(&ns, payload), derive(&ns, payload));
        assert_eq!(ns.derive(payload), derive(&ns, payload));
    }
}

#[test]
fn distinct_payloads_give_distinct_ids() {
    let ns = ContentId::parse(NS).unwrap();
    assert_ne!(derive(&ns, b"{\"a\":1}"), derive(&ns, b"{\"a\":2}"));
    assert_ne!(derive(&ns, b""), derive(&ns, b" "));
}

#[test]
fn distinct_namespaces_give_distinct_ids() {
    let a = ContentId::parse(NS).unwrap();
    let b = ContentId::parse("6ba7b811-9dad-11d1-80b4-00c04fd430c8").unwrap();
    assert_ne!(derive(&a, b"x"), derive(&b, b"x"));
}

#[test]
fn matches_rfc4122_v5_reference() {
    // DNS namespace + "python.org", the well-known v5 example.
    let ns = ContentId::parse(NS).unwrap();
    assert_eq!(
        derive(&ns, b"python.org").to_string(),
        "886313e1-3b8a-5372-9b90-0c9aee199e5d"
    );
}

#[test]
fn display_round_trips_through_parse() {
    let ns = ContentId::parse(NS).unwrap();
    let id = derive(&ns, b"payload");
    let text = id.to_string();
    assert_eq!(text.len(), 36);
    assert_eq!(text.parse::<ContentId>().unwrap(), id);
}

#[test]
fn bad_namespace_is_a_configuration_error() {
    for bad in ["", "not-a-uuid", "6ba7b810-9dad-11d1-80b4"] {
        let err = ContentId::parse(bad).unwrap_err();
        assert!(matches!(err, ThumbnailError::Configuration(_)), "{bad}");
    }
}
