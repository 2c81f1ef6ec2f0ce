// Copyright (c) 2026 VectorSync
// Licensed under the Apache License, Version 2.0

#![forbid(unsafe_code)]

use proptest::prelude::*;

use vectorsync::codec::{build_data, build_interest, parse_data, parse_interest_name, Name};
use vectorsync::obslog::ObservationLog;
use vectorsync::vv;

proptest! {
    #[test]
    fn merge_is_commutative_associative_idempotent(
        a in proptest::collection::vec(any::<u8>(), 1..8),
        b in proptest::collection::vec(any::<u8>(), 1..8),
        c in proptest::collection::vec(any::<u8>(), 1..8),
    ) {
        let n = a.len().min(b.len()).min(c.len());
        let a = &a[..n]; let b = &b[..n]; let c = &c[..n];

        let mut ab = vec![0u8; n];
        vv::merge(&mut ab, a, b);
        let mut ba = vec![0u8; n];
        vv::merge(&mut ba, b, a);
        prop_assert_eq!(&ab, &ba);

        let mut idem = vec![0u8; n];
        vv::merge(&mut idem, &ab, &ab);
        prop_assert_eq!(&idem, &ab);

        let mut ab_c = vec![0u8; n];
        vv::merge(&mut ab_c, &ab, c);
        let mut bc = vec![0u8; n];
        vv::merge(&mut bc, b, c);
        let mut a_bc = vec![0u8; n];
        vv::merge(&mut a_bc, a, &bc);
        prop_assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn advance_self_is_strictly_increasing_lexicographically(
        max_seq_num in 1u8..=20,
        steps in 1usize..40,
    ) {
        let mut vv_vec = vec![0u8; 2];
        let mut round = 0u32;
        let mut prev = (0u32, 0u8);
        for _ in 0..steps {
            let (r, s) = vv::advance_self(&mut vv_vec, &mut round, 0, max_seq_num);
            prop_assert!((r, s) > prev);
            prop_assert!(s >= 1 && s <= max_seq_num);
            prev = (r, s);
        }
    }

    #[test]
    fn observation_log_never_reports_below_any_recorded_seq(
        observations in proptest::collection::vec((0u32..20, 0usize..4, any::<u8>()), 0..100),
    ) {
        let mut log = ObservationLog::new(8, 4);
        for &(round, peer, seq) in &observations {
            log.record(round, peer, seq);
        }
        // The *last* observation recorded for each (round, peer) is a lower
        // bound on what query() reports, since a round can be displaced by
        // the ring between being written and being read.
        let mut last_seen: std::collections::HashMap<(u32, usize), u8> = std::collections::HashMap::new();
        for &(round, peer, seq) in &observations {
            let entry = last_seen.entry((round, peer)).or_insert(0);
            *entry = (*entry).max(seq);
        }
        for (&(round, peer), &expected_min) in &last_seen {
            if let Some(got) = log.query(round, peer) {
                prop_assert!(got >= expected_min);
            }
        }
    }

    #[test]
    fn name_wire_roundtrips_bit_exactly(
        components in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), 0..8),
    ) {
        let name = Name::from_components(components);
        let wire = name.encode();
        let parsed = Name::decode(&wire).unwrap();
        prop_assert_eq!(parsed, name);
    }

    #[test]
    fn interest_wire_roundtrips_name_and_lifetime(
        uri_parts in proptest::collection::vec("[a-z]{1,8}", 1..4),
        lifetime_ms in 0u32..1_000_000,
    ) {
        let name = Name::from_uri(&format!("/{}", uri_parts.join("/")));
        let wire = build_interest(&name, lifetime_ms);
        let parsed = parse_interest_name(&wire).unwrap();
        prop_assert_eq!(parsed, name);
    }

    #[test]
    fn data_wire_roundtrips_content_bit_exactly(
        content in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let name = Name::from_uri("/alice/0/1");
        let meta = vectorsync::codec::MetaInfo::default();
        let wire = build_data(&name, &meta, &content, vectorsync::codec::SignatureKind::DigestSha256, None).unwrap();
        let parsed = parse_data(&wire).unwrap();
        prop_assert_eq!(parsed.content, content.as_slice());
        prop_assert!(vectorsync::codec::data::verify_signature(&parsed, None).unwrap());
    }
}
