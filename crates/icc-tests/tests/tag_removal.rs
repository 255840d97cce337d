//! Tag Removal Tests
//!
//! Removing a tag class drops its directory entries, deletes only elements
//! no remaining entry points at, and leaves the rest of the directory in order.

use icc_tests::{ProfileBuilder, copyright_only_profile, display_profile_v4, payload};
use oxicc_core::{RemovalReport, Signature, decode, encode, remove_tag_class};

fn signatures(profile: &oxicc_core::Profile) -> Vec<String> {
    profile
        .entries()
        .iter()
        .map(|e| e.signature.to_string())
        .collect()
}

#[test]
fn test_copyright_only_profile_shrinks_to_header() {
    let data = copyright_only_profile("(c) me");
    assert_eq!(data.len(), 144 + 15);

    let mut profile = decode(&data, None).unwrap();
    let report = remove_tag_class(&mut profile, "cprt");
    assert_eq!(
        report,
        RemovalReport {
            entries_removed: 1,
            elements_removed: 1
        }
    );

    let out = encode(&profile);
    assert_eq!(out.len(), 132);
    assert_eq!(&out[0..4], &132u32.to_be_bytes());
    assert_eq!(&out[4..128], &data[4..128]);
    assert_eq!(&out[128..132], &[0, 0, 0, 0]);
}

#[test]
fn test_remove_copyright_keeps_order() {
    let data = display_profile_v4();
    let mut profile = decode(&data, None).unwrap();
    let cprt_size = profile.entries()[1].size as usize;

    let report = profile.remove_copyright();
    assert_eq!(report.entries_removed, 1);
    assert_eq!(report.elements_removed, 1);

    let out = encode(&profile);
    assert_eq!(out.len(), data.len() - 12 - cprt_size);

    let again = decode(&out, None).unwrap();
    assert_eq!(
        signatures(&again),
        [
            "desc", "wtpt", "rXYZ", "gXYZ", "bXYZ", "rTRC", "gTRC", "bTRC", "chad", "meas"
        ]
    );
    assert!(again.copyright().is_none());
    assert_eq!(again.description().as_deref(), Some("Synthetic Display"));
    assert_eq!(encode(&again), out);
}

#[test]
fn test_shared_curve_survives_until_last_reference() {
    let mut profile = decode(&display_profile_v4(), None).unwrap();
    let elements = profile.element_count();

    let report = remove_tag_class(&mut profile, "gTRC");
    assert_eq!(report.entries_removed, 1);
    assert_eq!(report.elements_removed, 0);
    assert_eq!(profile.element_count(), elements);

    let out = encode(&profile);
    let again = decode(&out, None).unwrap();
    let r = again.entries().iter().find(|e| e.signature.as_bytes() == b"rTRC").unwrap();
    let b = again.entries().iter().find(|e| e.signature.as_bytes() == b"bTRC").unwrap();
    assert_eq!(r.offset, b.offset);
    assert_eq!(r.element, b.element);
    assert_eq!(
        again.tag(Signature(*b"bTRC")).unwrap().as_parametric_curve().unwrap().function,
        3
    );

    assert_eq!(remove_tag_class(&mut profile, "rTRC").elements_removed, 0);
    assert_eq!(remove_tag_class(&mut profile, "bTRC").elements_removed, 1);
    assert_eq!(profile.element_count(), elements - 1);
}

#[test]
fn test_shared_element_across_signatures() {
    // 'dmdd' reuses the description element
    let data = ProfileBuilder::new()
        .tag(b"desc", payload::text("Panel 27"))
        .shared_tag(b"dmdd", b"desc")
        .tag(b"cprt", payload::text("none"))
        .build();

    let mut profile = decode(&data, None).unwrap();
    assert_eq!(profile.element_count(), 2);

    let report = remove_tag_class(&mut profile, "desc");
    assert_eq!(report.elements_removed, 0);

    let again = decode(&encode(&profile), None).unwrap();
    assert_eq!(signatures(&again), ["dmdd", "cprt"]);
    assert_eq!(
        again.tag(Signature(*b"dmdd")).and_then(|e| e.text()).as_deref(),
        Some("Panel 27")
    );
}

#[test]
fn test_duplicate_signatures_all_removed() {
    let data = ProfileBuilder::new()
        .tag(b"cprt", payload::text("first"))
        .tag(b"wtpt", payload::xyz(&[[0.9642, 1.0, 0.8249]]))
        .tag(b"cprt", payload::text("second"))
        .build();

    let mut profile = decode(&data, None).unwrap();
    let report = remove_tag_class(&mut profile, "cprt");
    assert_eq!(
        report,
        RemovalReport {
            entries_removed: 2,
            elements_removed: 2
        }
    );
    assert_eq!(signatures(&profile), ["wtpt"]);

    let out = encode(&profile);
    assert_eq!(out.len(), 144 + 20);
    assert_eq!(&out[136..140], &144u32.to_be_bytes());
    assert_eq!(&out[140..144], &20u32.to_be_bytes());
}

#[test]
fn test_remove_absent_or_invalid_class_is_noop() {
    let data = display_profile_v4();
    let mut profile = decode(&data, None).unwrap();

    assert_eq!(remove_tag_class(&mut profile, "bkpt"), RemovalReport::default());
    assert_eq!(remove_tag_class(&mut profile, "cpr"), RemovalReport::default());
    assert_eq!(remove_tag_class(&mut profile, "cprt "), RemovalReport::default());
    assert_eq!(encode(&profile), data);
}

#[test]
fn test_second_removal_is_noop() {
    let mut profile = decode(&display_profile_v4(), None).unwrap();
    assert_eq!(remove_tag_class(&mut profile, "cprt").entries_removed, 1);
    let once = encode(&profile);

    assert_eq!(remove_tag_class(&mut profile, "cprt"), RemovalReport::default());
    assert_eq!(encode(&profile), once);
}

#[test]
fn test_remove_every_tag() {
    let mut profile = decode(&display_profile_v4(), None).unwrap();
    let classes: Vec<Signature> = profile.entries().iter().map(|e| e.signature).collect();

    let mut elements_removed = 0;
    for class in classes {
        elements_removed += profile.remove_tag_class(class).elements_removed;
    }

    assert_eq!(elements_removed, 9);
    assert_eq!(profile.tag_count(), 0);
    assert_eq!(profile.element_count(), 0);
    assert_eq!(encode(&profile).len(), 132);
}
