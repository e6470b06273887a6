use ftmix_core::error::FtMixError;
use ftmix_core::region::{classify, MixMode, RegionSpec};

#[test]
fn test_bounds_are_inclusive() {
    let region = RegionSpec {
        start_x: 1,
        start_y: 1,
        end_x: 2,
        end_y: 2,
        pass_inside: true,
    };
    assert!(region.classify(1, 1));
    assert!(region.classify(2, 2));
    assert!(!region.classify(3, 2));
    assert!(!region.classify(0, 1));
    assert!(classify(2, 1, &region));
}

#[test]
fn test_inner_and_outer_partition_grid() {
    let inner = RegionSpec::centered(16, 8, 0.5, true).unwrap();
    let outer = RegionSpec {
        pass_inside: false,
        ..inner
    };
    let a = inner.mask(16, 8);
    let b = outer.mask(16, 8);
    for (&x, &y) in a.iter().zip(b.iter()) {
        assert!(x ^ y, "each cell must be active in exactly one mask");
    }
    assert!(a.iter().any(|&v| v));
    assert!(b.iter().any(|&v| v));
}

#[test]
fn test_centered_rectangle_coordinates() {
    // 8 * 0.5 = 4 → [4 - 2, 4 + 2]
    let r = RegionSpec::centered(8, 8, 0.5, true).unwrap();
    assert_eq!((r.start_x, r.end_x, r.start_y, r.end_y), (2, 6, 2, 6));

    // 64 * 0.3 = 19.2 → floor(32 - 9.6) = 22, floor(32 + 9.6) = 41
    let r = RegionSpec::centered(64, 16, 0.3, false).unwrap();
    assert_eq!((r.start_x, r.end_x), (22, 41));
    // 16 * 0.3 = 4.8 → floor(8 - 2.4) = 5, floor(8 + 2.4) = 10
    assert_eq!((r.start_y, r.end_y), (5, 10));
    assert!(!r.pass_inside);
}

#[test]
fn test_full_size_region_covers_grid() {
    let r = RegionSpec::centered(8, 4, 1.0, true).unwrap();
    assert!(r.mask(8, 4).iter().all(|&v| v));
}

#[test]
fn test_region_size_bounds() {
    assert!(matches!(
        RegionSpec::centered(8, 8, 0.05, true),
        Err(FtMixError::InvalidRegionSize(_))
    ));
    assert!(RegionSpec::centered(8, 8, 1.5, true).is_err());
    assert!(RegionSpec::centered(8, 8, f64::NAN, true).is_err());
    assert!(RegionSpec::centered(8, 8, 0.1, true).is_ok());
}

#[test]
fn test_component_mode_is_whole_grid() {
    let r = MixMode::Component.region_for(4, 2).unwrap();
    assert_eq!(r, RegionSpec::whole(4, 2));
    assert!(r.mask(4, 2).iter().all(|&v| v));
}

#[test]
fn test_mode_display() {
    assert_eq!(MixMode::Component.to_string(), "Component (whole spectrum)");
    let m = MixMode::Region {
        size: 0.25,
        pass_inside: false,
    };
    assert_eq!(m.to_string(), "Region (25%, outer)");
    assert_eq!(MixMode::default_region().to_string(), "Region (50%, inner)");
}
