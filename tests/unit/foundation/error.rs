use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HalftoneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HalftoneError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        HalftoneError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        HalftoneError::sidecar("x")
            .to_string()
            .contains("sidecar error:")
    );
    assert!(
        HalftoneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = HalftoneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
