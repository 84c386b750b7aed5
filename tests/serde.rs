#![cfg(feature = "serde")]

use palette_elevation::{palettes, ColorScheme, LayerPalette, PaletteContainer,
                        PaletteContext, PaletteSource, ResolvedPalette};

#[test]
fn source_flattens_attributes() {
    let s: PaletteSource = serde_json::from_str(
        r##"{ "bg": ["#000", "#111", "#222"], "fg": "#eee" }"##).unwrap();
    assert_eq!(s.bg.len(), 3);
    assert_eq!(s.attrs["fg"].as_str(), "#eee");
}

#[test]
fn layer_palette_requires_three_layers() {
    let ok: LayerPalette = serde_json::from_str(
        r##"{ "layers": [{"bg": "#000"}, {}, {}], "isDark": true }"##).unwrap();
    assert!(ok.is_dark());
    assert!(ok.flat().is_empty());
    let short = serde_json::from_str::<LayerPalette>(r#"{ "layers": [{}, {}] }"#);
    assert!(short.is_err());
}

#[test]
fn resolved_palette_shape() {
    let p = palettes::neutral_layers(ColorScheme::Light);
    let json = serde_json::to_value(p.resolve(0)).unwrap();
    assert_eq!(json["values"]["bg"]["primary"], "#ffffff");
    assert_eq!(json["values"]["accent"], "#0969da");
    let back: ResolvedPalette = serde_json::from_value(json).unwrap();
    assert_eq!(back, p.resolve(0));
}

#[test]
fn container_survives_a_round_trip() {
    let c = palettes::neutral();
    let json = serde_json::to_string(&*c).unwrap();
    let back: PaletteContainer = serde_json::from_str(&json).unwrap();
    assert_eq!(back, *c);
}

#[test]
fn empty_container_is_rejected() {
    let r = serde_json::from_str::<PaletteContainer>(
        r#"{ "entries": [], "dark_base": null }"#);
    assert!(r.unwrap_err().to_string().contains("out of range"));
}

fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> String {
    let mut json = serde_json::to_value(&*palettes::neutral()).unwrap();
    edit(&mut json);
    serde_json::from_value::<PaletteContainer>(json).unwrap_err().to_string()
}

#[test]
fn corrupted_containers_are_rejected() {
    let err = tampered(|j| j["entries"][0]["links"]["inverse"] = 7_000.into());
    assert!(err.contains("palette index 7000 out of range"), "{err}");
    let err = tampered(|j| j["dark_base"] = 8.into());
    assert!(err.contains("palette index 8 out of range"), "{err}");
    let err = tampered(|j| j["entries"][2]["index"] = 3.into());
    assert!(err.contains("position 2 claims index 3"), "{err}");
}

#[test]
fn single_entry_container_inverts_in_place() {
    let json = r##"{ "entries": [{
        "attrs": {}, "bg_primary": "#000", "bg_secondary": "#111",
        "index": 0, "elevation": 0,
        "links": { "light": 0, "dark": 0, "inverse": 0, "elevated": 0 } }],
        "dark_base": null }"##;
    let c: PaletteContainer = serde_json::from_str(json).unwrap();
    let ctx = PaletteContext::root(std::sync::Arc::new(c), ColorScheme::Light);
    assert_eq!(ctx.invert().entry().bg_primary().as_str(), "#000");
    let bad = json.replace(r#""inverse": 0"#, r#""inverse": 7"#);
    assert!(serde_json::from_str::<PaletteContainer>(&bad).is_err());
}
