//! End-to-end properties of the rendered methodology page.

use std::fs;

use tempfile::TempDir;
use windvane_core::assets::AssetDir;
use windvane_core::assets::AssetError;
use windvane_core::text::NoHighlight;
use windvane_core::theme::Theme;
use windvane_docs::Block;
use windvane_docs::RenderError;
use windvane_docs::page;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const SVG_STUB: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"/>";

/// Builds an asset directory holding every image the page references.
fn full_asset_dir() -> (TempDir, AssetDir) {
    let dir = tempfile::tempdir().unwrap();
    for name in page::methodology().image_sources() {
        let body: &[u8] = if name.ends_with(".svg") {
            SVG_STUB
        } else {
            PNG_MAGIC
        };
        fs::write(dir.path().join(name), body).unwrap();
    }
    let assets = AssetDir::new(dir.path());
    (dir, assets)
}

#[test]
fn full_page_renders_without_errors() {
    let (_dir, assets) = full_asset_dir();
    let rendered = page::methodology()
        .render(100, &Theme::default(), Some(&NoHighlight), &assets)
        .unwrap();
    assert!(rendered.content_height() > 100);
}

#[test]
fn removing_any_single_asset_fails_with_missing() {
    let doc = page::methodology();
    for victim in doc.image_sources() {
        let (dir, assets) = full_asset_dir();
        fs::remove_file(dir.path().join(victim)).unwrap();

        let err = doc
            .render(100, &Theme::default(), None, &assets)
            .unwrap_err();
        match err {
            RenderError::Asset(AssetError::Missing { path }) => {
                assert_eq!(path, dir.path().join(victim), "wrong path for {victim}");
            }
            other => panic!("expected Missing for {victim}, got {other:?}"),
        }
    }
}

#[test]
fn rendering_twice_is_identical() {
    let (_dir, assets) = full_asset_dir();
    let theme = Theme::default();
    let doc = page::methodology();
    let first = doc
        .render(100, &theme, Some(&NoHighlight), &assets)
        .unwrap()
        .plain_lines();
    let second = doc
        .render(100, &theme, Some(&NoHighlight), &assets)
        .unwrap()
        .plain_lines();
    assert_eq!(first, second);
}

#[test]
fn logo_row_renders_nine_slots_in_authored_order() {
    let (_dir, assets) = full_asset_dir();
    let rendered = page::methodology()
        .render(120, &Theme::default(), None, &assets)
        .unwrap();
    let plain = rendered.plain_lines();

    let top = plain
        .iter()
        .position(|l| l.matches('┌').count() == 9)
        .expect("logo row top border");
    let labels = &plain[top + 1];
    assert_eq!(labels.matches('│').count(), 18);

    // Slot labels appear left to right in authored order. Labels may be
    // clipped to the slot width, so match on prefixes.
    let mut cursor = 0;
    for name in page::TOOL_LOGOS {
        let prefix: String = name.chars().take(5).collect();
        let at = labels[cursor..]
            .find(&prefix)
            .unwrap_or_else(|| panic!("logo {name} out of order"));
        cursor += at + prefix.len();
    }
}

#[test]
fn sql_listings_appear_verbatim() {
    let (_dir, assets) = full_asset_dir();
    let doc = page::methodology();
    let rendered = doc
        .render(100, &Theme::default(), Some(&NoHighlight), &assets)
        .unwrap();
    let plain = rendered.plain_lines().join("\n");

    for block in doc.blocks() {
        if let Block::Code(listing) = block {
            let indented: String = listing
                .source
                .split('\n')
                .map(|l| format!("    {l}"))
                .collect::<Vec<_>>()
                .join("\n");
            assert!(
                plain.contains(&indented),
                "listing not verbatim: {:?}...",
                listing.source.lines().next()
            );
        }
    }
}

#[test]
fn formulas_appear_verbatim_and_unevaluated() {
    let (_dir, assets) = full_asset_dir();
    let doc = page::methodology();
    let rendered = doc
        .render(100, &Theme::default(), None, &assets)
        .unwrap();
    let plain = rendered.plain_lines().join("\n");

    let mut formulas = 0;
    for block in doc.blocks() {
        if let Block::Formula(markup) = block {
            formulas += 1;
            assert!(plain.contains(markup.as_str()));
        }
    }
    assert_eq!(formulas, 3);
    // The markup stays markup: nothing computed a numeric result out of it.
    assert!(plain.contains(r"\sum_{v=1}^{25}"));
}

#[test]
fn captioned_lineage_graph_comes_before_the_logo_row() {
    let (_dir, assets) = full_asset_dir();
    let rendered = page::methodology()
        .render(100, &Theme::default(), None, &assets)
        .unwrap();
    let plain = rendered.plain_lines();

    let frame = plain
        .iter()
        .position(|l| l.contains(page::LINEAGE_GRAPH))
        .expect("lineage frame");
    let caption = plain
        .iter()
        .position(|l| l.contains("lineage graph generated by dbt"))
        .expect("caption");
    let row = plain
        .iter()
        .position(|l| l.matches('┌').count() == 9)
        .expect("logo row");
    assert!(frame < caption);
    assert!(caption < row);
}

#[test]
fn verification_is_by_exact_file_name() {
    let (dir, assets) = full_asset_dir();

    // A same-stem decoy does not satisfy the reference.
    fs::remove_file(dir.path().join("dbt.png")).unwrap();
    fs::write(dir.path().join("dbt"), PNG_MAGIC).unwrap();
    assert!(matches!(
        page::methodology().verify_assets(&assets),
        Err(AssetError::Missing { .. })
    ));
}
