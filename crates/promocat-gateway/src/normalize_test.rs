use promocat_core::apply_default_view;
use serde_json::json;

use super::*;

fn products(value: serde_json::Value) -> Vec<RawProduct> {
    serde_json::from_value(value).expect("valid product fixture")
}

fn stocks(value: serde_json::Value) -> StockIndex {
    let rows: Vec<RawStockEntry> = serde_json::from_value(value).expect("valid stock fixture");
    build_stock_index(&rows)
}

// -----------------------------------------------------------------------
// build_stock_index
// -----------------------------------------------------------------------

#[test]
fn stock_index_last_write_wins() {
    let index = stocks(json!([
        { "Material": "A1", "Stock": 5 },
        { "Material": "A1", "Stock": 2 }
    ]));
    assert_eq!(index.get("A1"), 2);
    assert_eq!(index.code_count(), 1);
}

// -----------------------------------------------------------------------
// normalize_catalog
// -----------------------------------------------------------------------

#[test]
fn catalog_merges_stock_and_hides_zero_stock_by_default() {
    let raw = products(json!([
        { "skuPadre": "A1", "categorias": "Mugs", "hijos": [{ "tipo": "11oz" }], "imagenesPadre": ["a.jpg"] },
        { "skuPadre": "A2", "categorias": "Mugs", "hijos": [], "imagenesPadre": ["b.jpg"] }
    ]));
    let index = stocks(json!([{ "Material": "A1", "Stock": 5 }]));

    let items = normalize_catalog(&raw, &index);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "A1");
    assert_eq!(items[0].stock, 5);
    assert_eq!(items[0].product_type, "11oz");
    assert_eq!(items[0].image_url.as_deref(), Some("a.jpg"));
    assert_eq!(items[1].id, "A2");
    assert_eq!(items[1].stock, 0);
    assert_eq!(items[1].product_type, "");

    let visible = apply_default_view(&items);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "A1");
}

#[test]
fn catalog_stock_always_matches_index_lookup() {
    let raw = products(json!([
        { "skuPadre": "A1" }, { "skuPadre": "A2" }, { "skuPadre": "A3" }
    ]));
    let index = stocks(json!([
        { "Material": "A1", "Stock": 7 },
        { "Material": "A3", "Stock": -1 },
        { "Material": "ZZ", "Stock": 99 }
    ]));
    for item in normalize_catalog(&raw, &index) {
        assert_eq!(item.stock, index.get(&item.id));
    }
}

#[test]
fn catalog_tolerates_missing_optional_fields() {
    let raw = products(json!([{ "skuPadre": "A1" }]));
    let item = &normalize_catalog(&raw, &StockIndex::new())[0];
    assert_eq!(item.name, "");
    assert_eq!(item.description, "");
    assert_eq!(item.category, "");
    assert!(item.image_url.is_none());
    assert_eq!(item.stock, 0);
}

#[test]
fn catalog_ignores_variant_stock_for_parent() {
    let raw = products(json!([
        { "skuPadre": "A1", "hijos": [{ "skuHijo": "A1-V1" }] }
    ]));
    let index = stocks(json!([{ "Material": "A1-V1", "Stock": 40 }]));
    assert_eq!(normalize_catalog(&raw, &index)[0].stock, 0);
}

// -----------------------------------------------------------------------
// normalize_detail
// -----------------------------------------------------------------------

fn full_product() -> RawProduct {
    serde_json::from_value(json!({
        "skuPadre": "T-100",
        "nombrePadre": "Termo Acero",
        "descripcion": "Termo doble pared",
        "categorias": "Termos",
        "imagenesPadre": ["p1.jpg", "p2.jpg"],
        "material": "Acero inoxidable",
        "medidas": "7 x 22 cm",
        "impresion": { "tecnicaImpresion": "Grabado laser", "areaImpresion": "5 x 5 cm" },
        "paquete": { "pesoBruto": 12.5, "pesoNeto": "11", "unidadPeso": "kg", "PiezasCaja": 50 },
        "hijos": [
            { "skuHijo": "T-100-R", "color": "rojo", "tipo": "500ml", "imagenesHijo": ["r1.jpg", "p1.jpg"] },
            { "skuHijo": "T-100-M", "color": "MORADO", "tipo": "500ml", "imagenesHijo": ["m1.jpg"] },
            { "skuHijo": "T-100-X", "color": "Plata", "colorHex": "#c0c0c0" }
        ]
    }))
    .expect("valid product fixture")
}

#[test]
fn detail_images_concatenate_parent_and_first_variant() {
    let detail = normalize_detail(&full_product(), &StockIndex::new());
    assert_eq!(detail.images, ["p1.jpg", "p2.jpg", "r1.jpg", "p1.jpg"]);
}

#[test]
fn detail_colors_use_variant_stock_and_resolved_swatches() {
    let index = stocks(json!([
        { "Material": "T-100", "Stock": 80 },
        { "Material": "T-100-R", "Stock": 30 },
        { "Material": "T-100-X", "Stock": 50 }
    ]));
    let detail = normalize_detail(&full_product(), &index);

    assert_eq!(detail.stock, 80);
    assert_eq!(detail.product_type, "500ml");
    assert_eq!(detail.colors.len(), 3);
    assert_eq!(
        detail.colors[0],
        ColorStock {
            name: "rojo".to_string(),
            stock: 30,
            color_hex: "#ff0000".to_string(),
        }
    );
    // Upper-case table key: unreachable, falls back to the default swatch.
    assert_eq!(detail.colors[1].color_hex, "#ffffff");
    assert_eq!(detail.colors[1].stock, 0);
    assert_eq!(detail.colors[2].color_hex, "#c0c0c0");
}

#[test]
fn detail_block_formats_weights_with_unit() {
    let detail = normalize_detail(&full_product(), &StockIndex::new());
    let details = &detail.details;
    assert_eq!(details.description.as_deref(), Some("Termo doble pared"));
    assert_eq!(details.category.as_deref(), Some("Termos"));
    assert_eq!(details.material.as_deref(), Some("Acero inoxidable"));
    assert_eq!(details.product_dimensions.as_deref(), Some("7 x 22 cm"));
    assert_eq!(details.print_technique.as_deref(), Some("Grabado laser"));
    assert_eq!(details.print_area.as_deref(), Some("5 x 5 cm"));
    assert_eq!(details.gross_weight.as_deref(), Some("12.5 kg"));
    assert_eq!(details.net_weight.as_deref(), Some("11 kg"));
    assert_eq!(details.pieces_per_box.as_deref(), Some("50"));
}

#[test]
fn detail_weight_without_unit_is_bare_value() {
    let raw = products(json!([
        { "skuPadre": "A1", "paquete": { "pesoBruto": "3" } }
    ]));
    let detail = normalize_detail(&raw[0], &StockIndex::new());
    assert_eq!(detail.details.gross_weight.as_deref(), Some("3"));
    assert!(detail.details.net_weight.is_none());
}

#[test]
fn detail_without_optional_objects_has_blank_rows() {
    let raw = products(json!([{ "skuPadre": "A1", "imagenesPadre": [], "descripcion": "" }]));
    let detail = normalize_detail(&raw[0], &StockIndex::new());
    assert_eq!(detail.details, ProductDetails::default());
    assert!(detail.details.rows().iter().all(|row| row.value.is_empty()));
    assert!(detail.images.is_empty());
    assert!(detail.colors.is_empty());
}

#[test]
fn detail_variant_without_color_or_stock_gets_fallbacks() {
    let raw = products(json!([
        { "skuPadre": "A1", "categorias": "Mugs", "imagenesPadre": ["a.jpg"],
          "hijos": [{ "skuHijo": "A1-V1", "tipo": "11oz" }] }
    ]));
    let index = stocks(json!([{ "Material": "A1", "Stock": 5 }]));
    let detail = normalize_detail(&raw[0], &index);
    assert_eq!(
        detail.colors,
        [ColorStock {
            name: "Sin color".to_string(),
            stock: 0,
            color_hex: "#ffffff".to_string(),
        }]
    );
}
