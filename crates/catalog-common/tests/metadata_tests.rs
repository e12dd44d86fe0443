//! JSON compatibility tests for stored metadata documents.

use catalog_common::{
    CogLayerStorageMetadata, KeySchema, LayerHeader, LayerId, LayerType, SpaceTimeKey,
    SpatialKey, TileLayerMetadata,
};
use serde_json::json;

// ============================================================================
// Tile layer metadata
// ============================================================================

#[test]
fn test_parse_spatial_tile_layer_metadata() {
    let doc = json!({
        "cellType": "int16",
        "layoutDefinition": {
            "extent": {"xmin": -180.0, "ymin": -90.0, "xmax": 180.0, "ymax": 90.0},
            "tileLayout": {"layoutCols": 8, "layoutRows": 4, "tileCols": 512, "tileRows": 512}
        },
        "extent": {"xmin": -10.0, "ymin": -5.0, "xmax": 10.0, "ymax": 5.0},
        "crs": "+proj=longlat +datum=WGS84 +no_defs ",
        "bounds": {"minKey": {"col": 3, "row": 1}, "maxKey": {"col": 4, "row": 2}}
    });

    let md: TileLayerMetadata<SpatialKey> = serde_json::from_value(doc.clone()).unwrap();
    assert_eq!(md.bounds.max_key, SpatialKey::new(4, 2));
    assert_eq!(md.layout_definition.tile_layout.tile_cols, 512);
    assert!(md.zoom.is_none());

    // Stored documents without a zoom serialize back unchanged
    assert_eq!(serde_json::to_value(&md).unwrap(), doc);
}

#[test]
fn test_parse_space_time_bounds() {
    let doc = json!({
        "cellType": "float32",
        "layoutDefinition": {
            "extent": {"xmin": 0.0, "ymin": 0.0, "xmax": 1.0, "ymax": 1.0},
            "tileLayout": {"layoutCols": 1, "layoutRows": 1, "tileCols": 256, "tileRows": 256}
        },
        "extent": {"xmin": 0.0, "ymin": 0.0, "xmax": 1.0, "ymax": 1.0},
        "crs": "EPSG:4326",
        "bounds": {
            "minKey": {"col": 0, "row": 0, "instant": 1704067200000i64},
            "maxKey": {"col": 0, "row": 0, "instant": 1706745600000i64}
        }
    });

    let md: TileLayerMetadata<SpaceTimeKey> = serde_json::from_value(doc).unwrap();
    assert_eq!(md.bounds.min_key.instant, 1704067200000);
    assert!(md.bounds.max_key.time().is_some());
}

// ============================================================================
// COG storage metadata
// ============================================================================

#[test]
fn test_cog_space_time_resolution_keeps_time_bounds() {
    let doc = json!({
        "metadata": {
            "cellType": "uint8",
            "zoomRangeInfos": [
                [
                    {"minZoom": 0, "maxZoom": 6},
                    {
                        "minKey": {"col": 0, "row": 0, "instant": 1000},
                        "maxKey": {"col": 10, "row": 10, "instant": 2000}
                    }
                ]
            ],
            "layoutScheme": {"crs": "EPSG:3857", "tileSize": 256, "resolutionThreshold": 0.1},
            "extent": {"xmin": 1000.0, "ymin": 1000.0, "xmax": 2000.0, "ymax": 2000.0},
            "crs": "EPSG:3857"
        },
        "keyIndexes": {"0": {"type": "zorder"}}
    });

    let stored: CogLayerStorageMetadata<SpaceTimeKey> = serde_json::from_value(doc).unwrap();
    assert_eq!(stored.key_indexes.len(), 1);

    let view = stored
        .metadata
        .tile_layer_metadata(&LayerId::new("ndvi", 4))
        .unwrap();
    assert_eq!(view.zoom, Some(4));
    assert_eq!(view.layout_definition.tile_layout.layout_cols, 16);
    assert_eq!(view.bounds.min_key.instant, 1000);
    assert_eq!(view.bounds.max_key.instant, 2000);
    // A 1km square just north-east of the origin sits right of the grid centre
    assert_eq!(view.bounds.min_key.col, 8);
    assert_eq!(view.bounds.min_key.row, 7);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["zoom"], 4);
}

// ============================================================================
// Layer header
// ============================================================================

#[test]
fn test_header_round_trip_with_layer_type() {
    let header: LayerHeader = serde_json::from_value(json!({
        "format": "s3",
        "keyClass": "geotrellis.spark.SpaceTimeKey",
        "valueClass": "geotrellis.raster.MultibandTile",
        "path": "s3://bucket/catalog/ndvi",
        "layerType": "COGLayer"
    }))
    .unwrap();

    assert_eq!(header.layer_type().unwrap(), LayerType::Cog);
    assert_eq!(header.key_schema().unwrap(), KeySchema::SpaceTime);

    let back = serde_json::to_value(&header).unwrap();
    assert_eq!(back["layerType"], "COGLayer");
    assert_eq!(back["keyClass"], "geotrellis.spark.SpaceTimeKey");
}
