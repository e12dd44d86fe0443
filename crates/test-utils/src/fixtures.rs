//! Stored documents as the catalog writes them.
//!
//! Each function returns the JSON value of one attribute record.

use serde_json::{json, Value};

pub const SPATIAL_KEY_CLASS: &str = "geotrellis.spark.SpatialKey";
pub const SPACE_TIME_KEY_CLASS: &str = "geotrellis.spark.SpaceTimeKey";

/// Lat/long proj4 string as stored by the catalog writer.
pub const LATLNG_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs ";

/// Header of a per-zoom (Avro) layer.
pub fn avro_header(key_class: &str) -> Value {
    json!({
        "format": "file",
        "keyClass": key_class,
        "valueClass": "geotrellis.raster.Tile",
        "path": "elevation/5"
    })
}

/// Header of a COG layer.
pub fn cog_header(key_class: &str) -> Value {
    json!({
        "format": "file",
        "keyClass": key_class,
        "valueClass": "geotrellis.raster.MultibandTile",
        "path": "imagery",
        "layerType": "COGLayer"
    })
}

/// Plain tile layer metadata for a spatial layer over part of Europe.
pub fn spatial_metadata() -> Value {
    json!({
        "cellType": "int16",
        "layoutDefinition": {
            "extent": {"xmin": -180.0, "ymin": -90.0, "xmax": 180.0, "ymax": 90.0},
            "tileLayout": {"layoutCols": 32, "layoutRows": 32, "tileCols": 256, "tileRows": 256}
        },
        "extent": {"xmin": -15.0, "ymin": 35.0, "xmax": 45.0, "ymax": 72.0},
        "crs": LATLNG_PROJ4,
        "bounds": {"minKey": {"col": 14, "row": 1}, "maxKey": {"col": 19, "row": 4}}
    })
}

/// Zoom-0 COG storage metadata for a spatial layer covering `[0, 90] x [0, 45]`.
///
/// Zooms 0-3 come from one range, 4-8 from another.
pub fn spatial_cog_storage_metadata() -> Value {
    json!({
        "metadata": {
            "cellType": "uint8",
            "zoomRangeInfos": [
                [
                    {"minZoom": 0, "maxZoom": 3},
                    {"minKey": {"col": 0, "row": 0}, "maxKey": {"col": 0, "row": 0}}
                ],
                [
                    {"minZoom": 4, "maxZoom": 8},
                    {"minKey": {"col": 0, "row": 0}, "maxKey": {"col": 15, "row": 15}}
                ]
            ],
            "layoutScheme": {"crs": "EPSG:4326", "tileSize": 256, "resolutionThreshold": 0.1},
            "extent": {"xmin": 0.0, "ymin": 0.0, "xmax": 90.0, "ymax": 45.0},
            "crs": "EPSG:4326"
        },
        "keyIndexes": {}
    })
}

/// Zoom-0 COG storage metadata for a space-time layer spanning January 2024.
pub fn space_time_cog_storage_metadata() -> Value {
    json!({
        "metadata": {
            "cellType": "float32",
            "zoomRangeInfos": [
                [
                    {"minZoom": 0, "maxZoom": 10},
                    {
                        "minKey": {"col": 0, "row": 0, "instant": JAN_2024_START},
                        "maxKey": {"col": 3, "row": 3, "instant": JAN_2024_END}
                    }
                ]
            ],
            "layoutScheme": {"crs": "EPSG:4326", "tileSize": 512, "resolutionThreshold": 0.1},
            "extent": {"xmin": 0.0, "ymin": 0.0, "xmax": 90.0, "ymax": 45.0},
            "crs": "EPSG:4326"
        },
        "keyIndexes": {}
    })
}

/// 2024-01-01T00:00:00Z in epoch milliseconds.
pub const JAN_2024_START: i64 = 1_704_067_200_000;

/// 2024-02-01T00:00:00Z in epoch milliseconds.
pub const JAN_2024_END: i64 = 1_706_745_600_000;
