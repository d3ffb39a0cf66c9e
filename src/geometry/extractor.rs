//! Floorplan geometry extraction.
//!
//! Turns a raster floorplan into axis-aligned room boxes in metres. The
//! pipeline is deterministic and single-threaded: threshold masks, interior
//! contour detection, rectangle filtering, pixel-to-metre conversion with a
//! flipped Y axis, adjacency detection and shared-boundary snapping.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use imageproc::contours::{find_contours, Contour};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::filter::box_filter;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::morphology::close;
use imageproc::point::Point;
use imageproc::rect::Rect;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::ExtractionError;
use crate::geometry::openings::{detect_openings, DetectedOpening};

/// Parameters for geometry extraction.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionParams {
    pub pixels_per_metre: f64,
    pub floor_height_m: f64,
    pub floor_z_m: f64,

    /// Minimum contour area for a room candidate, in px2
    pub min_rect_area_px: f64,
    pub min_rect_width_px: u32,
    pub min_rect_height_px: u32,
    /// Minimum contour area / bounding box area ratio
    pub rectangularity_min: f64,
    pub max_aspect_ratio: f64,

    /// Fixed inverse threshold on the grayscale value
    pub binary_threshold: u8,
    /// Odd window size for the adaptive mean threshold
    pub adaptive_block_size: u32,
    /// Constant subtracted from the local mean
    pub adaptive_c: i16,
    /// Margin zeroed around the image border to suppress page frames, in px
    pub border_margin_px: u32,

    /// Maximum gap between facing room edges to treat as adjacent, in m
    pub gap_threshold_m: f64,
    /// Minimum overlap along the shared direction, in m
    pub overlap_threshold_m: f64,

    pub detect_openings: bool,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            pixels_per_metre: 50.0,
            floor_height_m: 3.0,
            floor_z_m: 0.0,
            min_rect_area_px: 500.0,
            min_rect_width_px: 20,
            min_rect_height_px: 20,
            rectangularity_min: 0.55,
            max_aspect_ratio: 10.0,
            binary_threshold: 200,
            adaptive_block_size: 51,
            adaptive_c: 10,
            border_margin_px: 30,
            gap_threshold_m: 0.5,
            overlap_threshold_m: 0.5,
            detect_openings: true,
        }
    }
}

/// A detected room as an axis-aligned box, in metres.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DetectedRoom {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub area_m2: f64,
    pub volume_m3: f64,
    /// Bounding box in the source image, as (x, y, w, h) pixels
    pub original_bbox_px: (u32, u32, u32, u32),
}

/// Complete extracted geometry from one floorplan.
#[derive(Clone, Debug, Default)]
pub struct ExtractedGeometry {
    pub rooms: Vec<DetectedRoom>,
    pub openings: Vec<DetectedOpening>,
    /// Pairs of adjacent room ids
    pub adjacencies: Vec<(String, String)>,
    pub total_area_m2: f64,
    pub total_volume_m3: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
    pub pixels_per_metre: f64,
    pub floor_height_m: f64,
    /// PNG-encoded debug rasters keyed by pipeline stage
    pub debug_images: IndexMap<String, Vec<u8>>,
}

impl ExtractedGeometry {
    pub fn to_dict(&self) -> Value {
        json!({
            "rooms": self.rooms.iter().map(|r| json!({
                "id": r.id,
                "name": r.name,
                "x": r.x,
                "y": r.y,
                "z": r.z,
                "width": r.width,
                "depth": r.depth,
                "height": r.height,
                "area_m2": r.area_m2,
                "volume_m3": r.volume_m3,
            })).collect::<Vec<_>>(),
            "openings": self.openings.iter().map(|o| json!({
                "kind": o.kind.as_str(),
                "bbox_m": [o.bbox_m.0, o.bbox_m.1, o.bbox_m.2, o.bbox_m.3],
                "confidence": o.confidence,
            })).collect::<Vec<_>>(),
            "adjacencies": self.adjacencies,
            "total_area_m2": self.total_area_m2,
            "total_volume_m3": self.total_volume_m3,
            "image_width_px": self.image_width_px,
            "image_height_px": self.image_height_px,
            "pixels_per_metre": self.pixels_per_metre,
            "floor_height_m": self.floor_height_m,
        })
    }
}

/// Room candidate bounding box, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RectPx {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Room rectangle in metric ground-plane coordinates (Y up).
#[derive(Clone, Copy, Debug)]
struct RectM {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    original_px: (u32, u32, u32, u32),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Direction {
    Horizontal,
    Vertical,
}

/// An adjacency between rectangles `i` and `j` with the metric position of
/// the shared boundary line.
#[derive(Clone, Copy, Debug)]
struct AdjacentPair {
    direction: Direction,
    i: usize,
    j: usize,
    shared_position: f64,
}

/// Edge snaps accumulated for one rectangle during gap elimination.
#[derive(Clone, Copy, Debug, Default)]
struct EdgeSnap {
    left: Option<f64>,
    right: Option<f64>,
    top: Option<f64>,
    bottom: Option<f64>,
}

pub struct GeometryExtractor {
    params: ExtractionParams,
}

impl Default for GeometryExtractor {
    fn default() -> Self {
        Self::new(ExtractionParams::default())
    }
}

impl GeometryExtractor {
    pub fn new(params: ExtractionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExtractionParams {
        &self.params
    }

    /// Extract geometry from raw file bytes. PDF input is recognised and
    /// rejected; anything else is handed to the raster decoder.
    pub fn extract_from_bytes(&self, data: &[u8]) -> Result<ExtractedGeometry, ExtractionError> {
        if data.starts_with(b"%PDF") {
            return Err(ExtractionError::UnsupportedFormat(
                "PDF input requires document rasterisation support".into(),
            ));
        }
        let image = image::load_from_memory(data)
            .map_err(|e| ExtractionError::InvalidInput(e.to_string()))?;
        Ok(self.extract_from_image(&image))
    }

    /// Extract geometry from a decoded image.
    pub fn extract_from_image(&self, image: &DynamicImage) -> ExtractedGeometry {
        self.process(&image.to_luma8())
    }

    fn process(&self, gray: &GrayImage) -> ExtractedGeometry {
        let (width, height) = gray.dimensions();
        let mut result = ExtractedGeometry {
            image_width_px: width,
            image_height_px: height,
            pixels_per_metre: self.params.pixels_per_metre,
            floor_height_m: self.params.floor_height_m,
            ..Default::default()
        };

        let (spotted, debug_binary, debug_rects) = self.detect_rectangles(gray);
        info!(candidates = spotted.len(), "room rectangles detected");

        if spotted.is_empty() {
            store_debug(&mut result.debug_images, "binary", &DynamicImage::ImageLuma8(debug_binary));
            store_debug(
                &mut result.debug_images,
                "rectangles",
                &DynamicImage::ImageRgb8(debug_rects),
            );
            return result;
        }

        let rects_m = self.rectangles_px_to_m(&spotted, height);
        let adjacent_pairs = self.find_adjacent_pairs(&rects_m);
        debug!(pairs = adjacent_pairs.len(), "adjacencies found");
        let clean_rects = eliminate_gaps(&rects_m, &adjacent_pairs);

        for (index, rect) in clean_rects.iter().enumerate() {
            let number = index + 1;
            let area = rect.w * rect.h;
            let volume = area * self.params.floor_height_m;
            result.rooms.push(DetectedRoom {
                id: format!("room-{number:03}"),
                name: format!("Room_{number:03}"),
                x: rect.x,
                y: rect.y,
                z: self.params.floor_z_m,
                width: rect.w,
                depth: rect.h,
                height: self.params.floor_height_m,
                area_m2: area,
                volume_m3: volume,
                original_bbox_px: rect.original_px,
            });
            result.total_area_m2 += area;
            result.total_volume_m3 += volume;
        }

        for pair in &adjacent_pairs {
            if pair.i < result.rooms.len() && pair.j < result.rooms.len() {
                result
                    .adjacencies
                    .push((result.rooms[pair.i].id.clone(), result.rooms[pair.j].id.clone()));
            }
        }

        if self.params.detect_openings {
            let (openings, debug_openings) = detect_openings(gray, &self.params);
            info!(openings = openings.len(), "opening detection complete");
            result.openings = openings;
            if let Some(overlay) = debug_openings {
                store_debug(
                    &mut result.debug_images,
                    "openings",
                    &DynamicImage::ImageRgb8(overlay),
                );
            }
        }

        store_debug(&mut result.debug_images, "binary", &DynamicImage::ImageLuma8(debug_binary));
        store_debug(
            &mut result.debug_images,
            "rectangles",
            &DynamicImage::ImageRgb8(debug_rects),
        );

        result
    }

    /// Build the union ink mask, suppress the page border, close small gaps,
    /// then filter interior contours down to room rectangles.
    fn detect_rectangles(&self, gray: &GrayImage) -> (Vec<RectPx>, GrayImage, RgbImage) {
        let p = &self.params;

        let fixed = threshold_inverse(gray, p.binary_threshold);
        let adaptive = adaptive_threshold_inverse(gray, p.adaptive_block_size, p.adaptive_c);
        let mut binary = union(&fixed, &adaptive);

        zero_border(&mut binary, p.border_margin_px);
        let binary = close(&binary, Norm::LInf, 1);

        let debug_binary = binary.clone();
        let mut debug_rects = gray_to_rgb(gray);

        let contours: Vec<Contour<i32>> = find_contours(&binary);
        let mut spotted: Vec<RectPx> = vec![];

        for contour in &contours {
            // Interior contours only: rooms are holes in the wall ink.
            if contour.parent.is_none() {
                continue;
            }

            let area = contour_area(&contour.points);
            if area < p.min_rect_area_px {
                continue;
            }

            let bbox = bounding_box(&contour.points);
            if bbox.w < p.min_rect_width_px || bbox.h < p.min_rect_height_px {
                continue;
            }

            let aspect = bbox.w.max(bbox.h) as f64 / bbox.w.min(bbox.h).max(1) as f64;
            if aspect > p.max_aspect_ratio {
                continue;
            }

            let rectangularity = area / (bbox.w as f64 * bbox.h as f64);
            if rectangularity < p.rectangularity_min {
                draw_hollow_rect_mut(
                    &mut debug_rects,
                    Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.w, bbox.h),
                    Rgb([255, 0, 0]),
                );
                continue;
            }

            let epsilon = 0.05 * arc_length(&contour.points, true);
            let approx = approximate_polygon_dp(&contour.points, epsilon, true);
            if approx.len() < 3 || approx.len() > 12 {
                continue;
            }

            draw_hollow_rect_mut(
                &mut debug_rects,
                Rect::at(bbox.x as i32, bbox.y as i32).of_size(bbox.w, bbox.h),
                Rgb([0, 255, 0]),
            );
            spotted.push(bbox);
        }

        (spotted, debug_binary, debug_rects)
    }

    /// Convert pixel bounding boxes to metric rectangles. The image Y axis is
    /// flipped so the ground plane is right-handed with Y up.
    fn rectangles_px_to_m(&self, spotted: &[RectPx], image_height_px: u32) -> Vec<RectM> {
        let ppm = self.params.pixels_per_metre;
        spotted
            .iter()
            .map(|r| RectM {
                x: r.x as f64 / ppm,
                y: (image_height_px - r.y - r.h) as f64 / ppm,
                w: r.w as f64 / ppm,
                h: r.h as f64 / ppm,
                original_px: (r.x, r.y, r.w, r.h),
            })
            .collect()
    }

    /// Find all adjacent rectangle pairs. Facing edges closer than the gap
    /// threshold with enough overlap along the shared direction count; the
    /// shared line sits at the midpoint of the gap.
    fn find_adjacent_pairs(&self, rectangles: &[RectM]) -> Vec<AdjacentPair> {
        let p = &self.params;
        let mut adjacent = vec![];

        for ((i, r1), (j, r2)) in rectangles.iter().enumerate().tuple_combinations() {
            // r1 right edge against r2 left edge
            if ((r1.x + r1.w) - r2.x).abs() < p.gap_threshold_m {
                let y_overlap = (r1.y + r1.h).min(r2.y + r2.h) - r1.y.max(r2.y);
                if y_overlap > p.overlap_threshold_m {
                    adjacent.push(AdjacentPair {
                        direction: Direction::Horizontal,
                        i,
                        j,
                        shared_position: (r1.x + r1.w + r2.x) / 2.0,
                    });
                }
            }
            // r1 left edge against r2 right edge
            if (r1.x - (r2.x + r2.w)).abs() < p.gap_threshold_m {
                let y_overlap = (r1.y + r1.h).min(r2.y + r2.h) - r1.y.max(r2.y);
                if y_overlap > p.overlap_threshold_m {
                    adjacent.push(AdjacentPair {
                        direction: Direction::Horizontal,
                        i,
                        j,
                        shared_position: (r1.x + r2.x + r2.w) / 2.0,
                    });
                }
            }
            // r1 top edge against r2 bottom edge
            if ((r1.y + r1.h) - r2.y).abs() < p.gap_threshold_m {
                let x_overlap = (r1.x + r1.w).min(r2.x + r2.w) - r1.x.max(r2.x);
                if x_overlap > p.overlap_threshold_m {
                    adjacent.push(AdjacentPair {
                        direction: Direction::Vertical,
                        i,
                        j,
                        shared_position: (r1.y + r1.h + r2.y) / 2.0,
                    });
                }
            }
            // r1 bottom edge against r2 top edge
            if (r1.y - (r2.y + r2.h)).abs() < p.gap_threshold_m {
                let x_overlap = (r1.x + r1.w).min(r2.x + r2.w) - r1.x.max(r2.x);
                if x_overlap > p.overlap_threshold_m {
                    adjacent.push(AdjacentPair {
                        direction: Direction::Vertical,
                        i,
                        j,
                        shared_position: (r1.y + r2.y + r2.h) / 2.0,
                    });
                }
            }
        }

        adjacent
    }
}

/// Snap the facing edges of each adjacent pair onto the shared line. Each
/// snap only moves one edge, so the operation is order-independent for gaps
/// small relative to room size.
fn eliminate_gaps(rectangles: &[RectM], adjacent_pairs: &[AdjacentPair]) -> Vec<RectM> {
    let mut snaps: Vec<EdgeSnap> = vec![EdgeSnap::default(); rectangles.len()];

    for pair in adjacent_pairs {
        let (r1, r2) = (&rectangles[pair.i], &rectangles[pair.j]);
        match pair.direction {
            Direction::Horizontal => {
                if r1.x < r2.x {
                    snaps[pair.i].right = Some(pair.shared_position);
                    snaps[pair.j].left = Some(pair.shared_position);
                } else {
                    snaps[pair.i].left = Some(pair.shared_position);
                    snaps[pair.j].right = Some(pair.shared_position);
                }
            }
            Direction::Vertical => {
                if r1.y < r2.y {
                    snaps[pair.i].top = Some(pair.shared_position);
                    snaps[pair.j].bottom = Some(pair.shared_position);
                } else {
                    snaps[pair.i].bottom = Some(pair.shared_position);
                    snaps[pair.j].top = Some(pair.shared_position);
                }
            }
        }
    }

    rectangles
        .iter()
        .zip(&snaps)
        .map(|(rect, snap)| {
            let mut x = rect.x;
            let mut y = rect.y;
            let mut w = rect.w;
            let mut h = rect.h;

            if let Some(left) = snap.left {
                w = (x + w) - left;
                x = left;
            }
            if let Some(right) = snap.right {
                w = right - x;
            }
            if let Some(bottom) = snap.bottom {
                h = (y + h) - bottom;
                y = bottom;
            }
            if let Some(top) = snap.top {
                h = top - y;
            }

            RectM {
                x,
                y,
                w,
                h,
                original_px: rect.original_px,
            }
        })
        .collect()
}

/// Inverse fixed threshold: ink (dark pixels) becomes foreground.
pub(crate) fn threshold_inverse(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] <= threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Inverse adaptive mean threshold: foreground where the pixel is darker than
/// the local mean minus the constant.
fn adaptive_threshold_inverse(gray: &GrayImage, block_size: u32, c: i16) -> GrayImage {
    let radius = block_size / 2;
    let local_mean = box_filter(gray, radius, radius);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y).0[0] as i16;
        let mean = local_mean.get_pixel(x, y).0[0] as i16;
        if pixel <= mean - c {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0].max(b.get_pixel(x, y).0[0])])
    })
}

fn zero_border(image: &mut GrayImage, margin: u32) {
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            if x < margin || y < margin || x >= width.saturating_sub(margin) || y >= height.saturating_sub(margin)
            {
                image.put_pixel(x, y, Luma([0]));
            }
        }
    }
}

fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}

/// Polygon area by the shoelace formula, in px2.
pub(crate) fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0i64;
    for (index, p) in points.iter().enumerate() {
        let q = &points[(index + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (doubled.abs() as f64) / 2.0
}

fn bounding_box(points: &[Point<i32>]) -> RectPx {
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    RectPx {
        x: min_x as u32,
        y: min_y as u32,
        w: (max_x - min_x + 1) as u32,
        h: (max_y - min_y + 1) as u32,
    }
}

fn store_debug(map: &mut IndexMap<String, Vec<u8>>, stage: &str, image: &DynamicImage) {
    let mut buffer = Vec::new();
    match image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png) {
        Ok(()) => {
            map.insert(stage.to_string(), buffer);
        }
        Err(e) => warn!(stage, error = %e, "debug raster could not be encoded"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imageproc::drawing::draw_filled_rect_mut;
    use pretty_assertions::assert_eq;
    use rstest::*;

    /// Draw a floorplan on a white page: dark wall outlines of the given
    /// thickness around each room interior.
    fn floorplan(
        width: u32,
        height: u32,
        rooms: &[(i32, i32, u32, u32)],
        wall_px: u32,
    ) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, height, Luma([255]));
        for &(x, y, w, h) in rooms {
            draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(w, h), Luma([0]));
            let inner = Rect::at(x + wall_px as i32, y + wall_px as i32)
                .of_size(w - 2 * wall_px, h - 2 * wall_px);
            draw_filled_rect_mut(&mut img, inner, Luma([255]));
        }
        img
    }

    #[fixture]
    fn extractor() -> GeometryExtractor {
        GeometryExtractor::default()
    }

    #[rstest]
    fn empty_page_returns_no_rooms_but_debug_rasters(extractor: GeometryExtractor) {
        let blank = GrayImage::from_pixel(400, 300, Luma([255]));
        let result = extractor.process(&blank);
        assert!(result.rooms.is_empty());
        assert_eq!(result.image_width_px, 400);
        assert!(result.debug_images.contains_key("binary"));
        assert!(result.debug_images.contains_key("rectangles"));
    }

    #[rstest]
    fn single_room_is_detected_with_metric_dimensions(extractor: GeometryExtractor) {
        // 10 m x 10 m room at 50 px/m, with a margin clear of the border filter
        let img = floorplan(700, 700, &[(80, 80, 500, 500)], 5);
        let result = extractor.process(&img);

        assert_eq!(result.rooms.len(), 1);
        let room = &result.rooms[0];
        assert_eq!(room.id, "room-001");
        assert_eq!(room.name, "Room_001");
        // Interior is 490 px less the detected boundary, about 9.8 m
        assert_relative_eq!(room.width, 9.8, epsilon = 0.15);
        assert_relative_eq!(room.depth, 9.8, epsilon = 0.15);
        assert_relative_eq!(room.height, 3.0);
        assert_relative_eq!(room.area_m2, room.width * room.depth, epsilon = 1e-9);
        assert_relative_eq!(room.volume_m3, room.area_m2 * 3.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_area_m2, room.area_m2, epsilon = 1e-9);
    }

    #[rstest]
    fn two_rooms_with_small_gap_snap_to_shared_boundary(extractor: GeometryExtractor) {
        // Two 10 m x 10 m rooms side by side with an exact 0.3 m (15 px) gap
        let img = floorplan(
            1400,
            700,
            &[(80, 80, 500, 500), (80 + 500 + 15, 80, 500, 500)],
            5,
        );
        let result = extractor.process(&img);

        assert_eq!(result.rooms.len(), 2);
        assert_eq!(result.adjacencies.len(), 1);

        let left = &result.rooms[0];
        let right = &result.rooms[1];
        // After the snap the facing edges coincide
        assert_relative_eq!(left.x + left.width, right.x, epsilon = 1e-6);
        // The shared boundary sits at the midpoint of the original gap
        let gap_mid = (580.0 + 595.0) / 2.0 / 50.0;
        assert_relative_eq!(left.x + left.width, gap_mid, epsilon = 0.05);
        assert_relative_eq!(
            result.total_area_m2,
            left.area_m2 + right.area_m2,
            epsilon = 1e-6
        );
    }

    #[rstest]
    fn vertically_stacked_rooms_snap_too(extractor: GeometryExtractor) {
        let img = floorplan(
            700,
            1400,
            &[(80, 80, 500, 500), (80, 80 + 500 + 15, 500, 500)],
            5,
        );
        let result = extractor.process(&img);

        assert_eq!(result.rooms.len(), 2);
        assert_eq!(result.adjacencies.len(), 1);
        // Image-top room has the larger metric Y
        let (lower, upper) = if result.rooms[0].y < result.rooms[1].y {
            (&result.rooms[0], &result.rooms[1])
        } else {
            (&result.rooms[1], &result.rooms[0])
        };
        assert_relative_eq!(lower.y + lower.depth, upper.y, epsilon = 1e-6);
    }

    #[rstest]
    fn extraction_is_deterministic(extractor: GeometryExtractor) {
        let img = floorplan(
            1400,
            700,
            &[(80, 80, 500, 500), (80 + 500 + 15, 80, 500, 500)],
            5,
        );
        let first = extractor.process(&img);
        let second = extractor.process(&img);
        assert_eq!(first.to_dict(), second.to_dict());
        assert_eq!(first.debug_images, second.debug_images);
    }

    #[rstest]
    fn tiny_contours_are_filtered_out(extractor: GeometryExtractor) {
        // A 6 px x 6 px blob is below every size threshold
        let img = floorplan(400, 400, &[(100, 100, 12, 12)], 2);
        let result = extractor.process(&img);
        assert!(result.rooms.is_empty());
    }

    #[rstest]
    fn pdf_bytes_are_rejected_as_unsupported(extractor: GeometryExtractor) {
        let err = extractor.extract_from_bytes(b"%PDF-1.4 ...").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[rstest]
    fn garbage_bytes_are_invalid_input(extractor: GeometryExtractor) {
        let err = extractor.extract_from_bytes(&[0u8; 64]).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
    }

    #[rstest]
    fn shoelace_area_of_a_square() {
        let square = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_relative_eq!(contour_area(&square), 100.0);
        assert_eq!(contour_area(&square[..2]), 0.0);
    }

    #[rstest]
    fn metric_conversion_flips_y(extractor: GeometryExtractor) {
        let spotted = vec![RectPx {
            x: 100,
            y: 50,
            w: 200,
            h: 100,
        }];
        let rects = extractor.rectangles_px_to_m(&spotted, 500);
        assert_relative_eq!(rects[0].x, 2.0);
        // y = (500 - 50 - 100) / 50
        assert_relative_eq!(rects[0].y, 7.0);
        assert_relative_eq!(rects[0].w, 4.0);
        assert_relative_eq!(rects[0].h, 2.0);
    }
}
