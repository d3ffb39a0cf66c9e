//! Window and door detection along the building's exterior band.
//!
//! The detector builds the outer silhouette of the drawing, takes a narrow
//! ring just inside and outside it, and looks for compact high-ink clusters
//! in that ring. Cluster aspect ratio separates windows from doors. The
//! confidences are fixed per kind; this stage is heuristic and advisory.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::drawing::{draw_hollow_rect_mut, draw_polygon_mut};
use imageproc::filter::box_filter;
use imageproc::morphology::{close, dilate, erode, open};
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use crate::geometry::extractor::{contour_area, threshold_inverse, ExtractionParams};

/// Width of the near-exterior search ring, in px.
const BAND_HALF_WIDTH_PX: u8 = 9;
/// Ink density fraction above which a ring cluster is a candidate.
const DENSITY_FRACTION: f32 = 0.18;
/// Candidate bounding-box area bounds: absolute floor and image fraction cap.
const MIN_OPENING_AREA_PX: f64 = 80.0;
const MAX_OPENING_AREA_FRACTION: f64 = 0.02;
/// Bounding-box aspect ratio at which a candidate reads as a window.
const WINDOW_ASPECT_RATIO: f64 = 2.8;

const WINDOW_CONFIDENCE: f64 = 0.55;
const DOOR_CONFIDENCE: f64 = 0.35;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Window,
    Door,
}

impl OpeningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningKind::Window => "window",
            OpeningKind::Door => "door",
        }
    }
}

/// A detected window or door opening.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DetectedOpening {
    pub kind: OpeningKind,
    /// Bounding box in the source image, as (x, y, w, h) pixels
    pub bbox_px: (u32, u32, u32, u32),
    /// Bounding box on the metric ground plane, as (x, y, w, h) metres
    pub bbox_m: (f64, f64, f64, f64),
    pub confidence: f64,
    pub wall_id: Option<String>,
}

/// Detect openings in the near-exterior band. Returns the openings and a
/// debug overlay; an image with no external silhouette yields an empty list.
pub fn detect_openings(
    gray: &GrayImage,
    params: &ExtractionParams,
) -> (Vec<DetectedOpening>, Option<RgbImage>) {
    let (width, height) = gray.dimensions();
    let ink = threshold_inverse(gray, params.binary_threshold);

    // Strong close to merge wall ink into a solid silhouette.
    let thick = close(&close(&ink, Norm::LInf, 3), Norm::LInf, 3);

    let contours: Vec<Contour<i32>> = find_contours(&thick);
    let outer = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .max_by(|a, b| contour_area(&a.points).total_cmp(&contour_area(&b.points)));
    let Some(outer) = outer else {
        return (vec![], None);
    };
    if outer.points.len() < 3 {
        return (vec![], None);
    }

    // Filled silhouette mask.
    let mut silhouette = GrayImage::from_pixel(width, height, Luma([0]));
    let mut polygon: Vec<Point<i32>> = outer.points.clone();
    if polygon.first() == polygon.last() {
        polygon.pop();
    }
    draw_polygon_mut(&mut silhouette, &polygon, Luma([255]));

    // Ring straddling the silhouette boundary.
    let dilated = dilate(&silhouette, Norm::LInf, BAND_HALF_WIDTH_PX);
    let eroded = erode(&silhouette, Norm::LInf, BAND_HALF_WIDTH_PX);
    let band = GrayImage::from_fn(width, height, |x, y| {
        Luma([dilated
            .get_pixel(x, y)
            .0[0]
            .saturating_sub(eroded.get_pixel(x, y).0[0])])
    });

    // Local ink density, restricted to the ring, thresholded and cleaned.
    let density = box_filter(&ink, 4, 4);
    let mut candidates = GrayImage::from_fn(width, height, |x, y| {
        let in_band = band.get_pixel(x, y).0[0] > 0;
        let dense = density.get_pixel(x, y).0[0] as f32 / 255.0 > DENSITY_FRACTION;
        if in_band && dense {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    candidates = open(&candidates, Norm::LInf, 1);
    candidates = close(&candidates, Norm::LInf, 2);

    let max_area = MAX_OPENING_AREA_FRACTION * (width as f64 * height as f64);
    let ppm = params.pixels_per_metre;

    let mut openings = vec![];
    for contour in find_contours::<i32>(&candidates) {
        if contour.border_type != BorderType::Outer {
            continue;
        }
        let min_x = contour.points.iter().map(|p| p.x).min().unwrap_or(0) as u32;
        let max_x = contour.points.iter().map(|p| p.x).max().unwrap_or(0) as u32;
        let min_y = contour.points.iter().map(|p| p.y).min().unwrap_or(0) as u32;
        let max_y = contour.points.iter().map(|p| p.y).max().unwrap_or(0) as u32;
        let (w, h) = (max_x - min_x + 1, max_y - min_y + 1);

        let area = w as f64 * h as f64;
        if area < MIN_OPENING_AREA_PX || area > max_area {
            continue;
        }

        let aspect = w.max(h) as f64 / w.min(h).max(1) as f64;
        let (kind, confidence) = if aspect >= WINDOW_ASPECT_RATIO {
            (OpeningKind::Window, WINDOW_CONFIDENCE)
        } else {
            (OpeningKind::Door, DOOR_CONFIDENCE)
        };

        let y_flipped = (height - min_y - h) as f64 / ppm;
        openings.push(DetectedOpening {
            kind,
            bbox_px: (min_x, min_y, w, h),
            bbox_m: (min_x as f64 / ppm, y_flipped, w as f64 / ppm, h as f64 / ppm),
            confidence,
            wall_id: None,
        });
    }

    // Overlay: dimmed ring plus one rectangle per opening.
    let mut overlay = RgbImage::from_fn(width, height, |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        if band.get_pixel(x, y).0[0] > 0 {
            let dimmed = (v as f32 * 0.75) as u8;
            Rgb([dimmed, dimmed, dimmed])
        } else {
            Rgb([v, v, v])
        }
    });
    for opening in &openings {
        let (x, y, w, h) = opening.bbox_px;
        let colour = match opening.kind {
            OpeningKind::Window => Rgb([0, 255, 255]),
            OpeningKind::Door => Rgb([255, 255, 0]),
        };
        draw_hollow_rect_mut(
            &mut overlay,
            Rect::at(x as i32, y as i32).of_size(w, h),
            colour,
        );
    }

    (openings, Some(overlay))
}
