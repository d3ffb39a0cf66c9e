//! Wavefront OBJ preview mesh for extracted geometry.
//!
//! One vertex per unique room corner, quad faces for floor, ceiling and the
//! four walls of each room. Intended for quick 3D preview only; the gbXML
//! export carries the authoritative geometry.

use indexmap::IndexMap;

use crate::geometry::extractor::ExtractedGeometry;

/// Vertex key with fixed precision so shared corners between snapped rooms
/// deduplicate exactly.
fn vertex_key(x: f64, y: f64, z: f64) -> (i64, i64, i64) {
    let quantise = |v: f64| (v * 1e6).round() as i64;
    (quantise(x), quantise(y), quantise(z))
}

/// Write the extracted rooms as an OBJ document.
///
/// Source coordinates are Z-up; the output follows the OBJ Y-up convention
/// (X unchanged, Y = source Z, Z = -source Y so the plan is not mirrored).
pub fn write_obj(geometry: &ExtractedGeometry) -> String {
    let mut vertices: IndexMap<(i64, i64, i64), usize> = IndexMap::new();
    let mut vertex_lines: Vec<String> = vec![];
    let mut room_faces: Vec<(String, Vec<[usize; 4]>)> = vec![];

    for room in &geometry.rooms {
        let (x, y, z) = (room.x, room.y, room.z);
        let (w, d, h) = (room.width, room.depth, room.height);

        // Eight corners: bottom loop then top loop, counter-clockwise
        let corners = [
            (x, y, z),
            (x + w, y, z),
            (x + w, y + d, z),
            (x, y + d, z),
            (x, y, z + h),
            (x + w, y, z + h),
            (x + w, y + d, z + h),
            (x, y + d, z + h),
        ];

        let mut indices = [0usize; 8];
        for (slot, &(cx, cy, cz)) in corners.iter().enumerate() {
            let key = vertex_key(cx, cy, cz);
            let next_index = vertices.len() + 1;
            let index = *vertices.entry(key).or_insert_with(|| {
                vertex_lines.push(format!("v {:.6} {:.6} {:.6}", cx, cz, -cy));
                next_index
            });
            indices[slot] = index;
        }

        let [b0, b1, b2, b3, t0, t1, t2, t3] = indices;
        room_faces.push((
            room.name.clone(),
            vec![
                [b3, b2, b1, b0], // floor, facing down
                [t0, t1, t2, t3], // ceiling
                [b0, b1, t1, t0], // south wall
                [b1, b2, t2, t1], // east wall
                [b2, b3, t3, t2], // north wall
                [b3, b0, t0, t3], // west wall
            ],
        ));
    }

    let mut obj = String::new();
    obj.push_str("# Extracted floorplan preview mesh\n");
    obj.push_str(&format!(
        "# {} rooms, {:.1} m2 total floor area\n",
        geometry.rooms.len(),
        geometry.total_area_m2
    ));
    obj.push_str("# Coordinate system: Y-up (OBJ convention)\n\n");

    for line in &vertex_lines {
        obj.push_str(line);
        obj.push('\n');
    }
    obj.push('\n');

    for (name, faces) in &room_faces {
        obj.push_str(&format!("o {name}\n"));
        for face in faces {
            obj.push_str(&format!("f {} {} {} {}\n", face[0], face[1], face[2], face[3]));
        }
        obj.push('\n');
    }

    obj
}
