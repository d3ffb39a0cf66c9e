//! gbXML 6.01 document writer.
//!
//! Emits a Campus/Building/Space tree with closed-shell geometry for each
//! room, followed by flat Surface records. Walls of different spaces that
//! face each other on the same plane are reclassified as interior walls with
//! both adjacencies recorded. Coordinates are right-handed, Z up, in metres.

use serde::Serialize;

use crate::geometry::extractor::ExtractedGeometry;

/// Paired walls must sit within this distance on their fixed axis, in m.
const SHARED_WALL_TOLERANCE_M: f64 = 0.1;

/// Building location for the gbXML header.
#[derive(Clone, Debug, Serialize)]
pub struct GbLocation {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
    pub timezone: f64,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Default for GbLocation {
    fn default() -> Self {
        Self {
            longitude: -123.1207,
            latitude: 49.2827,
            elevation: 70.0,
            timezone: -8.0,
            city: "Vancouver".into(),
            state: "BC".into(),
            country: "Canada".into(),
        }
    }
}

#[derive(Clone, Debug)]
struct GbStorey {
    id: String,
    name: String,
    level: f64,
}

#[derive(Clone, Debug)]
struct GbSpace {
    id: String,
    name: String,
    x: f64,
    y: f64,
    z: f64,
    width: f64,
    depth: f64,
    height: f64,
    area: f64,
    volume: f64,
    storey_id: Option<String>,
}

#[derive(Clone, Debug)]
struct GbSurface {
    id: String,
    name: String,
    surface_type: &'static str,
    adjacent_space_id: String,
    adjacent_space_id_2: Option<String>,
    azimuth: f64,
    points: Vec<(f64, f64, f64)>,
    exposed_to_sun: bool,
}

/// Writer assembling a gbXML document from room boxes.
pub struct GbXmlWriter {
    building_name: String,
    building_id: String,
    campus_id: String,
    location: GbLocation,
    storeys: Vec<GbStorey>,
    spaces: Vec<GbSpace>,
}

impl GbXmlWriter {
    pub fn new(building_name: impl Into<String>, location: Option<GbLocation>) -> Self {
        let building_name = building_name.into();
        let slug: String = building_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        Self {
            building_id: format!("bldg-{slug}"),
            campus_id: format!("campus-{slug}"),
            building_name,
            location: location.unwrap_or_default(),
            storeys: vec![],
            spaces: vec![],
        }
    }

    pub fn add_storey(&mut self, id: impl Into<String>, name: impl Into<String>, level: f64) {
        self.storeys.push(GbStorey {
            id: id.into(),
            name: name.into(),
            level,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_space(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        z: f64,
        width: f64,
        depth: f64,
        height: f64,
    ) {
        let storey_id = self.storeys.first().map(|s| s.id.clone());
        self.spaces.push(GbSpace {
            id: id.into(),
            name: name.into(),
            x,
            y,
            z,
            width,
            depth,
            height,
            area: width * depth,
            volume: width * depth * height,
            storey_id,
        });
    }

    /// Populate storey and spaces from extracted floorplan geometry.
    pub fn from_extracted_geometry(&mut self, geometry: &ExtractedGeometry, storey_name: &str) {
        if self.storeys.is_empty() {
            self.add_storey("storey-1", storey_name, 0.0);
        }
        for room in &geometry.rooms {
            self.add_space(
                room.id.clone(),
                room.name.clone(),
                room.x,
                room.y,
                room.z,
                room.width,
                room.depth,
                room.height,
            );
        }
    }

    /// Floor, ceiling and four wall surfaces for one space box.
    fn surfaces_for_space(space: &GbSpace) -> Vec<GbSurface> {
        let GbSpace {
            id,
            name,
            x,
            y,
            z,
            width: w,
            depth: d,
            height: h,
            ..
        } = space.clone();

        let mut surfaces = vec![
            GbSurface {
                id: format!("{id}-floor"),
                name: format!("{name}_Floor"),
                surface_type: if z == 0.0 { "SlabOnGrade" } else { "InteriorFloor" },
                adjacent_space_id: id.clone(),
                adjacent_space_id_2: None,
                azimuth: 0.0,
                points: vec![(x, y, z), (x + w, y, z), (x + w, y + d, z), (x, y + d, z)],
                exposed_to_sun: false,
            },
            GbSurface {
                id: format!("{id}-ceiling"),
                name: format!("{name}_Ceiling"),
                surface_type: "Roof",
                adjacent_space_id: id.clone(),
                adjacent_space_id_2: None,
                azimuth: 0.0,
                points: vec![
                    (x, y, z + h),
                    (x, y + d, z + h),
                    (x + w, y + d, z + h),
                    (x + w, y, z + h),
                ],
                exposed_to_sun: true,
            },
        ];

        // Walls ordered counter-clockwise when viewed from outside the space.
        let walls: [(&str, &str, f64, Vec<(f64, f64, f64)>); 4] = [
            (
                "wall-south",
                "Wall_South",
                180.0,
                vec![(x, y, z), (x + w, y, z), (x + w, y, z + h), (x, y, z + h)],
            ),
            (
                "wall-north",
                "Wall_North",
                0.0,
                vec![
                    (x + w, y + d, z),
                    (x, y + d, z),
                    (x, y + d, z + h),
                    (x + w, y + d, z + h),
                ],
            ),
            (
                "wall-east",
                "Wall_East",
                90.0,
                vec![
                    (x + w, y, z),
                    (x + w, y + d, z),
                    (x + w, y + d, z + h),
                    (x + w, y, z + h),
                ],
            ),
            (
                "wall-west",
                "Wall_West",
                270.0,
                vec![(x, y + d, z), (x, y, z), (x, y, z + h), (x, y + d, z + h)],
            ),
        ];

        for (suffix, label, azimuth, points) in walls {
            surfaces.push(GbSurface {
                id: format!("{id}-{suffix}"),
                name: format!("{name}_{label}"),
                surface_type: "ExteriorWall",
                adjacent_space_id: id.clone(),
                adjacent_space_id_2: None,
                azimuth,
                points,
                exposed_to_sun: true,
            });
        }

        surfaces
    }

    /// Generate all surfaces, reclassifying coincident opposing walls of
    /// different spaces as interior walls with both adjacencies recorded.
    fn surfaces_with_shared_walls(&self) -> Vec<GbSurface> {
        let mut all: Vec<GbSurface> = self
            .spaces
            .iter()
            .flat_map(Self::surfaces_for_space)
            .collect();

        for i in 0..all.len() {
            if !all[i].id.contains("wall") || all[i].surface_type == "InteriorWall" {
                continue;
            }
            for j in (i + 1)..all.len() {
                if !all[j].id.contains("wall") {
                    continue;
                }
                if all[i].adjacent_space_id == all[j].adjacent_space_id {
                    continue;
                }
                if (all[i].azimuth - all[j].azimuth).abs() != 180.0 {
                    continue;
                }

                // North/south walls share a Y plane, east/west walls an X plane
                let fixed = |s: &GbSurface| {
                    let point = s.points.first().copied().unwrap_or_default();
                    if s.azimuth == 0.0 || s.azimuth == 180.0 {
                        point.1
                    } else {
                        point.0
                    }
                };
                if (fixed(&all[i]) - fixed(&all[j])).abs() < SHARED_WALL_TOLERANCE_M {
                    let other_i = all[j].adjacent_space_id.clone();
                    let other_j = all[i].adjacent_space_id.clone();
                    all[i].surface_type = "InteriorWall";
                    all[j].surface_type = "InteriorWall";
                    all[i].adjacent_space_id_2 = Some(other_i);
                    all[j].adjacent_space_id_2 = Some(other_j);
                    all[i].exposed_to_sun = false;
                    all[j].exposed_to_sun = false;
                }
            }
        }

        all
    }

    fn format_polyloop(points: &[(f64, f64, f64)], indent: usize) -> String {
        let pad = " ".repeat(indent);
        let mut lines = vec![format!("{pad}<PolyLoop>")];
        for (x, y, z) in points {
            lines.push(format!("{pad}  <CartesianPoint>"));
            lines.push(format!("{pad}    <Coordinate>{x:.6}</Coordinate>"));
            lines.push(format!("{pad}    <Coordinate>{y:.6}</Coordinate>"));
            lines.push(format!("{pad}    <Coordinate>{z:.6}</Coordinate>"));
            lines.push(format!("{pad}  </CartesianPoint>"));
        }
        lines.push(format!("{pad}</PolyLoop>"));
        lines.join("\n")
    }

    /// Generate the complete gbXML document.
    pub fn generate(&self) -> String {
        let all_surfaces = self.surfaces_with_shared_walls();

        let mut xml: Vec<String> = vec![
            r#"<?xml version="1.0" encoding="UTF-8"?>"#.into(),
            r#"<gbXML xmlns="http://www.gbxml.org/schema""#.into(),
            r#"       xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#.into(),
            r#"       xsi:schemaLocation="http://www.gbxml.org/schema http://www.gbxml.org/schema/6-01/GreenBuildingXML_Ver6.01.xsd""#.into(),
            r#"       temperatureUnit="C" lengthUnit="Meters" areaUnit="SquareMeters""#.into(),
            r#"       volumeUnit="CubicMeters" useSIUnitsForResults="true" version="6.01">"#.into(),
        ];

        xml.push(format!(r#"  <Campus id="{}">"#, self.campus_id));
        xml.push(format!("    <Name>{}</Name>", self.building_name));
        xml.push("    <Location>".into());
        xml.push(format!(
            "      <Longitude>{}</Longitude>",
            self.location.longitude
        ));
        xml.push(format!(
            "      <Latitude>{}</Latitude>",
            self.location.latitude
        ));
        xml.push(format!(
            "      <Elevation>{}</Elevation>",
            self.location.elevation
        ));
        if !self.location.city.is_empty() {
            xml.push(format!("      <City>{}</City>", self.location.city));
        }
        if !self.location.state.is_empty() {
            xml.push(format!("      <State>{}</State>", self.location.state));
        }
        if !self.location.country.is_empty() {
            xml.push(format!("      <Country>{}</Country>", self.location.country));
        }
        xml.push("    </Location>".into());

        xml.push(format!(
            r#"    <Building id="{}" buildingType="Office">"#,
            self.building_id
        ));
        xml.push(format!("      <Name>{}</Name>", self.building_name));
        let total_area: f64 = self.spaces.iter().map(|s| s.area).sum();
        xml.push(format!("      <Area>{total_area:.2}</Area>"));

        for storey in &self.storeys {
            xml.push(format!(r#"      <BuildingStorey id="{}">"#, storey.id));
            xml.push(format!("        <Name>{}</Name>", storey.name));
            xml.push(format!("        <Level>{:.2}</Level>", storey.level));
            xml.push("      </BuildingStorey>".into());
        }

        for space in &self.spaces {
            let storey_ref = space
                .storey_id
                .as_ref()
                .map(|id| format!(r#" buildingStoreyIdRef="{id}""#))
                .unwrap_or_default();
            xml.push(format!(r#"      <Space id="{}"{storey_ref}>"#, space.id));
            xml.push(format!("        <Name>{}</Name>", space.name));
            xml.push(format!("        <Area>{:.2}</Area>", space.area));
            xml.push(format!("        <Volume>{:.2}</Volume>", space.volume));

            let (x, y, z) = (space.x, space.y, space.z);
            let (w, d, h) = (space.width, space.depth, space.height);

            xml.push(format!(r#"        <ShellGeometry id="{}-shell">"#, space.id));
            xml.push("          <ClosedShell>".into());
            // Floor, ceiling, then the four walls
            xml.push(Self::format_polyloop(
                &[(x, y, z), (x + w, y, z), (x + w, y + d, z), (x, y + d, z)],
                12,
            ));
            xml.push(Self::format_polyloop(
                &[
                    (x, y, z + h),
                    (x, y + d, z + h),
                    (x + w, y + d, z + h),
                    (x + w, y, z + h),
                ],
                12,
            ));
            xml.push(Self::format_polyloop(
                &[(x, y, z), (x + w, y, z), (x + w, y, z + h), (x, y, z + h)],
                12,
            ));
            xml.push(Self::format_polyloop(
                &[
                    (x + w, y + d, z),
                    (x, y + d, z),
                    (x, y + d, z + h),
                    (x + w, y + d, z + h),
                ],
                12,
            ));
            xml.push(Self::format_polyloop(
                &[
                    (x + w, y, z),
                    (x + w, y + d, z),
                    (x + w, y + d, z + h),
                    (x + w, y, z + h),
                ],
                12,
            ));
            xml.push(Self::format_polyloop(
                &[(x, y + d, z), (x, y, z), (x, y, z + h), (x, y + d, z + h)],
                12,
            ));
            xml.push("          </ClosedShell>".into());
            xml.push("        </ShellGeometry>".into());
            xml.push("      </Space>".into());
        }

        xml.push("    </Building>".into());
        xml.push("  </Campus>".into());

        for surface in &all_surfaces {
            let exposed = if surface.exposed_to_sun { "true" } else { "false" };
            xml.push(format!(
                r#"  <Surface id="{}" surfaceType="{}" exposedToSun="{exposed}">"#,
                surface.id, surface.surface_type
            ));
            xml.push(format!("    <Name>{}</Name>", surface.name));
            xml.push(format!(
                r#"    <AdjacentSpaceId spaceIdRef="{}"/>"#,
                surface.adjacent_space_id
            ));
            if let Some(second) = &surface.adjacent_space_id_2 {
                xml.push(format!(r#"    <AdjacentSpaceId spaceIdRef="{second}"/>"#));
            }
            xml.push("    <PlanarGeometry>".into());
            xml.push(Self::format_polyloop(&surface.points, 6));
            xml.push("    </PlanarGeometry>".into());
            xml.push("  </Surface>".into());
        }

        xml.push("</gbXML>".into());
        xml.join("\n")
    }
}
