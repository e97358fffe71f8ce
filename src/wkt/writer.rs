use super::dimension_keyword;
use crate::{
    Coordinate, CoordinateKind, CoordinateSequence, Geometry, GeometryType, LineString,
    LinearRing, Point, Polygon,
};
use std::fmt::{self, Write};

/// Serializes geometries to Well-Known Text.
///
/// The dimensionality suffix names the ordinates present on every
/// coordinate of the geometry; ordinates missing from some coordinate are
/// left out everywhere. Members of a collection are written without a
/// suffix of their own.
#[derive(Copy, Clone, Debug, Default)]
pub struct WktWriter;

impl WktWriter {
    pub fn new() -> Self {
        WktWriter
    }

    pub fn write(&self, geometry: &Geometry) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut text, geometry);
        text
    }

    pub fn write_to<W: Write>(&self, out: &mut W, geometry: &Geometry) -> fmt::Result {
        let kind = common_kind(&geometry.coordinates());
        out.write_str(tag(geometry))?;
        if !geometry.is_empty() && kind != CoordinateKind::Xy {
            write!(out, " {}", dimension_keyword(kind))?;
        }
        out.write_char(' ')?;
        write_text(out, geometry, kind)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        WktWriter::new().write_to(f, self)
    }
}

fn common_kind(coords: &[Coordinate]) -> CoordinateKind {
    if coords.is_empty() {
        return CoordinateKind::Xy;
    }
    CoordinateKind::from_flags(
        coords.iter().all(|c| c.z.is_some()),
        coords.iter().all(|c| c.m.is_some()),
    )
}

fn tag(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::LinearRing(_) => "LINEARRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
    }
}

/// Writes `EMPTY` for no items, otherwise `(item, item, ...)`.
fn write_list<W, T, I, F>(out: &mut W, items: I, mut write_item: F) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = T>,
    F: FnMut(&mut W, T) -> fmt::Result,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return out.write_str("EMPTY");
    }
    out.write_char('(')?;
    let mut first = true;
    for item in items {
        if !first {
            out.write_str(", ")?;
        }
        first = false;
        write_item(out, item)?;
    }
    out.write_char(')')
}

fn write_coordinate<W: Write>(out: &mut W, coord: &Coordinate, kind: CoordinateKind) -> fmt::Result {
    write!(out, "{} {}", coord.x, coord.y)?;
    if kind.has_z() {
        write!(out, " {}", coord.z.unwrap_or(0.))?;
    }
    if kind.has_m() {
        write!(out, " {}", coord.m.unwrap_or(0.))?;
    }
    Ok(())
}

fn write_coordinates<W: Write>(out: &mut W, coords: &[Coordinate], kind: CoordinateKind) -> fmt::Result {
    write_list(out, coords, |out, coord| write_coordinate(out, coord, kind))
}

fn write_point<W: Write>(out: &mut W, point: &Point, kind: CoordinateKind) -> fmt::Result {
    match point.coordinate() {
        Some(coord) => {
            out.write_char('(')?;
            write_coordinate(out, &coord, kind)?;
            out.write_char(')')
        }
        None => out.write_str("EMPTY"),
    }
}

fn write_polygon<W: Write>(out: &mut W, polygon: &Polygon, kind: CoordinateKind) -> fmt::Result {
    if polygon.is_empty() {
        return out.write_str("EMPTY");
    }
    write_list(out, polygon.rings(), |out, ring: &LinearRing| {
        write_coordinates(out, ring.as_slice(), kind)
    })
}

fn write_text<W: Write>(out: &mut W, geometry: &Geometry, kind: CoordinateKind) -> fmt::Result {
    match geometry {
        Geometry::Point(point) => write_point(out, point, kind),
        Geometry::LineString(line) => write_coordinates(out, line.as_slice(), kind),
        Geometry::LinearRing(ring) => write_coordinates(out, ring.as_slice(), kind),
        Geometry::Polygon(polygon) => write_polygon(out, polygon, kind),
        Geometry::MultiPoint(points) => {
            write_list(out, points, |out, point| write_point(out, point, kind))
        }
        Geometry::MultiLineString(lines) => write_list(out, lines, |out, line: &LineString| {
            write_coordinates(out, line.as_slice(), kind)
        }),
        Geometry::MultiPolygon(polygons) => {
            write_list(out, polygons, |out, polygon| write_polygon(out, polygon, kind))
        }
        Geometry::GeometryCollection(collection) => write_list(out, collection, |out, member| {
            out.write_str(tag(member))?;
            out.write_char(' ')?;
            write_text(out, member, kind)
        }),
    }
}
