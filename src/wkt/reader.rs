use super::dimension_keyword;
use super::tokenizer::{Keyword, Token, Tokenizer};
use crate::errors::{Position, WktError};
use crate::{
    Coordinate, CoordinateKind, CoordinateReferenceSystem, Geometry, GeometryCollection,
    LineString, LinearRing, Multi, Point, Polygon, Precision,
};
use log::debug;
use std::str::FromStr;

/// Deepest GEOMETRYCOLLECTION nesting the reader accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses Well-Known Text into geometries.
///
/// Every geometry produced carries the reader's precision and coordinate
/// reference system.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WktReader {
    precision: Precision,
    crs: CoordinateReferenceSystem,
}

impl WktReader {
    pub fn new() -> Self {
        WktReader::default()
    }

    pub fn with_precision(precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        WktReader { precision, crs }
    }

    /// Reads exactly one geometry. Any error aborts the whole read.
    pub fn read(&self, text: &str) -> Result<Geometry, WktError> {
        self.parse(text).map_err(|e| {
            debug!("Failed to read WKT: {}", e);
            e
        })
    }

    fn parse(&self, text: &str) -> Result<Geometry, WktError> {
        let tokens = Tokenizer::new(text).collect::<Result<Vec<_>, _>>()?;
        let mut parser = Parser {
            tokens,
            index: 0,
            depth: 0,
            precision: self.precision,
            crs: self.crs,
        };
        let geometry = parser.geometry(None)?;
        match parser.next() {
            None => Ok(geometry),
            Some((token, position)) => Err(WktError::TrailingInput {
                found: token.to_string(),
                position,
            }),
        }
    }
}

impl FromStr for Geometry {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WktReader::new().read(s)
    }
}

struct Parser {
    tokens: Vec<(Token, Position)>,
    index: usize,
    depth: usize,
    precision: Precision,
    crs: CoordinateReferenceSystem,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, Position)> {
        let item = self.tokens.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn unexpected(&mut self, expected: &str) -> WktError {
        match self.next() {
            Some((token, position)) => WktError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
                position,
            },
            None => WktError::UnexpectedEnd {
                expected: expected.to_string(),
            },
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), WktError> {
        if self.peek() == Some(&expected) {
            self.index += 1;
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Consumes a comma if one is next.
    fn accept_comma(&mut self) -> bool {
        if self.peek() == Some(&Token::Comma) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `EMPTY` if it is next.
    fn accept_empty(&mut self) -> bool {
        if self.peek() == Some(&Token::Keyword(Keyword::Empty)) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// `<type> [Z|M|ZM] <text>`. Members of a collection pass the
    /// collection's dimensionality as `inherited`.
    fn geometry(&mut self, inherited: Option<CoordinateKind>) -> Result<Geometry, WktError> {
        let (keyword, position) = match self.tokens.get(self.index) {
            Some((Token::Keyword(keyword), position)) if keyword.is_geometry_type() => {
                (*keyword, *position)
            }
            _ => return Err(self.unexpected("geometry type")),
        };
        self.index += 1;
        let kind = self.dimension(inherited)?;

        match keyword {
            Keyword::Point => Ok(self.point_text(kind)?.into()),
            Keyword::LineString => self.line_string_text(kind),
            Keyword::LinearRing => Ok(self.ring_text(kind)?.into()),
            Keyword::Polygon => Ok(self.polygon_text(kind)?.into()),
            Keyword::MultiPoint => Ok(self.multi_point_text(kind)?.into()),
            Keyword::MultiLineString => self.multi_line_string_text(kind),
            Keyword::MultiPolygon => self.multi_polygon_text(kind),
            Keyword::GeometryCollection => self.collection_text(kind, position),
            Keyword::Empty | Keyword::Z | Keyword::M | Keyword::Zm => {
                unreachable!("not a geometry type")
            }
        }
    }

    fn line_string_text(&mut self, kind: CoordinateKind) -> Result<Geometry, WktError> {
        let coords = self.coordinate_list(kind)?;
        Ok(LineString::with_precision(coords, self.precision, self.crs).into())
    }

    fn multi_line_string_text(&mut self, kind: CoordinateKind) -> Result<Geometry, WktError> {
        let lines = self.list(|parser| {
            let coords = parser.coordinate_list(kind)?;
            Ok(LineString::with_precision(coords, parser.precision, parser.crs))
        })?;
        Ok(Multi::with_precision(lines, self.precision, self.crs).into())
    }

    fn multi_polygon_text(&mut self, kind: CoordinateKind) -> Result<Geometry, WktError> {
        let polygons = self.list(|parser| parser.polygon_text(kind))?;
        Ok(Multi::with_precision(polygons, self.precision, self.crs).into())
    }

    /// Members recurse through `geometry`, so nesting is capped at
    /// `MAX_NESTING_DEPTH`.
    fn collection_text(
        &mut self,
        kind: CoordinateKind,
        position: Position,
    ) -> Result<Geometry, WktError> {
        if self.depth == MAX_NESTING_DEPTH {
            return Err(WktError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                position,
            });
        }
        self.depth += 1;
        let members = self.list(|parser| parser.geometry(Some(kind)));
        self.depth -= 1;
        Ok(GeometryCollection::with_precision(members?, self.precision, self.crs).into())
    }

    /// The optional dimensionality suffix.
    fn dimension(&mut self, inherited: Option<CoordinateKind>) -> Result<CoordinateKind, WktError> {
        let (declared, position) = match self.tokens.get(self.index) {
            Some((Token::Keyword(Keyword::Z), position)) => (CoordinateKind::Xyz, *position),
            Some((Token::Keyword(Keyword::M), position)) => (CoordinateKind::Xym, *position),
            Some((Token::Keyword(Keyword::Zm), position)) => (CoordinateKind::Xyzm, *position),
            _ => return Ok(inherited.unwrap_or(CoordinateKind::Xy)),
        };
        self.index += 1;
        match inherited {
            Some(kind) if kind != declared => Err(WktError::DimensionMismatch {
                declared: dimension_keyword(kind).to_string(),
                found: dimension_keyword(declared).to_string(),
                position,
            }),
            _ => Ok(declared),
        }
    }

    /// `EMPTY | ( <item> {, <item>} )`
    fn list<T, F>(&mut self, mut item: F) -> Result<Vec<T>, WktError>
    where
        F: FnMut(&mut Parser) -> Result<T, WktError>,
    {
        let mut items = Vec::new();
        if self.accept_empty() {
            return Ok(items);
        }
        self.expect(Token::LeftParen)?;
        loop {
            items.push(item(self)?);
            if !self.accept_comma() {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(items)
    }

    /// A tuple of exactly `kind.arity()` numbers.
    fn coordinate(&mut self, kind: CoordinateKind) -> Result<Coordinate, WktError> {
        let position = match self.tokens.get(self.index) {
            Some((Token::Number(_), position)) => *position,
            _ => return Err(self.unexpected("number")),
        };
        let mut values = Vec::with_capacity(4);
        while let Some(Token::Number(value)) = self.peek() {
            values.push(*value);
            self.index += 1;
        }
        if values.len() != kind.arity() {
            return Err(WktError::InvalidCoordinateArity {
                expected: kind.arity(),
                found: values.len(),
                position,
            });
        }
        let (x, y) = (values[0], values[1]);
        let coord = match kind {
            CoordinateKind::Xy => Coordinate::new(x, y),
            CoordinateKind::Xyz => Coordinate::new_z(x, y, values[2]),
            CoordinateKind::Xym => Coordinate::new_m(x, y, values[2]),
            CoordinateKind::Xyzm => Coordinate::new_zm(x, y, values[2], values[3]),
        };
        Ok(coord)
    }

    fn coordinate_list(&mut self, kind: CoordinateKind) -> Result<Vec<Coordinate>, WktError> {
        self.list(|parser| parser.coordinate(kind))
    }

    fn point_text(&mut self, kind: CoordinateKind) -> Result<Point, WktError> {
        if self.accept_empty() {
            return Ok(Point::empty_with(self.precision, self.crs));
        }
        self.expect(Token::LeftParen)?;
        let coord = self.coordinate(kind)?;
        self.expect(Token::RightParen)?;
        Ok(Point::with_precision(coord, self.precision, self.crs))
    }

    fn ring_text(&mut self, kind: CoordinateKind) -> Result<LinearRing, WktError> {
        let coords = self.coordinate_list(kind)?;
        Ok(LinearRing::with_precision(coords, self.precision, self.crs))
    }

    fn polygon_text(&mut self, kind: CoordinateKind) -> Result<Polygon, WktError> {
        let mut rings = self.list(|parser| parser.ring_text(kind))?.into_iter();
        Ok(match rings.next() {
            Some(shell) => Polygon::new(shell, rings.collect()),
            None => Polygon::empty_with(self.precision, self.crs),
        })
    }

    /// Members may be parenthesized, `EMPTY`, or bare coordinates.
    fn multi_point_text(&mut self, kind: CoordinateKind) -> Result<Multi<Point>, WktError> {
        let points = self.list(|parser| match parser.peek() {
            Some(Token::LeftParen) | Some(Token::Keyword(Keyword::Empty)) => {
                parser.point_text(kind)
            }
            _ => {
                let coord = parser.coordinate(kind)?;
                Ok(Point::with_precision(coord, parser.precision, parser.crs))
            }
        })?;
        Ok(Multi::with_precision(points, self.precision, self.crs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoordinateSequence, GeometryType, MultiPoint};
    use approx::assert_relative_eq;

    fn read(text: &str) -> Geometry {
        WktReader::new().read(text).unwrap()
    }

    fn read_err(text: &str) -> WktError {
        WktReader::new().read(text).unwrap_err()
    }

    fn position(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_polygon_area() {
        match read("POLYGON ((0 0, 0 90, 90 90, 90 0, 0 0))") {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.shell().len(), 5);
                assert!(polygon.holes().is_empty());
                assert_relative_eq!(polygon.area(), 8100.);
            }
            other => panic!("Expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_points() {
        assert_eq!(read("POINT (1 2)"), Point::new((1., 2.)).into());
        assert_eq!(read("point z (1 2 3)"), Point::new((1., 2., 3.)).into());
        assert_eq!(
            read("POINT M (1 2 4)"),
            Point::new(Coordinate::new_m(1., 2., 4.)).into()
        );
        assert_eq!(read("POINT ZM (1 2 3 4)"), Point::new((1., 2., 3., 4.)).into());
        assert_eq!(read("POINT EMPTY"), Point::empty().into());
    }

    #[test]
    fn test_line_strings_and_rings() {
        assert_eq!(
            read("LINESTRING (0 0, 1 1, 2 0)"),
            LineString::new(vec![(0., 0.), (1., 1.), (2., 0.)]).into()
        );
        assert_eq!(read("LINESTRING EMPTY"), LineString::empty().into());
        let ring = read("LINEARRING (0 0, 1 0, 1 1, 0 0)");
        assert_eq!(ring.type_name(), "LinearRing");
        assert_eq!(ring.coordinates().len(), 4);
    }

    #[test]
    fn test_polygon_with_hole() {
        let geometry = read(
            "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0),
                      (2 2, 2 4, 4 4, 4 2, 2 2))",
        );
        match geometry {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.holes().len(), 1);
                assert_relative_eq!(polygon.area(), 96.);
            }
            other => panic!("Expected a polygon, got {:?}", other),
        }
        assert_eq!(read("POLYGON EMPTY"), Polygon::empty().into());
    }

    #[test]
    fn test_multi_point_forms() {
        let expected: Geometry =
            MultiPoint::new(vec![Point::new((1., 2.)), Point::new((3., 4.))]).into();
        assert_eq!(read("MULTIPOINT ((1 2), (3 4))"), expected);
        assert_eq!(read("MULTIPOINT (1 2, 3 4)"), expected);
        assert_eq!(
            read("MULTIPOINT ((1 2), EMPTY)"),
            MultiPoint::new(vec![Point::new((1., 2.)), Point::empty()]).into()
        );
        assert!(read("MULTIPOINT EMPTY").is_empty());
    }

    #[test]
    fn test_multi_geometries() {
        match read("MULTILINESTRING ((0 0, 1 1), (2 2, 3 3, 4 4))") {
            Geometry::MultiLineString(lines) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[1].len(), 3);
            }
            other => panic!("Expected a multi line string, got {:?}", other),
        }
        match read("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)), EMPTY)") {
            Geometry::MultiPolygon(polygons) => {
                assert_eq!(polygons.len(), 3);
                assert!(polygons[2].is_empty());
                assert_relative_eq!(polygons.area(), 1.);
            }
            other => panic!("Expected a multi polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_collection() {
        match read("GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1), GEOMETRYCOLLECTION EMPTY)") {
            Geometry::GeometryCollection(collection) => {
                let names: Vec<&str> = collection.iter().map(Geometry::type_name).collect();
                assert_eq!(names, vec!["Point", "LineString", "GeometryCollection"]);
            }
            other => panic!("Expected a collection, got {:?}", other),
        }
        assert!(read("GEOMETRYCOLLECTION EMPTY").is_empty());
    }

    #[test]
    fn test_collection_members_inherit_dimension() {
        let geometry = read("GEOMETRYCOLLECTION Z (POINT (1 2 3), POINT Z (4 5 6))");
        assert_eq!(
            geometry.coordinates(),
            vec![Coordinate::new_z(1., 2., 3.), Coordinate::new_z(4., 5., 6.)]
        );
        assert_eq!(
            read_err("GEOMETRYCOLLECTION Z (POINT M (1 2 3))"),
            WktError::DimensionMismatch {
                declared: "Z".to_string(),
                found: "M".to_string(),
                position: position(1, 29),
            }
        );
    }

    #[test]
    fn test_reader_precision() {
        let reader = WktReader::with_precision(
            Precision::fixed(10.),
            CoordinateReferenceSystem::Geographic,
        );
        let geometry = reader.read("LINESTRING (1.04 2.06, 3 4)").unwrap();
        assert_eq!(geometry.precision(), Precision::fixed(10.));
        assert_eq!(geometry.crs(), CoordinateReferenceSystem::Geographic);
        assert_eq!(
            geometry.coordinates(),
            vec![Coordinate::new(1., 2.1), Coordinate::new(3., 4.)]
        );
    }

    #[test]
    fn test_from_str() {
        let geometry: Geometry = "POINT (1 2)".parse().unwrap();
        assert_eq!(geometry, Point::new((1., 2.)).into());
        assert!("POINT (1)".parse::<Geometry>().is_err());
    }

    #[test]
    fn test_arity_errors() {
        assert_eq!(
            read_err("POINT (1 2 3)"),
            WktError::InvalidCoordinateArity {
                expected: 2,
                found: 3,
                position: position(1, 8),
            }
        );
        assert_eq!(
            read_err("LINESTRING Z (0 0 0, 1 1)"),
            WktError::InvalidCoordinateArity {
                expected: 3,
                found: 2,
                position: position(1, 22),
            }
        );
    }

    #[test]
    fn test_structure_errors() {
        assert_eq!(
            read_err(""),
            WktError::UnexpectedEnd {
                expected: "geometry type".to_string()
            }
        );
        assert_eq!(
            read_err("POINT (1 2"),
            WktError::UnexpectedEnd {
                expected: "')'".to_string()
            }
        );
        assert_eq!(
            read_err("LINESTRING (0 0 1 1)"),
            WktError::InvalidCoordinateArity {
                expected: 2,
                found: 4,
                position: position(1, 13),
            }
        );
        assert_eq!(
            read_err("POLYGON (0 0, 1 1)"),
            WktError::UnexpectedToken {
                expected: "'('".to_string(),
                found: "number 0".to_string(),
                position: position(1, 10),
            }
        );
        assert_eq!(
            read_err("EMPTY"),
            WktError::UnexpectedToken {
                expected: "geometry type".to_string(),
                found: "'EMPTY'".to_string(),
                position: position(1, 1),
            }
        );
        assert_eq!(
            read_err("POINT (1 2) POINT (3 4)"),
            WktError::TrailingInput {
                found: "'POINT'".to_string(),
                position: position(1, 13),
            }
        );
    }

    fn nested_collections(depth: usize) -> String {
        format!(
            "{}GEOMETRYCOLLECTION EMPTY{}",
            "GEOMETRYCOLLECTION (".repeat(depth - 1),
            ")".repeat(depth - 1)
        )
    }

    #[test]
    fn test_nesting_limit() {
        let geometry = WktReader::new()
            .read(&nested_collections(MAX_NESTING_DEPTH))
            .unwrap();
        assert_eq!(geometry.type_name(), "GeometryCollection");

        // Each "GEOMETRYCOLLECTION (" prefix is 20 columns wide.
        assert_eq!(
            read_err(&nested_collections(MAX_NESTING_DEPTH + 1)),
            WktError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                position: position(1, MAX_NESTING_DEPTH * 20 + 1),
            }
        );
        assert!(matches!(
            read_err(&"GEOMETRYCOLLECTION (".repeat(200_000)),
            WktError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn test_tokenizer_errors_propagate() {
        assert_eq!(
            read_err("POINT (1 2) ;"),
            WktError::UnexpectedCharacter {
                character: ';',
                position: position(1, 13),
            }
        );
    }

    /// Converts geometries parsed by the `wkt` crate for cross-checking.
    fn from_wkt_geometry(geometry: ::wkt::Geometry<f64>) -> Geometry {
        use ::wkt::types;

        fn coordinate(coord: types::Coord<f64>) -> Coordinate {
            Coordinate {
                x: coord.x,
                y: coord.y,
                z: coord.z,
                m: coord.m,
            }
        }
        fn point(point: types::Point<f64>) -> Point {
            point.0.map_or_else(Point::empty, |c| Point::new(coordinate(c)))
        }
        fn line_string(line: types::LineString<f64>) -> LineString {
            LineString::new(line.0.into_iter().map(coordinate))
        }
        fn polygon(polygon: types::Polygon<f64>) -> Polygon {
            let mut rings = polygon
                .0
                .into_iter()
                .map(|ring| LinearRing::new(ring.0.into_iter().map(coordinate)));
            match rings.next() {
                Some(shell) => Polygon::new(shell, rings.collect()),
                None => Polygon::empty(),
            }
        }

        match geometry {
            ::wkt::Geometry::Point(p) => point(p).into(),
            ::wkt::Geometry::LineString(ls) => line_string(ls).into(),
            ::wkt::Geometry::Polygon(p) => polygon(p).into(),
            ::wkt::Geometry::MultiPoint(mp) => {
                Multi::new(mp.0.into_iter().map(point).collect()).into()
            }
            ::wkt::Geometry::MultiLineString(mls) => {
                Multi::new(mls.0.into_iter().map(line_string).collect()).into()
            }
            ::wkt::Geometry::MultiPolygon(mp) => {
                Multi::new(mp.0.into_iter().map(polygon).collect()).into()
            }
            ::wkt::Geometry::GeometryCollection(gc) => {
                GeometryCollection::new(gc.0.into_iter().map(from_wkt_geometry).collect()).into()
            }
        }
    }

    #[test]
    fn test_agrees_with_wkt_crate() {
        let fixtures = [
            "POINT (1 1)",
            "LINESTRING (30 10, 10 30, 40 40)",
            "POLYGON ((35 10, 45 45, 15 40, 10 20, 35 10), (20 30, 35 35, 30 20, 20 30))",
            "MULTIPOINT ((10 40), (40 30), (20 20), (30 10))",
            "MULTILINESTRING ((10 10, 20 20, 10 40), (40 40, 30 30, 40 20, 30 10))",
            "MULTIPOLYGON (((30 20, 45 40, 10 40, 30 20)), ((15 5, 40 10, 10 20, 5 10, 15 5)))",
            "GEOMETRYCOLLECTION (POINT (4 6), LINESTRING (4 6, 7 10))",
        ];
        for text in fixtures.iter() {
            let mut parsed = ::wkt::Wkt::<f64>::from_str(text).unwrap();
            assert_eq!(parsed.items.len(), 1);
            let expected = from_wkt_geometry(parsed.items.remove(0));
            assert_eq!(read(text), expected, "{}", text);
        }
    }
}
