use crate::utils::calculate_level_indices;
use crate::{Coordinate, Rectangle};

/// A packed, bulk-loaded R-tree over the segments of a coordinate path.
/// Leaf `i` holds the envelope of segment `i`.
#[derive(Debug, Clone)]
pub struct SegRTree {
    degree: usize,
    size: usize,
    level_indices: Vec<usize>,
    tree: Vec<Rectangle>,
}

impl SegRTree {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn height(&self) -> usize {
        self.level_indices.len() - 1
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn new_empty() -> Self {
        SegRTree {
            degree: 2,
            size: 0,
            level_indices: vec![0],
            tree: vec![Rectangle::new_empty()],
        }
    }

    pub fn new_loaded(degree: usize, rects: &[Rectangle]) -> Self {
        let degree = degree.max(2);
        if rects.is_empty() {
            return SegRTree {
                degree,
                ..SegRTree::new_empty()
            };
        }
        let size = rects.len();
        let level_indices = calculate_level_indices(degree, size);
        let tree_size = level_indices[level_indices.len() - 1] + 1;
        let mut tree = vec![Rectangle::new_empty(); tree_size];
        copy_into_tree(&mut tree, 0, rects);

        for level in 1..level_indices.len() {
            let level_index = level_indices[level];
            let previous_items = &tree[level_indices[level - 1]..level_index];
            let next_items: Vec<Rectangle> = previous_items
                .chunks(degree)
                .map(|items| Rectangle::of(items))
                .collect();
            copy_into_tree(&mut tree, level_index, &next_items);
        }

        tree.shrink_to_fit();
        SegRTree {
            degree,
            size,
            level_indices,
            tree,
        }
    }

    pub fn envelope(&self) -> Rectangle {
        self.get_rectangle(self.height(), 0)
    }

    pub fn query_rect(&self, rect: Rectangle) -> Vec<usize> {
        self.query(|level, offset| self.get_rectangle(level, offset).intersects(rect))
    }

    pub fn query_point(&self, point: Coordinate) -> Vec<usize> {
        self.query(|level, offset| self.get_rectangle(level, offset).contains(point))
    }

    fn query<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(usize, usize) -> bool,
    {
        let mut results = Vec::new();
        if self.size == 0 {
            return results;
        }

        // Stack entries: (level, offset)
        let mut stack = vec![(self.height(), 0)];
        while let Some((level, offset)) = stack.pop() {
            if !predicate(level, offset) {
                continue;
            }
            if level == 0 {
                results.push(offset);
            } else {
                let child_level = level - 1;
                let first_child_offset = self.degree * offset;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((child_level, child_offset));
                }
            }
        }

        results
    }

    /// All pairs `(a, b)` with `a < b` of segments whose envelopes intersect.
    pub fn query_self_intersections(&self) -> Vec<(usize, usize)> {
        let mut results = Vec::new();
        if self.size == 0 {
            return results;
        }

        // Stack entries: (level_a, offset_a, level_b, offset_b)
        let mut stack = vec![(self.height(), 0, self.height(), 0)];

        while let Some((level_a, offset_a, level_b, offset_b)) = stack.pop() {
            let rect_a = self.get_rectangle(level_a, offset_a);
            let rect_b = self.get_rectangle(level_b, offset_b);
            if !rect_a.intersects(rect_b) {
                continue;
            }

            if level_a == 0 && level_b == 0 {
                if offset_a < offset_b {
                    results.push((offset_a, offset_b));
                }
            } else if level_a == level_b {
                let child_level = level_a - 1;
                let first_child_offset = self.degree * offset_a;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((child_level, child_offset, level_b, offset_b));
                }
            } else {
                let child_level = level_b - 1;
                let first_child_offset = self.degree * offset_b;
                let last_child_offset = first_child_offset + self.degree;
                for child_offset in first_child_offset..last_child_offset {
                    stack.push((level_a, offset_a, child_level, child_offset));
                }
            }
        }

        results
    }

    /// All pairs `(a, b)` where segment `a` of this tree and segment `b` of
    /// `other` have intersecting envelopes. The trees may differ in degree
    /// and height; the taller side is descended first.
    pub fn query_other_intersections(&self, other: &SegRTree) -> Vec<(usize, usize)> {
        let mut results = Vec::new();
        if self.size == 0 || other.size == 0 {
            return results;
        }

        let mut stack = vec![(self.height(), 0, other.height(), 0)];
        while let Some((level_a, offset_a, level_b, offset_b)) = stack.pop() {
            let rect_a = self.get_rectangle(level_a, offset_a);
            let rect_b = other.get_rectangle(level_b, offset_b);
            if !rect_a.intersects(rect_b) {
                continue;
            }

            if level_a == 0 && level_b == 0 {
                results.push((offset_a, offset_b));
            } else if level_a >= level_b && level_a > 0 {
                let first_child_offset = self.degree * offset_a;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((level_a - 1, child_offset, level_b, offset_b));
                }
            } else {
                let first_child_offset = other.degree * offset_b;
                for child_offset in first_child_offset..(first_child_offset + other.degree) {
                    stack.push((level_a, offset_a, level_b - 1, child_offset));
                }
            }
        }

        results
    }

    pub(crate) fn get_rectangle(&self, level: usize, offset: usize) -> Rectangle {
        self.tree[self.level_indices[level] + offset]
    }

    /// The range of leaves `[low, high)` covered by a node.
    pub(crate) fn get_low_high(&self, level: usize, offset: usize) -> (usize, usize) {
        let width = self.degree.pow(level as u32);
        (width * offset, (width * (offset + 1)).min(self.size))
    }
}

fn copy_into_tree(tree: &mut [Rectangle], index: usize, rects: &[Rectangle]) {
    let (_, subtree) = tree.split_at_mut(index);
    let (subtree, _) = subtree.split_at_mut(rects.len());
    subtree.copy_from_slice(rects);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rectangles_from_coordinates;

    fn point_rects(n: usize) -> Vec<Rectangle> {
        (0..n)
            .map(|i| Rectangle {
                x_min: i as f64,
                y_min: i as f64,
                x_max: i as f64,
                y_max: i as f64,
            })
            .collect()
    }

    #[test]
    fn test_empty_seg_rtree() {
        let p1 = Coordinate::new(0., 0.);
        let r = Rectangle {
            x_min: -10.,
            y_min: -5.,
            x_max: 1.,
            y_max: 5.,
        };
        let tree = SegRTree::new_loaded(2, &[]);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.envelope().is_empty());
        assert_eq!(tree.query_point(p1), Vec::new());
        assert_eq!(tree.query_rect(r), Vec::new());
        assert_eq!(tree.query_self_intersections(), Vec::new());
        assert_eq!(
            tree.query_other_intersections(&SegRTree::new_loaded(2, &point_rects(3))),
            Vec::new()
        );
    }

    #[test]
    fn test_build_seg_rtree() {
        let rects = point_rects(6);
        let tree = SegRTree::new_loaded(2, &rects);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.height(), 3);
        for (i, rect) in rects.iter().enumerate() {
            assert_eq!(tree.query_rect(*rect), vec![i]);
        }
        assert_eq!(
            tree.envelope(),
            Rectangle::new((0., 0.).into(), (5., 5.).into())
        );

        let rect = Rectangle::new((0., 0.).into(), (5., 5.).into());
        let mut results = tree.query_rect(rect);
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2, 3, 4, 5]);

        let rect = Rectangle::new((1., 1.).into(), (3., 3.).into());
        let mut results = tree.query_rect(rect);
        results.sort_unstable();
        assert_eq!(results, vec![1, 2, 3]);
    }

    #[test]
    fn test_query_point_on_path() {
        let coords: Vec<Coordinate> = vec![(0., 0.).into(), (2., 0.).into(), (2., 2.).into()];
        let tree = SegRTree::new_loaded(16, &rectangles_from_coordinates(&coords));
        let mut results = tree.query_point((2., 0.).into());
        results.sort_unstable();
        assert_eq!(results, vec![0, 1]);
        assert_eq!(tree.query_point((1., 1.).into()), Vec::<usize>::new());
    }

    #[test]
    fn test_self_intersections() {
        // A bow tie: segment 0 crosses segment 2.
        let coords: Vec<Coordinate> = vec![
            (0., 0.).into(),
            (2., 2.).into(),
            (2., 0.).into(),
            (0., 2.).into(),
        ];
        let tree = SegRTree::new_loaded(2, &rectangles_from_coordinates(&coords));
        let mut pairs = tree.query_self_intersections();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_other_intersections_with_different_heights() {
        let a: Vec<Coordinate> = (0..40).map(|i| Coordinate::new(i as f64, 0.)).collect();
        let b: Vec<Coordinate> = vec![(10.5, -1.).into(), (10.5, 1.).into(), (30.5, 1.).into()];
        let tree_a = SegRTree::new_loaded(2, &rectangles_from_coordinates(&a));
        let tree_b = SegRTree::new_loaded(16, &rectangles_from_coordinates(&b));
        assert!(tree_a.height() > tree_b.height());

        let mut pairs = tree_a.query_other_intersections(&tree_b);
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(10, 0)]);

        let mut reversed = tree_b.query_other_intersections(&tree_a);
        reversed.sort_unstable();
        assert_eq!(reversed, vec![(0, 10)]);
    }

    #[test]
    fn test_low_high_is_clamped() {
        let tree = SegRTree::new_loaded(2, &point_rects(5));
        assert_eq!(tree.get_low_high(0, 3), (3, 4));
        assert_eq!(tree.get_low_high(1, 2), (4, 5));
        assert_eq!(tree.get_low_high(tree.height(), 0), (0, 5));
    }
}
