use crate::core::utils::geometry::{distance, is_within, to_array};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;
use std::collections::HashMap;

/// Slack added to the query radius before the exact distance check, so that points lying
/// exactly on the sphere are never lost to floating-point rounding inside the tree.
const RADIUS_SLACK: f64 = 1e-6;

/// Fixed set of labelled points supporting inclusive radius queries.
///
/// Each point carries a payload `T` (typically an atom or residue id) that is returned by
/// the queries instead of the raw coordinates. Points sharing exact coordinates are indexed
/// once as a single site, so placeholder coordinates repeated across a whole chain cost one
/// tree entry.
pub struct NeighborSearch<T> {
    tree: Option<ImmutableKdTree<f64, 3>>,
    sites: Vec<Point3<f64>>,
    members: Vec<Vec<usize>>,
    positions: Vec<Point3<f64>>,
    items: Vec<T>,
}

/// Bit pattern of a coordinate triple, with `-0.0` folded into `0.0`.
fn site_key(point: &Point3<f64>) -> [u64; 3] {
    [
        (point.x + 0.0).to_bits(),
        (point.y + 0.0).to_bits(),
        (point.z + 0.0).to_bits(),
    ]
}

impl<T: Copy> NeighborSearch<T> {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, Point3<f64>)>,
    {
        let (items, positions): (Vec<T>, Vec<Point3<f64>>) = entries.into_iter().unzip();

        let mut sites = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut site_of: HashMap<[u64; 3], usize> = HashMap::new();
        for (idx, position) in positions.iter().enumerate() {
            let site = *site_of.entry(site_key(position)).or_insert_with(|| {
                sites.push(*position);
                members.push(Vec::new());
                sites.len() - 1
            });
            members[site].push(idx);
        }

        let tree = if sites.is_empty() {
            None
        } else {
            let coords: Vec<[f64; 3]> = sites.iter().map(to_array).collect();
            Some(ImmutableKdTree::new_from_slice(&coords))
        };
        Self {
            tree,
            sites,
            members,
            positions,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indices of the stored points with `|p - center| <= radius`.
    fn indices_within(&self, center: &Point3<f64>, radius: f64) -> Vec<usize> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        if !radius.is_finite() || radius < 0.0 {
            return Vec::new();
        }
        let query_radius = radius + RADIUS_SLACK;

        tree.within_unsorted::<SquaredEuclidean>(&to_array(center), query_radius * query_radius)
            .into_iter()
            .map(|neighbour| neighbour.item as usize)
            .filter(|&site| is_within(center, &self.sites[site], radius))
            .flat_map(|site| self.members[site].iter().copied())
            .collect()
    }

    /// Payloads of every stored point within `radius` of `center`, boundary included.
    ///
    /// A negative or non-finite radius matches nothing.
    pub fn within(&self, center: &Point3<f64>, radius: f64) -> Vec<T> {
        self.indices_within(center, radius)
            .into_iter()
            .map(|idx| self.items[idx])
            .collect()
    }

    /// Every unordered pair of stored points within `radius` of each other, with their
    /// distance. Each pair is reported once.
    pub fn pairs_within(&self, radius: f64) -> Vec<(T, T, f64)> {
        let mut pairs = Vec::new();
        for (i, position) in self.positions.iter().enumerate() {
            for j in self.indices_within(position, radius) {
                if j > i {
                    let dist = distance(position, &self.positions[j]);
                    pairs.push((self.items[i], self.items[j], dist));
                }
            }
        }
        pairs
    }
}
