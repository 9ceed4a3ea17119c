use nalgebra::Point3;

#[inline]
pub fn distance_squared(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm_squared()
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

#[inline]
pub fn to_array(point: &Point3<f64>) -> [f64; 3] {
    [point.x, point.y, point.z]
}

/// Whether `b` lies within `radius` of `a`, counting the boundary as inside.
#[inline]
pub fn is_within(a: &Point3<f64>, b: &Point3<f64>, radius: f64) -> bool {
    radius >= 0.0 && distance_squared(a, b) <= radius * radius
}
