//! Animation shapes: named paths of multi-line frames.

use rustc_hash::FxHashMap;

use crate::types::DEFAULT_SHAPE_PATH;

/// Named animation paths, each an ordered list of multi-line frames.
///
/// The same type carries color masks: a mask uses the shape's path names and
/// stores one symbol string per frame.
///
/// ```
/// use termination_core::Shape;
///
/// let ball = Shape::new()
///     .with_path("default", ["<-0->", "<0-->"])
///     .with_path("left", ["|0-->"]);
///
/// assert_eq!(ball.frame_count("default"), Some(2));
/// assert_eq!(ball.frame("left", 0), Some("|0-->"));
/// assert_eq!(ball.frame("right", 0), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    paths: FxHashMap<String, Vec<String>>,
}

/// Color mask frames, keyed like the [`Shape`] they color.
pub type ColorMask = Shape;

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shape with only the `"default"` path.
    pub fn single<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_path(DEFAULT_SHAPE_PATH, frames)
    }

    pub fn with_path<I, S>(mut self, name: impl Into<String>, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, frames);
        self
    }

    /// Add or replace a path.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, frames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .insert(name.into(), frames.into_iter().map(Into::into).collect());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn path(&self, name: &str) -> Option<&[String]> {
        self.paths.get(name).map(Vec::as_slice)
    }

    pub fn frame_count(&self, name: &str) -> Option<usize> {
        self.paths.get(name).map(Vec::len)
    }

    pub fn frame(&self, name: &str, index: usize) -> Option<&str> {
        self.paths
            .get(name)
            .and_then(|frames| frames.get(index))
            .map(String::as_str)
    }

    pub fn path_names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for Shape
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut shape = Shape::new();
        for (name, frames) in iter {
            shape.insert(name, frames);
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_uses_default_path() {
        let s = Shape::single(["a", "b"]);
        assert!(s.contains(DEFAULT_SHAPE_PATH));
        assert_eq!(s.frame_count(DEFAULT_SHAPE_PATH), Some(2));
    }

    #[test]
    fn insert_replaces_existing_path() {
        let mut s = Shape::single(["a", "b"]);
        s.insert("default", ["c"]);
        assert_eq!(s.path("default"), Some(&["c".to_string()][..]));
    }

    #[test]
    fn collects_from_pairs() {
        let s: Shape = [("default", vec!["x"]), ("up", vec!["^", "^^"])]
            .into_iter()
            .collect();
        assert_eq!(s.frame("up", 1), Some("^^"));
        let mut names: Vec<_> = s.path_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["default", "up"]);
    }

    #[test]
    fn out_of_range_frame_is_none() {
        let s = Shape::single(["a"]);
        assert_eq!(s.frame("default", 1), None);
    }
}
