use super::TemplateShape;
use crate::geometry::CellPoint;
use crate::grid::GridSpec;

#[derive(Clone, Debug)]
struct CachedShape {
    /// Grid the shape was built for; `None` when the zone was unresolved.
    key: Option<GridSpec>,
    shape: TemplateShape,
}

/// Memoized shape of one template plus the scratch buffer its path is walked into.
#[derive(Clone, Debug, Default)]
pub(super) struct ShapeCache {
    entry: Option<CachedShape>,
    path: Vec<CellPoint>,
    rebuilds: u64,
}

impl ShapeCache {
    pub(super) fn invalidate(&mut self) {
        self.entry = None;
    }

    pub(super) fn path(&self) -> &[CellPoint] {
        &self.path
    }

    pub(super) fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Returns the cached shape if it was built for `key`, otherwise rebuilds it.
    ///
    /// An unresolved grid caches an empty shape without calling `build`.
    pub(super) fn get_or_build<F>(&mut self, key: Option<GridSpec>, build: F) -> &TemplateShape
    where
        F: FnOnce(GridSpec, &mut Vec<CellPoint>) -> TemplateShape,
    {
        if let Some(cached) = self.entry.take()
            && cached.key == key
        {
            return &self.entry.insert(cached).shape;
        }

        self.rebuilds += 1;
        let shape = match key {
            Some(grid) => build(grid, &mut self.path),
            None => {
                self.path.clear();
                TemplateShape::empty()
            }
        };
        &self.entry.insert(CachedShape { key, shape }).shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Region};

    fn block(_: GridSpec, path: &mut Vec<CellPoint>) -> TemplateShape {
        path.push(CellPoint::ORIGIN);
        TemplateShape {
            area: Region::from_rect(Rect::new(0, 0, 10, 10)),
            ..TemplateShape::empty()
        }
    }

    #[test]
    fn same_key_reuses_the_entry() {
        let mut cache = ShapeCache::default();
        let key = Some(GridSpec::square(10));
        cache.get_or_build(key, block);
        cache.get_or_build(key, |_, _| panic!("rebuilt a cached shape"));
        assert_eq!(cache.rebuilds(), 1);
        assert_eq!(cache.path(), &[CellPoint::ORIGIN]);
    }

    #[test]
    fn new_grid_or_invalidation_rebuilds() {
        let mut cache = ShapeCache::default();
        cache.get_or_build(Some(GridSpec::square(10)), block);
        cache.get_or_build(Some(GridSpec::square(20)), block);
        cache.invalidate();
        cache.get_or_build(Some(GridSpec::square(20)), block);
        assert_eq!(cache.rebuilds(), 3);
    }

    #[test]
    fn unresolved_grid_caches_an_empty_shape() {
        let mut cache = ShapeCache::default();
        let shape = cache.get_or_build(None, |_, _| panic!("built without a grid"));
        assert!(shape.is_empty());
        cache.get_or_build(None, block);
        assert_eq!(cache.rebuilds(), 1);
        assert!(cache.path().is_empty());
    }
}
