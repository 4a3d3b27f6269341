//! Zone grid metadata served through [`ZoneOracle`].

use std::collections::BTreeMap;

use map_core::{GridSpec, ZoneId, ZoneOracle};

use crate::error::{Result, SessionError};

/// Grid metadata of one registered zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneEntry {
    pub name: String,
    pub grid: GridSpec,
}

/// Every zone a session knows about.
///
/// Grid data is immutable once registered; templates resolve their cell size
/// through this registry on each shape request.
#[derive(Clone, Debug, Default)]
pub struct ZoneRegistry {
    zones: BTreeMap<ZoneId, ZoneEntry>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, zone: ZoneId, name: impl Into<String>, grid: GridSpec) -> Result<()> {
        if self.zones.contains_key(&zone) {
            return Err(SessionError::DuplicateZone { zone });
        }
        if !grid.is_usable() {
            return Err(SessionError::UnusableGrid {
                zone,
                cell_size: grid.cell_size,
            });
        }
        self.zones.insert(
            zone,
            ZoneEntry {
                name: name.into(),
                grid,
            },
        );
        Ok(())
    }

    pub fn get(&self, zone: ZoneId) -> Option<&ZoneEntry> {
        self.zones.get(&zone)
    }

    pub fn contains(&self, zone: ZoneId) -> bool {
        self.zones.contains_key(&zone)
    }

    pub fn ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl ZoneOracle for ZoneRegistry {
    fn grid(&self, zone: ZoneId) -> Option<GridSpec> {
        self.zones.get(&zone).map(|entry| entry.grid)
    }
}

#[cfg(test)]
mod tests {
    use map_core::EngineConfig;

    use super::*;

    #[test]
    fn registered_zones_resolve_their_grid() {
        let mut registry = ZoneRegistry::new();
        registry.register(ZoneId(1), "cellar", GridSpec::square(40)).unwrap();
        assert_eq!(registry.grid(ZoneId(1)), Some(GridSpec::square(40)));
        assert_eq!(registry.grid(ZoneId(2)), None);
        assert_eq!(registry.get(ZoneId(1)).map(|e| e.name.as_str()), Some("cellar"));
    }

    #[test]
    fn zones_register_once() {
        let mut registry = ZoneRegistry::new();
        registry.register(ZoneId(1), "a", GridSpec::square(50)).unwrap();
        assert_eq!(
            registry.register(ZoneId(1), "b", GridSpec::square(50)),
            Err(SessionError::DuplicateZone { zone: ZoneId(1) })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn grids_must_fit_template_extents() {
        let mut registry = ZoneRegistry::new();
        for cell_size in [0, -50, i32::MAX, EngineConfig::MAX_CELL_SIZE + 1] {
            assert_eq!(
                registry.register(ZoneId(1), "vast", GridSpec::square(cell_size)),
                Err(SessionError::UnusableGrid {
                    zone: ZoneId(1),
                    cell_size
                })
            );
        }
        assert!(registry.is_empty());
        registry
            .register(ZoneId(1), "vast", GridSpec::square(EngineConfig::MAX_CELL_SIZE))
            .unwrap();
    }
}
