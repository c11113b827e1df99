//! A circle whose area and perimeter are computed on first use

use super::expect_f64;
use crate::lazy::{LazySlot, LazyState};
use crate::object::{Object, TypeDef};
use crate::storage::InstanceStorage;
use crate::types::{Result, SlotError, Value};
use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

static CIRCLE_TYPE: OnceLock<Arc<TypeDef>> = OnceLock::new();

fn radius_of(storage: &InstanceStorage) -> Result<f64> {
    let value = storage
        .get("radius")
        .ok_or_else(|| SlotError::missing("Circle", "radius"))?;
    expect_f64("radius", value)
}

/// A circle with lazily computed `area` and `perimeter`
///
/// Cached values are not invalidated when the radius changes; delete them
/// with [`Circle::reset_area`] / [`Circle::reset_perimeter`] to recompute.
#[derive(Debug, Clone)]
pub struct Circle {
    object: Object,
}

impl Circle {
    /// The shared `Circle` type definition
    pub fn type_def() -> &'static Arc<TypeDef> {
        CIRCLE_TYPE.get_or_init(|| {
            TypeDef::builder("Circle")
                .with_lazy(LazySlot::new("area", |storage| {
                    log::info!("Computing area");
                    let r = radius_of(storage)?;
                    Ok(Value::Float(PI * r * r))
                }))
                .with_lazy(LazySlot::new("perimeter", |storage| {
                    log::info!("Computing perimeter");
                    Ok(Value::Float(2.0 * PI * radius_of(storage)?))
                }))
                .build()
        })
    }

    pub fn new(radius: f64) -> Result<Self> {
        let mut object = Object::new(Arc::clone(Self::type_def()));
        object.set("radius", radius)?;
        Ok(Self { object })
    }

    pub fn radius(&self) -> Result<f64> {
        radius_of(self.object.vars())
    }

    /// Change the radius; cached derived values are left as they are
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        self.object.set("radius", radius)
    }

    pub fn area(&mut self) -> Result<f64> {
        let value = self.object.get("area")?;
        expect_f64("area", &value)
    }

    pub fn perimeter(&mut self) -> Result<f64> {
        let value = self.object.get("perimeter")?;
        expect_f64("perimeter", &value)
    }

    /// Overwrite the cached area with a plain value
    pub fn set_area(&mut self, value: impl Into<Value>) -> Result<()> {
        self.object.set("area", value)
    }

    /// Drop the cached area so the next read recomputes it
    pub fn reset_area(&mut self) -> Result<()> {
        self.object.delete("area")
    }

    /// Drop the cached perimeter so the next read recomputes it
    pub fn reset_perimeter(&mut self) -> Result<()> {
        self.object.delete("perimeter")
    }

    pub fn lazy_state(&self, name: &str) -> Option<LazyState<'_>> {
        self.object.lazy_state(name)
    }

    /// The instance's own storage
    pub fn vars(&self) -> &InstanceStorage {
        self.object.vars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_computed_on_first_read() {
        let mut c = Circle::new(4.0).unwrap();
        assert_eq!(c.vars().len(), 1);
        assert_eq!(c.lazy_state("area"), Some(LazyState::Uncomputed));

        let area = c.area().unwrap();
        assert!((area - 16.0 * PI).abs() < 1e-9);
        assert_eq!(c.lazy_state("area"), Some(LazyState::Computed(&Value::Float(area))));
        assert_eq!(c.lazy_state("perimeter"), Some(LazyState::Uncomputed));

        let perimeter = c.perimeter().unwrap();
        assert!((perimeter - 8.0 * PI).abs() < 1e-9);
        assert_eq!(c.vars().len(), 3);
    }

    #[test]
    fn test_radius_reads_through_shared_borrow() {
        let mut c = Circle::new(1.5).unwrap();
        let view: &Circle = &c;
        assert_eq!(view.radius().unwrap(), 1.5);

        c.set_radius(3.0).unwrap();
        assert_eq!(c.radius().unwrap(), 3.0);
        assert_eq!(c.lazy_state("area"), Some(LazyState::Uncomputed));
    }

    #[test]
    fn test_stale_cache_after_radius_change() {
        let mut c = Circle::new(1.0).unwrap();
        let before = c.area().unwrap();

        c.set_radius(2.0).unwrap();
        assert_eq!(c.area().unwrap(), before);

        c.reset_area().unwrap();
        assert!((c.area().unwrap() - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_assigned_area_wins() {
        let mut c = Circle::new(4.0).unwrap();
        c.area().unwrap();
        c.set_area(25).unwrap();
        assert_eq!(c.area().unwrap(), 25.0);

        c.set_area("big").unwrap();
        assert!(matches!(c.area(), Err(SlotError::TypeValidation { .. })));
    }

    #[test]
    fn test_reset_before_compute_is_missing() {
        let mut c = Circle::new(4.0).unwrap();
        assert!(matches!(c.reset_perimeter(), Err(SlotError::MissingAttribute { .. })));
    }
}
