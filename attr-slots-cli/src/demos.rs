//! Point and circle demonstrations

use anyhow::{Context, Result};
use attr_slots::{Circle, DataDescriptor, LazyState, Point};
use std::io::Write;

use crate::config::{CircleConfig, PointConfig};
use crate::report::render_vars;

/// Construct points and compare class-level and instance-level access
pub fn run_point<W: Write>(config: &PointConfig, json: bool, out: &mut W) -> Result<()> {
    let slot_x = Point::slot("x")?;

    for num in 0..config.iterations {
        let num = i64::try_from(num).context("Point coordinate overflow")?;
        let mut p = Point::new(num, num + 1)
            .with_context(|| format!("Failed to construct Point({}, {})", num, num + 1))?;

        // Access via the type yields the slot, via the instance the value
        writeln!(out, "Point.x: {}", slot_x)?;
        writeln!(
            out,
            "p.x: {}, via slot: {}",
            p.x()?,
            slot_x.read("Point", p.vars())?
        )?;

        p.set_y(5)?;
        writeln!(out, "p.y: {}", p.y()?)?;

        // Object::set routes through the `y` slot, so validation still applies
        p.as_object_mut().set("y", 34)?;
        writeln!(out, "p.y after set: {}", p.y()?)?;
        writeln!(out, "vars(p): {}", render_vars(p.vars(), json)?)?;
    }

    log::debug!("Point demo finished after {} iterations", config.iterations);
    Ok(())
}

/// Read a lazy circle attribute, announcing when the read had to compute it
fn read_lazy<W: Write>(
    c: &mut Circle,
    name: &str,
    read: fn(&mut Circle) -> attr_slots::Result<f64>,
    out: &mut W,
) -> Result<f64> {
    let was_uncomputed = matches!(c.lazy_state(name), Some(LazyState::Uncomputed));
    let value = read(c)?;
    if was_uncomputed && matches!(c.lazy_state(name), Some(LazyState::Computed(_))) {
        writeln!(out, "Computing {}", name)?;
    }
    Ok(value)
}

/// Walk a circle through the lazy attribute lifecycle
pub fn run_circle<W: Write>(config: &CircleConfig, json: bool, out: &mut W) -> Result<()> {
    let mut c = Circle::new(config.radius)?;
    writeln!(out, "vars(c): {}", render_vars(c.vars(), json)?)?;

    let area = read_lazy(&mut c, "area", Circle::area, out)?;
    writeln!(out, "c.area: {}", area)?;
    let perimeter = read_lazy(&mut c, "perimeter", Circle::perimeter, out)?;
    writeln!(out, "c.perimeter: {}", perimeter)?;
    writeln!(out, "vars(c): {}", render_vars(c.vars(), json)?)?;

    c.reset_area()?;
    writeln!(out, "after del c.area, vars(c): {}", render_vars(c.vars(), json)?)?;

    // Nothing ties a plain assignment back to the radius
    c.set_area(25)?;
    let area = read_lazy(&mut c, "area", Circle::area, out)?;
    writeln!(out, "after c.area = 25, c.area: {}", area)?;
    writeln!(out, "vars(c): {}", render_vars(c.vars(), json)?)?;

    Ok(())
}
