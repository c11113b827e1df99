//! Callback demonstration
//!
//! Feeds `add(x, y)` results into a [`CallCounter`], incrementing both
//! operands after every call. Each completed call writes the counter's report
//! line to the output.

use anyhow::{anyhow, Result};
use attr_slots::{invoke, CallCounter, Callback};
use std::io::Write;

use crate::config::CallbackConfig;

fn add((x, y): (i64, i64)) -> Result<i64> {
    x.checked_add(y)
        .ok_or_else(|| anyhow!("add({}, {}) overflows i64", x, y))
}

/// Operand for call number `step`, starting from `start`
fn operand(start: i64, step: usize) -> Result<i64> {
    i64::try_from(step)
        .ok()
        .and_then(|step| start.checked_add(step))
        .ok_or_else(|| anyhow!("operand {} + {} overflows i64", start, step))
}

/// Run the callback demo and return the final call count
pub fn run<W: Write>(config: &CallbackConfig, out: &mut W) -> Result<u64> {
    log::debug!(
        "Callback demo: {} iterations starting at ({}, {})",
        config.iterations,
        config.start_x,
        config.start_y
    );

    let mut counter = CallCounter::new();
    let mut report = |result: i64| -> Result<()> {
        Callback::<i64, anyhow::Error>::call(&mut counter, result)?;
        writeln!(out, "{}", counter.report(result))?;
        Ok(())
    };

    for step in 0..config.iterations {
        let x = operand(config.start_x, step)?;
        let y = operand(config.start_y, step)?;
        invoke(add, (x, y), &mut report)?;
    }

    Ok(counter.count())
}
