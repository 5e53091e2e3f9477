//! Named input axes.
//!
//! The pipeline only ever asks "what is the value of axis `name` this
//! tick?". Anything that can answer is an [`AxisInputProvider`]: a
//! [`InputAxisMap`] filled by the host, [`NoInput`], or a closure.

use rustc_hash::FxHashMap;

/// Read-only source of named axis values, stable for the duration of a tick.
pub trait AxisInputProvider {
    /// Current value of the axis, conceptually in `-1..=1`. Unknown axes
    /// read as zero.
    fn axis_value(&self, name: &str) -> f32;
}

impl<F> AxisInputProvider for F
where
    F: Fn(&str) -> f32,
{
    fn axis_value(&self, name: &str) -> f32 {
        self(name)
    }
}

/// Provider that reports zero on every axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl AxisInputProvider for NoInput {
    fn axis_value(&self, _name: &str) -> f32 {
        0.0
    }
}

/// Axis values written by the host once per tick.
#[derive(Debug, Clone, Default)]
pub struct InputAxisMap {
    values: FxHashMap<String, f32>,
}

impl InputAxisMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of an axis.
    pub fn set(&mut self, name: &str, value: f32) {
        if let Some(v) = self.values.get_mut(name) {
            *v = value;
        } else {
            let _ = self.values.insert(name.to_owned(), value);
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: &str, value: f32) -> Self {
        self.set(name, value);
        self
    }

    /// Resets every axis to zero (keeps the names).
    pub fn zero_all(&mut self) {
        for v in self.values.values_mut() {
            *v = 0.0;
        }
    }

    /// Removes every axis.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl AxisInputProvider for InputAxisMap {
    fn axis_value(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_axis_reads_zero() {
        let map = InputAxisMap::new().with("Mouse X", 0.5);
        assert_eq!(map.axis_value("Mouse X"), 0.5);
        assert_eq!(map.axis_value("Mouse Y"), 0.0);
    }

    #[test]
    fn zero_all_keeps_names() {
        let mut map = InputAxisMap::new().with("Mouse X", 0.5);
        map.zero_all();
        assert_eq!(map.axis_value("Mouse X"), 0.0);
        map.set("Mouse X", -1.0);
        assert_eq!(map.axis_value("Mouse X"), -1.0);
    }

    #[test]
    fn closures_are_providers() {
        let provider = |name: &str| if name == "Mouse X" { 1.0 } else { 0.0 };
        assert_eq!(provider.axis_value("Mouse X"), 1.0);
        assert_eq!(NoInput.axis_value("Mouse X"), 0.0);
    }
}
