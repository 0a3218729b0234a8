//! Bar view model
//!
//! The player never touches a renderer directly. It emits [`BarChange`]s
//! against a [`BarView`]; [`BarList`] is the in-memory implementation, and
//! front ends mirror it into whatever draws the bars.

use serde::{Deserialize, Serialize};

use crate::trace::Value;

/// Bar colour states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarColor {
    /// Resting colour
    #[default]
    Idle,
    /// Being compared or moved
    Active,
    /// Just placed in its sorted position
    Confirmed,
}

impl BarColor {
    /// CSS colour for this state
    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Idle => "#BD8BDD",
            BarColor::Active => "#FF0000",
            BarColor::Confirmed => "#90EE90",
        }
    }
}

/// Which property of a bar changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarProperty {
    Height(Value),
    Color(BarColor),
}

/// One visual update: (bar index, property, value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChange {
    pub index: usize,
    pub property: BarProperty,
}

impl BarChange {
    pub fn height(index: usize, height: Value) -> Self {
        Self {
            index,
            property: BarProperty::Height(height),
        }
    }

    pub fn color(index: usize, color: BarColor) -> Self {
        Self {
            index,
            property: BarProperty::Color(color),
        }
    }
}

/// Rendering collaborator driven by the player
pub trait BarView {
    fn set_height(&mut self, index: usize, height: Value);
    fn set_color(&mut self, index: usize, color: BarColor);
    /// Replace every bar with fresh idle bars of the given heights
    fn reset(&mut self, heights: &[Value]);
    /// Current heights, left to right
    fn heights(&self) -> Vec<Value>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn apply(&mut self, change: &BarChange) {
        match change.property {
            BarProperty::Height(h) => self.set_height(change.index, h),
            BarProperty::Color(c) => self.set_color(change.index, c),
        }
    }

    fn set_all_idle(&mut self) {
        for index in 0..self.len() {
            self.set_color(index, BarColor::Idle);
        }
    }
}

/// A single bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub height: Value,
    pub color: BarColor,
}

/// In-memory bar list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarList {
    pub bars: Vec<Bar>,
}

impl BarList {
    pub fn new(heights: &[Value]) -> Self {
        let mut list = Self::default();
        list.reset(heights);
        list
    }

    pub fn colors(&self) -> Vec<BarColor> {
        self.bars.iter().map(|b| b.color).collect()
    }

    /// True if no bar is highlighted
    pub fn all_idle(&self) -> bool {
        self.bars.iter().all(|b| b.color == BarColor::Idle)
    }

    fn bar_mut(&mut self, index: usize) -> Option<&mut Bar> {
        let len = self.bars.len();
        let bar = self.bars.get_mut(index);
        if bar.is_none() {
            log::warn!("Bar index {} out of range ({} bars)", index, len);
        }
        bar
    }
}

impl BarView for BarList {
    fn set_height(&mut self, index: usize, height: Value) {
        if let Some(bar) = self.bar_mut(index) {
            bar.height = height;
        }
    }

    fn set_color(&mut self, index: usize, color: BarColor) {
        if let Some(bar) = self.bar_mut(index) {
            bar.color = color;
        }
    }

    fn reset(&mut self, heights: &[Value]) {
        self.bars = heights
            .iter()
            .map(|&height| Bar {
                height,
                color: BarColor::Idle,
            })
            .collect();
    }

    fn heights(&self) -> Vec<Value> {
        self.bars.iter().map(|b| b.height).collect()
    }

    fn len(&self) -> usize {
        self.bars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes() {
        let mut bars = BarList::new(&[10, 20]);
        bars.apply(&BarChange::height(1, 90));
        bars.apply(&BarChange::color(0, BarColor::Active));
        assert_eq!(bars.heights(), vec![10, 90]);
        assert_eq!(bars.colors(), vec![BarColor::Active, BarColor::Idle]);
        assert!(!bars.all_idle());

        bars.set_all_idle();
        assert!(bars.all_idle());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut bars = BarList::new(&[10]);
        bars.apply(&BarChange::height(5, 90));
        assert_eq!(bars.heights(), vec![10]);
    }
}
