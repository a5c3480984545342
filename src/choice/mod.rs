//! One-shot choice menus
//!
//! A menu lays its options out as a vertical stack of disjoint boxes.
//! A click inside a box yields that option's target exactly once and
//! hides the menu.

use crate::types::{Choice, ChoiceTarget, Point, Rect, Viewport};

const BOX_WIDTH: f32 = 700.0;
const BOX_HEIGHT: f32 = 60.0;
const BOX_GAP: f32 = 15.0;

/// A laid-out option
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRegion {
    pub choice: Choice,
    pub bounds: Rect,
}

/// Choice menu state
#[derive(Debug, Clone, Default)]
pub struct ChoiceMenu {
    regions: Vec<ChoiceRegion>,
    visible: bool,
}

impl ChoiceMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `options` for `viewport` and start capturing input
    pub fn present(&mut self, options: Vec<Choice>, viewport: Viewport) {
        self.regions = layout(options, viewport);
        self.visible = !self.regions.is_empty();
        log::debug!("presenting {} choices", self.regions.len());
    }

    /// Resolve a click; returns the chosen target at most once
    pub fn handle_pointer(&mut self, position: Point) -> Option<ChoiceTarget> {
        if !self.visible {
            return None;
        }
        let index = self.hover(position)?;
        self.take(index)
    }

    /// Pick an option by index, as if its box had been clicked
    pub fn select(&mut self, index: usize) -> Option<ChoiceTarget> {
        if !self.visible || index >= self.regions.len() {
            return None;
        }
        self.take(index)
    }

    /// Index of the option under `position`, for hover highlighting
    pub fn hover(&self, position: Point) -> Option<usize> {
        if !self.visible {
            return None;
        }
        self.regions
            .iter()
            .position(|region| region.bounds.contains(position))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn regions(&self) -> &[ChoiceRegion] {
        if self.visible { &self.regions } else { &[] }
    }

    fn take(&mut self, index: usize) -> Option<ChoiceTarget> {
        let region = self.regions.get(index)?;
        log::debug!("choice {} selected: {}", index, region.choice.label);
        let target = region.choice.target.clone();
        self.visible = false;
        self.regions.clear();
        Some(target)
    }
}

fn layout(options: Vec<Choice>, viewport: Viewport) -> Vec<ChoiceRegion> {
    let x = (viewport.width - BOX_WIDTH) / 2.0;
    let y_start = viewport.height / 2.0 - (options.len() as f32 * (BOX_HEIGHT + BOX_GAP)) / 2.0;

    options
        .into_iter()
        .enumerate()
        .map(|(i, choice)| ChoiceRegion {
            choice,
            bounds: Rect::new(
                x,
                y_start + i as f32 * (BOX_HEIGHT + BOX_GAP),
                BOX_WIDTH,
                BOX_HEIGHT,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_options() -> Vec<Choice> {
        vec![
            Choice::to_script("Pumunta", "pumunta"),
            Choice::to_script("Bumalik", "bumalik"),
            Choice::to_script("Maghintay", "maghintay"),
        ]
    }

    #[test]
    fn regions_are_disjoint_and_centred() {
        let mut menu = ChoiceMenu::new();
        menu.present(three_options(), Viewport::new(1600.0, 900.0));

        let regions = menu.regions();
        assert_eq!(regions.len(), 3);
        for (i, a) in regions.iter().enumerate() {
            assert_eq!(a.bounds.x, 450.0);
            for b in &regions[i + 1..] {
                assert!(!a.bounds.intersects(&b.bounds));
            }
        }
        assert_eq!(regions[0].bounds.y, 450.0 - 3.0 * 75.0 / 2.0);
    }

    #[test]
    fn click_selects_exactly_once() {
        let mut menu = ChoiceMenu::new();
        menu.present(three_options(), Viewport::default());
        let second = menu.regions()[1].bounds.center();

        assert_eq!(
            menu.handle_pointer(second),
            Some(ChoiceTarget::Script("bumalik".to_string()))
        );
        assert!(!menu.is_visible());
        assert_eq!(menu.handle_pointer(second), None);
    }

    #[test]
    fn click_outside_every_region_is_ignored() {
        let mut menu = ChoiceMenu::new();
        menu.present(three_options(), Viewport::default());

        assert_eq!(menu.handle_pointer(Point::new(5.0, 5.0)), None);
        // the gap between two boxes belongs to neither
        let gap = Point::new(800.0, menu.regions()[0].bounds.y + BOX_HEIGHT + 5.0);
        assert_eq!(menu.handle_pointer(gap), None);
        assert!(menu.is_visible());
    }

    #[test]
    fn select_by_index() {
        let mut menu = ChoiceMenu::new();
        menu.present(three_options(), Viewport::default());

        assert_eq!(menu.select(7), None);
        assert_eq!(
            menu.select(2),
            Some(ChoiceTarget::Script("maghintay".to_string()))
        );
        assert_eq!(menu.select(0), None);
    }

    #[test]
    fn empty_menu_never_becomes_visible() {
        let mut menu = ChoiceMenu::new();
        menu.present(Vec::new(), Viewport::default());
        assert!(!menu.is_visible());
    }

    #[test]
    fn hover_reports_region_under_pointer() {
        let mut menu = ChoiceMenu::new();
        menu.present(three_options(), Viewport::default());
        let first = menu.regions()[0].bounds.center();

        assert_eq!(menu.hover(first), Some(0));
        assert_eq!(menu.hover(Point::new(0.0, 0.0)), None);
    }
}
