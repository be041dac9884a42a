//! Stable category-to-color mapping for charts and legends.
//!
//! Colors come from a fixed palette, indexed by the position at which a
//! category first appears in the input. Past the palette length the
//! assignment wraps around, so two categories can share a color.

use std::collections::HashMap;

pub const PALETTE: [&str; 12] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948",
    "#B07AA1", "#FF9DA7", "#9C755F", "#BAB0AC", "#86BCB6", "#D37295",
];

pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Maps each distinct name to a palette color by first-occurrence position.
pub fn assign_colors<S: AsRef<str>>(names: &[S]) -> HashMap<String, &'static str> {
    let mut colors = HashMap::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        colors.entry(name.as_ref().to_string()).or_insert_with(|| color_for_index(index));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let first = assign_colors(&["A", "B", "C"]);
        for _ in 0..5 {
            assert_eq!(assign_colors(&["A", "B", "C"]), first);
        }
        assert_eq!(first["A"], PALETTE[0]);
        assert_eq!(first["C"], PALETTE[2]);
    }

    #[test]
    fn wraps_past_palette_length() {
        let names: Vec<String> = (0..PALETTE.len() + 2).map(|i| format!("c{i}")).collect();
        let colors = assign_colors(&names);
        assert_eq!(colors["c12"], colors["c0"]);
        assert_eq!(colors["c13"], colors["c1"]);
    }

    #[test]
    fn empty_key_gets_a_color_too() {
        let colors = assign_colors(&["Work", ""]);
        assert_eq!(colors[""], PALETTE[1]);
    }

    #[test]
    fn repeated_name_keeps_first_position() {
        let colors = assign_colors(&["A", "B", "A", "C"]);
        assert_eq!(colors["A"], PALETTE[0]);
        assert_eq!(colors["C"], PALETTE[3]);
    }
}
