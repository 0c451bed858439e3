use approx::assert_abs_diff_eq;

use super::*;
use crate::config::NotationConfig;

fn parse(text: &str) -> PatternGrid {
    parse_pattern(text, &NotationConfig::default())
}

#[test]
fn test_parse_two_bars_infers_steps() {
    let grid = parse("x..x..x.|x.x.x.x.");
    assert_eq!(grid.steps_per_bar, 8);
    assert_eq!(grid.num_bars, 2);
    assert_eq!(grid.steps.len(), 16);
    assert_eq!(grid.hit_indices(0), vec![0, 3, 6]);
    assert_eq!(grid.hit_indices(1), vec![0, 2, 4, 6]);
    assert_eq!(generate_pattern(&grid), "x..x..x.|x.x.x.x.");
}

#[test]
fn test_character_semantics() {
    let grid = parse("xXoO._0-5?");
    let steps = &grid.steps;
    assert_eq!(steps[0], PatternStep::HIT);
    for accented in &steps[1..4] {
        assert_eq!(*accented, PatternStep::ACCENT);
    }
    for rest in &steps[4..8] {
        assert!(!rest.is_hit());
    }
    assert_abs_diff_eq!(steps[8].velocity, 0.6, epsilon = 1e-9);
    assert!(!steps[8].accent);
    assert!(!steps[9].is_hit(), "unknown characters are rests");
}

#[test]
fn test_digit_velocities_round_trip() {
    let grid = parse("12345678");
    assert_abs_diff_eq!(grid.steps[0].velocity, 0.2, epsilon = 1e-9);
    assert_abs_diff_eq!(grid.steps[7].velocity, 0.9, epsilon = 1e-9);
    assert_eq!(generate_pattern(&grid), "12345678");
}

#[test]
fn test_nine_regenerates_as_full_hit() {
    let grid = parse("9");
    assert_abs_diff_eq!(grid.steps[0].velocity, 1.0, epsilon = 1e-9);
    assert_eq!(generate_pattern(&grid), "x");
}

#[test]
fn test_generate_normalizes_accent_aliases_and_rests() {
    assert_eq!(generate_pattern(&parse("o_O-|x0X.")), "X.X.|x.X.");
}

#[test]
fn test_config_steps_override_resamples() {
    let config = NotationConfig {
        steps_per_bar: Some(8),
        ..NotationConfig::default()
    };
    let grid = parse_pattern("x.x.", &config);
    assert_eq!(grid.steps_per_bar, 8);
    // floor(step * 4 / 8): each source cell covers two slots
    assert_eq!(grid.hit_indices(0), vec![0, 1, 4, 5]);
}

#[test]
fn test_mismatched_bar_lengths_are_resampled() {
    let grid = parse("x...|x.x.x.x.");
    assert_eq!(grid.steps_per_bar, 4);
    assert_eq!(grid.num_bars, 2);
    // floor(step * 8 / 4) picks cells 0, 2, 4, 6
    assert_eq!(grid.hit_indices(1), vec![0, 1, 2, 3]);
}

#[test]
fn test_empty_input_is_one_default_bar() {
    let grid = parse(" | ");
    assert_eq!(grid.steps_per_bar, DEFAULT_STEPS_PER_BAR);
    assert_eq!(grid.num_bars, 1);
    assert!(grid.steps.iter().all(|step| !step.is_hit()));
    assert_eq!(generate_pattern(&grid), ".".repeat(16));
}

#[test]
fn test_toggle_step_and_accent() {
    let grid = parse("x...");
    let toggled = toggle_step(&grid, 1);
    assert_eq!(toggled.steps[1], PatternStep::HIT);
    let toggled = toggle_step(&toggled, 0);
    assert_eq!(toggled.steps[0], PatternStep::REST);

    let accented = toggle_accent(&grid, 0);
    assert!(accented.steps[0].accent);
    let unaccented = toggle_accent(&accented, 0);
    assert_eq!(unaccented.steps[0], PatternStep::HIT);

    let from_rest = toggle_accent(&grid, 2);
    assert_eq!(from_rest.steps[2], PatternStep::ACCENT);

    // original untouched
    assert_eq!(generate_pattern(&grid), "x...");
}

#[test]
fn test_out_of_range_edit_is_noop() {
    let grid = parse("x...");
    assert_eq!(toggle_step(&grid, 99), grid);
    assert_eq!(set_step_velocity(&grid, 4, 0.5), grid);
}

#[test]
fn test_set_step_velocity_clamps() {
    let grid = parse("x...");
    assert_abs_diff_eq!(set_step_velocity(&grid, 1, 5.0).steps[1].velocity, MAX_VELOCITY);
    assert_eq!(set_step_velocity(&grid, 0, -1.0).steps[0], PatternStep::REST);
    assert_abs_diff_eq!(set_step_velocity(&grid, 0, 0.5).steps[0].velocity, 0.5);
}

#[test]
fn test_resize_preserves_content() {
    let grid = parse("x.x.|xxxx");
    let wider = resize_grid(&grid, 8, 3);
    assert_eq!(wider.steps_per_bar, 8);
    assert_eq!(wider.num_bars, 3);
    assert_eq!(wider.steps.len(), 24);
    assert_eq!(wider.hit_indices(0), vec![0, 1, 4, 5]);
    assert_eq!(wider.hit_indices(2), Vec::<usize>::new());

    let narrower = resize_grid(&grid, 2, 1);
    assert_eq!(narrower.steps.len(), 2);
    assert_eq!(narrower.hit_indices(0), vec![0, 1]);
}

#[test]
fn test_euclidean_distribution() {
    let hits: Vec<usize> = generate_euclidean(3, 8)
        .iter()
        .enumerate()
        .filter(|(_, hit)| **hit)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(hits, vec![0, 3, 6]);

    assert!(generate_euclidean(0, 5).iter().all(|hit| !hit));
    assert!(generate_euclidean(5, 5).iter().all(|hit| *hit));
    assert!(generate_euclidean(9, 5).iter().all(|hit| *hit));
    assert!(generate_euclidean(3, 0).is_empty());
    assert_eq!(generate_euclidean(5, 8).iter().filter(|hit| **hit).count(), 5);
}

#[test]
fn test_euclidean_grid() {
    let grid = PatternGrid::from_euclidean(3, 8, 4.0);
    assert_eq!(generate_pattern(&grid), "x..x..x.");
}

#[test]
fn test_shift_rotates_each_bar() {
    let grid = parse("x...|.x..");
    assert_eq!(generate_pattern(&shift_pattern(&grid, 1)), ".x..|..x.");
    assert_eq!(generate_pattern(&shift_pattern(&grid, -1)), "...x|x...");
    assert_eq!(generate_pattern(&shift_pattern(&grid, 9)), ".x..|..x.");
}

#[test]
fn test_invert_is_lossy() {
    let grid = parse("X3..");
    let inverted = invert_pattern(&grid);
    assert_eq!(generate_pattern(&inverted), "..xx");
    let back = invert_pattern(&inverted);
    assert_eq!(generate_pattern(&back), "xx..");
}

#[test]
fn test_step_at_beat_loops() {
    let grid = parse("x..x..x.|x.x.x.x.");
    assert_eq!(grid.step_at_beat(0.0), Some(0));
    assert_eq!(grid.step_at_beat(0.6), Some(1));
    assert_eq!(grid.step_at_beat(4.0), Some(8));
    assert_eq!(grid.step_at_beat(8.25), Some(0));
    assert_eq!(grid.step_at_beat(f64::NAN), None);
}
