use super::*;
use crate::domain::config::Palette;

fn calm_world(width: u32, height: u32) -> WorldCore {
    WorldCore::from_config(WorldConfig::with_size(width, height).wind_chance(0.0).seed(7)).unwrap()
}

fn world_with_health(width: u32, height: u32, water_health: i32) -> WorldCore {
    let mut config = WorldConfig::with_size(width, height).wind_chance(0.0).seed(7);
    config.palette.water_health = water_health;
    WorldCore::from_config(config).unwrap()
}

#[test]
fn sand_falls_one_row_per_tick_and_rests_on_the_floor() {
    let mut world = calm_world(10, 10);
    let id = world.add_particle(5, 0, ParticleKind::Sand).unwrap();

    world.step();
    assert_eq!(world.particle(id).unwrap().position(), (5, 1));

    for _ in 0..8 {
        world.step();
    }
    assert_eq!(world.particle(id).unwrap().position(), (5, 9));

    world.step();
    assert_eq!(world.particle(id).unwrap().position(), (5, 9));
    assert_eq!(world.frame(), 10);
    assert_eq!(world.kind_at(5, 9), Some(ParticleKind::Sand));
    assert!(world.map().is_empty(5, 0));
    world.validate().unwrap();
}

#[test]
fn water_on_sand_evaporates_but_keeps_its_slot() {
    let mut world = world_with_health(1, 2, 2);
    let water = world.add_particle(0, 0, ParticleKind::Water).unwrap();
    world.add_particle(0, 1, ParticleKind::Sand).unwrap();

    world.step();
    assert_eq!(world.particle(water).unwrap().health(), Some(1));
    assert_eq!(world.kind_at(0, 0), Some(ParticleKind::Water));

    world.step();
    assert_eq!(world.particle(water).unwrap().health(), Some(0));
    assert!(world.map().is_empty(0, 0));
    assert_eq!(world.particle_count(), 2);
    assert_eq!(world.active_particle_count(), 1);
    world.validate().unwrap();

    // Stays gone
    world.step();
    assert!(world.map().is_empty(0, 0));
    assert_eq!(world.particle(water).unwrap().health(), Some(0));
}

#[test]
fn water_under_sand_evaporates_then_sand_drops_in() {
    let mut world = world_with_health(1, 2, 1);
    world.add_particle(0, 0, ParticleKind::Sand).unwrap();
    world.add_particle(0, 1, ParticleKind::Water).unwrap();

    world.step();
    assert_eq!(world.kind_at(0, 0), Some(ParticleKind::Sand));
    assert!(world.map().is_empty(0, 1));

    world.step();
    assert_eq!(world.kind_at(0, 1), Some(ParticleKind::Sand));
    world.validate().unwrap();
}

#[test]
fn brush_places_two_by_two_and_skips_taken_cells() {
    let mut world = calm_world(10, 10);
    assert_eq!(world.place_brush(3, 3, ParticleKind::Sand), 4);
    for (dx, dy) in BRUSH_OFFSETS {
        assert_eq!(world.kind_at(3 + dx, 3 + dy), Some(ParticleKind::Sand));
    }
    assert_eq!(world.place_brush(3, 3, ParticleKind::Water), 0);
    assert_eq!(world.particle_count(), 4);
}

#[test]
fn brush_clips_at_the_grid_edge() {
    let mut world = calm_world(10, 10);
    assert_eq!(world.place_brush(9, 9, ParticleKind::Stone), 1);
    assert_eq!(world.place_brush(-1, -1, ParticleKind::Stone), 1);
    assert_eq!(world.kind_at(0, 0), Some(ParticleKind::Stone));
    assert_eq!(world.place_brush(50, 50, ParticleKind::Stone), 0);
}

#[test]
fn stone_never_moves() {
    let mut world = calm_world(5, 5);
    let id = world.add_particle(2, 1, ParticleKind::Stone).unwrap();
    for _ in 0..20 {
        world.step();
    }
    assert_eq!(world.particle(id).unwrap().position(), (2, 1));
}

#[test]
fn sand_piles_on_stone() {
    let mut world = calm_world(5, 5);
    world.add_particle(2, 2, ParticleKind::Stone).unwrap();
    let sand = world.add_particle(2, 0, ParticleKind::Sand).unwrap();
    world.step();
    assert_eq!(world.particle(sand).unwrap().position(), (2, 1));
    // Next tick it slides off one side or the other
    world.step();
    let (x, y) = world.particle(sand).unwrap().position();
    assert_eq!(y, 2);
    assert!(x == 1 || x == 3);
}

#[test]
fn first_particle_in_store_order_wins_a_contested_cell() {
    let mut world = calm_world(3, 2);
    let left = world.add_particle(0, 0, ParticleKind::Sand).unwrap();
    let right = world.add_particle(2, 0, ParticleKind::Sand).unwrap();
    world.add_particle(0, 1, ParticleKind::Stone).unwrap();
    world.add_particle(2, 1, ParticleKind::Stone).unwrap();
    world.enable_perf_metrics(true);

    world.step();
    assert_eq!(world.particle(left).unwrap().position(), (1, 1));
    assert_eq!(world.particle(right).unwrap().position(), (2, 0));
    let stats = world.perf_stats();
    assert_eq!(stats.contested_moves(), 1);
    assert_eq!(stats.particles_moved(), 1);
    assert_eq!(stats.particles_processed(), 4);
    world.validate().unwrap();
}

#[test]
fn particles_are_conserved_and_invariants_hold_under_wind() {
    let mut config = WorldConfig::with_size(32, 24).wind_chance(0.5).seed(42);
    config.palette.water_health = 3;
    let mut world = WorldCore::from_config(config).unwrap();
    world.add_line(0, 18, 20, 22, ParticleKind::Stone);
    for i in 0..8 {
        world.place_brush(i * 4, 0, ParticleKind::Sand);
        world.place_brush(i * 4 + 1, 4, ParticleKind::Water);
    }
    world.enable_perf_metrics(true);

    let mut total_evaporated = 0;
    for frame in 0..200 {
        let input = if frame < 40 && frame % 4 == 0 {
            let kind = if frame % 8 == 0 { ParticleKind::Sand } else { ParticleKind::Water };
            FrameInput::brush(16, 0, kind)
        } else {
            FrameInput::idle(ParticleKind::Sand)
        };
        let slots_before = world.particle_count();
        let active_before = world.active_particle_count();
        world.tick(&input);

        let stats = world.perf_stats();
        let placed = stats.placed() as usize;
        let evaporated = stats.evaporated() as usize;
        let active_after = world.active_particle_count();

        // Only placement adds, only evaporation removes
        assert_eq!(active_after + evaporated, active_before + placed, "frame {}", frame);
        if placed == 0 {
            assert!(active_after <= active_before, "frame {}", frame);
        }
        assert_eq!(world.particle_count(), slots_before + placed);
        total_evaporated += evaporated;

        world.validate().unwrap();
        assert_eq!(world.map().occupied_count(), active_after);
    }
    assert!(total_evaporated > 0);
}

#[test]
fn same_seed_same_world() {
    let run = || {
        let config = WorldConfig::with_size(24, 24).wind_chance(0.3).seed(99);
        let mut world = WorldCore::from_config(config).unwrap();
        for frame in 0..60 {
            let kind = if frame % 3 == 0 { ParticleKind::Water } else { ParticleKind::Sand };
            world.tick(&FrameInput::brush(12, 0, kind));
        }
        for _ in 0..60 {
            world.tick(&FrameInput::idle(ParticleKind::Sand));
        }
        let positions: Vec<_> = world.particles().map(|(_, p)| *p).collect();
        (positions, world.pixels().to_vec())
    };
    assert_eq!(run(), run());
}

#[test]
fn tick_steps_before_placing() {
    let mut world = calm_world(4, 4);
    world.tick(&FrameInput::brush(0, 0, ParticleKind::Sand));
    // Placed after the step, so still at the cursor
    assert_eq!(world.kind_at(0, 0), Some(ParticleKind::Sand));
    assert_eq!(world.kind_at(1, 1), Some(ParticleKind::Sand));
    assert_eq!(world.frame(), 1);
    // and already visible
    assert_eq!(world.pixels()[0], Palette::default().sand);
}

#[test]
fn tick_records_placements_in_perf_stats() {
    let mut world = calm_world(4, 4);
    world.enable_perf_metrics(true);
    world.tick(&FrameInput::brush(2, 2, ParticleKind::Water));
    assert_eq!(world.perf_stats().placed(), 4);

    world.enable_perf_metrics(false);
    assert_eq!(world.perf_stats(), PerfStats::default());
}

#[test]
fn full_store_rejects_placement_on_free_cells() {
    let mut world = world_with_health(1, 2, 1);
    world.add_particle(0, 0, ParticleKind::Water).unwrap();
    world.add_particle(0, 1, ParticleKind::Sand).unwrap();
    world.step();
    assert!(world.map().is_empty(0, 0));

    // Cell is free but both slots are spent
    assert_eq!(world.add_particle(0, 0, ParticleKind::Sand), None);
    assert!(world.capacity_warned);
    assert_eq!(world.place_brush(0, 0, ParticleKind::Sand), 0);
}

#[test]
fn clear_resets_everything() {
    let mut world = calm_world(6, 6);
    world.place_brush(1, 1, ParticleKind::Sand);
    world.tick(&FrameInput::idle(ParticleKind::Sand));
    world.clear();

    assert_eq!(world.particle_count(), 0);
    assert_eq!(world.frame(), 0);
    assert_eq!(world.map().occupied_count(), 0);
    assert!(world.pixels().iter().all(|&p| p == Palette::default().background));
    assert_eq!(world.place_brush(1, 1, ParticleKind::Sand), 4);
}

#[test]
fn rasterize_paints_kinds_and_background() {
    let mut world = calm_world(3, 1);
    world.add_particle(0, 0, ParticleKind::Sand).unwrap();
    world.add_particle(2, 0, ParticleKind::Stone).unwrap();
    world.rasterize();

    let palette = Palette::default();
    assert_eq!(world.pixels(), &[palette.sand, palette.background, palette.stone]);
}

#[test]
fn evaporated_water_is_not_drawn() {
    let mut world = world_with_health(1, 2, 1);
    world.add_particle(0, 0, ParticleKind::Water).unwrap();
    world.add_particle(0, 1, ParticleKind::Sand).unwrap();
    world.tick(&FrameInput::idle(ParticleKind::Sand));

    let palette = Palette::default();
    assert_eq!(world.pixels(), &[palette.background, palette.sand]);
}

#[test]
fn add_line_draws_endpoints_inclusive() {
    let mut world = calm_world(10, 10);
    assert_eq!(world.add_line(0, 5, 9, 5, ParticleKind::Stone), 10);
    assert_eq!(world.add_line(0, 0, 3, 3, ParticleKind::Stone), 4);
    assert_eq!(world.kind_at(2, 2), Some(ParticleKind::Stone));
    // Crosses the first line at (5, 5): that cell is skipped
    assert_eq!(world.add_line(5, 3, 5, 7, ParticleKind::Sand), 4);
    // Mostly off-grid
    assert_eq!(world.add_line(-5, 9, 2, 9, ParticleKind::Stone), 3);
}

#[test]
fn add_line_with_extreme_endpoints_draws_only_the_visible_part() {
    let mut world = calm_world(8, 8);
    assert_eq!(world.add_line(i32::MIN, 0, i32::MAX, 0, ParticleKind::Stone), 8);
    assert_eq!(world.add_line(-200_000_000, 3, 200_000_000, 3, ParticleKind::Stone), 8);
    assert_eq!(world.add_line(i32::MAX, 5, i32::MIN, 5, ParticleKind::Stone), 8);
    // Rows 0, 3 and 5 are already stone
    assert_eq!(world.add_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, ParticleKind::Sand), 5);
    for i in 1..8 {
        if i != 3 && i != 5 {
            assert_eq!(world.kind_at(i, i), Some(ParticleKind::Sand));
        }
    }
    // Entirely off-grid
    assert_eq!(world.add_line(i32::MIN, -1, i32::MAX, -1, ParticleKind::Stone), 0);
    assert_eq!(world.add_line(i32::MAX, i32::MAX, i32::MAX, i32::MAX, ParticleKind::Stone), 0);
    world.validate().unwrap();
}

#[test]
fn brush_near_i32_limits_is_a_no_op() {
    let mut world = calm_world(8, 8);
    assert_eq!(world.place_brush(i32::MAX, i32::MAX, ParticleKind::Sand), 0);
    assert_eq!(world.place_brush(i32::MIN, 0, ParticleKind::Sand), 0);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn lsystem_far_off_grid_or_oversized_is_handled() {
    let mut world = calm_world(32, 32);
    let far = LSystemConfig {
        iterations: 2,
        origin: Some((1.0e30, -1.0e30)),
        ..LSystemConfig::default()
    };
    assert_eq!(world.stamp_lsystem(&far).unwrap(), 0);

    let oversized = LSystemConfig { step_length: 1000.0, ..LSystemConfig::default() };
    assert!(matches!(world.stamp_lsystem(&oversized), Err(ConfigError::InvalidLSystem(_))));
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn default_lsystem_grows_a_stone_tree() {
    let mut world = calm_world(200, 150);
    let placed = world.stamp_lsystem(&LSystemConfig::default()).unwrap();
    assert!(placed > 100);
    assert!(world.particles().all(|(_, p)| p.kind() == ParticleKind::Stone));
    world.validate().unwrap();

    // Stone trees are static
    let before: Vec<_> = world.map().occupied().collect();
    world.step();
    assert_eq!(world.map().occupied().collect::<Vec<_>>(), before);
}

#[test]
fn lsystem_with_fixed_origin_is_reproducible() {
    let config = LSystemConfig {
        iterations: 3,
        origin: Some((40.0, 79.0)),
        kind: ParticleKind::Sand,
        ..LSystemConfig::default()
    };
    let mut a = calm_world(80, 80);
    let mut b = calm_world(80, 80);
    assert_eq!(a.stamp_lsystem(&config).unwrap(), b.stamp_lsystem(&config).unwrap());
    assert_eq!(a.kind_at(40, 79), Some(ParticleKind::Sand));
}

#[test]
fn bad_lsystem_is_rejected_without_side_effects() {
    let mut world = calm_world(20, 20);
    let mut config = LSystemConfig::default();
    config.rules.insert("".to_string(), "F".to_string());
    assert!(matches!(world.stamp_lsystem(&config), Err(ConfigError::InvalidLSystem(_))));
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn run_frame_polls_ticks_and_presents() {
    let mut world = calm_world(8, 8);
    let mut tools = ToolState::new(world.config().keys.clone(), 8, 8);
    tools.pointer_moved(40.0, 0.0, 80.0, 80.0);
    tools.key_pressed("3");
    tools.set_primary(true);

    let mut presented = Vec::new();
    let mut sink = |view: FrameView<'_>| {
        presented.push((view.frame, view.pixels.len(), view.pixels[4]));
    };
    world.run_frame(&mut tools, &mut sink);
    tools.set_primary(false);
    world.run_frame(&mut tools, &mut sink);

    assert_eq!(world.kind_at(4, 0), Some(ParticleKind::Stone));
    let stone = Palette::default().stone;
    assert_eq!(presented, vec![(1, 64, stone), (2, 64, stone)]);
}

#[test]
fn wind_chance_setter_clamps() {
    let mut world = calm_world(4, 4);
    world.set_wind_chance(3.0);
    assert_eq!(world.wind_chance(), 1.0);
    world.set_wind_chance(-1.0);
    assert_eq!(world.wind_chance(), 0.0);
    world.set_wind_chance(f32::NAN);
    assert_eq!(world.wind_chance(), 0.0);
}

#[test]
fn invalid_config_is_an_error() {
    assert!(matches!(
        WorldCore::from_config(WorldConfig::with_size(0, 4)),
        Err(ConfigError::InvalidDimensions { .. })
    ));
    let json = r#"{"width": 4, "height": 4, "wind_chance": 2.0}"#;
    assert!(WorldCore::from_config_json(json).is_err());
}

#[test]
fn validate_reports_a_corrupted_map() {
    let mut world = calm_world(4, 4);
    let id = world.add_particle(1, 1, ParticleKind::Stone).unwrap();
    world.map.set(1, 1, None);
    world.map.set(2, 2, Some(id));
    assert!(matches!(world.validate(), Err(InvariantViolation::NotIndexed { .. })));

    world.map.set(1, 1, Some(id));
    assert!(matches!(world.validate(), Err(InvariantViolation::MisplacedCell { .. })));

    world.map.set(2, 2, Some(77));
    assert!(matches!(world.validate(), Err(InvariantViolation::DanglingCell { .. })));
}
