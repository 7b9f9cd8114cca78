use egui::{Pos2, pos2};
use nail_studio::config::EditorConfig;
use nail_studio::geometry;
use nail_studio::primitive::Primitive;
use nail_studio::scheduler::TaskKind;
use nail_studio::surface::NAIL_COUNT;
use nail_studio::tools::{ATTEMPTS_PER_DENSITY, scatter_glitter};
use nail_studio::{NailTexture, Tool, ToolKind, Workbench};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn stroke(workbench: &mut Workbench, nail: usize, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    workbench.pointer_down(nail, *first).unwrap();
    for point in rest {
        workbench.pointer_move(nail, *point).unwrap();
    }
    workbench.pointer_up(nail, *points.last().unwrap()).unwrap();
}

#[test]
fn clear_keeps_only_the_outline() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 1);
    for nail in 0..NAIL_COUNT {
        for i in 0..=nail * 3 {
            let y = 20.0 + i as f32 * 5.0;
            stroke(&mut workbench, nail, &[pos2(30.0, y), pos2(80.0, y)]);
        }
    }
    workbench.set_tool(ToolKind::Dots);
    workbench.pointer_down(2, pos2(60.0, 100.0)).unwrap();

    for nail in 0..NAIL_COUNT {
        workbench.clear(nail).unwrap();
        assert_eq!(workbench.surfaces()[nail].primitive_count(), 1);
    }
}

#[test]
fn unknown_tool_names_draw_like_the_brush() {
    let mut unknown = Workbench::with_seed(EditorConfig::default(), 5);
    let mut brush = Workbench::with_seed(EditorConfig::default(), 5);
    unknown.select_tool("dots");
    unknown.select_tool("airbrush");
    brush.select_tool("brush");
    assert_eq!(unknown.tool().kind(), ToolKind::Brush);

    let path = [pos2(20.0, 30.0), pos2(40.0, 60.0), pos2(70.0, 90.0)];
    stroke(&mut unknown, 1, &path);
    stroke(&mut brush, 1, &path);
    assert_eq!(unknown.surfaces()[1].layers(), brush.surfaces()[1].layers());
}

#[test]
fn glitter_sampling_stays_within_attempts_and_bounds() {
    let mut config = EditorConfig::default();
    let surface = nail_studio::DrawingSurface::new(0, &config);
    let bounds = surface.bounds();

    for density in [1, 5, 10] {
        config.set_glitter_density(density);
        let attempts = (density * ATTEMPTS_PER_DENSITY) as usize;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sparkles = scatter_glitter(pos2(10.0, 180.0), bounds, &config, &mut rng);
            assert!(sparkles.len() <= attempts);
            for sparkle in &sparkles {
                assert!(geometry::is_inside(bounds, sparkle.center));
            }

            let mut again = StdRng::seed_from_u64(seed);
            assert_eq!(
                scatter_glitter(pos2(10.0, 180.0), bounds, &config, &mut again),
                sparkles
            );
        }
    }
}

#[test]
fn glitter_tool_commits_on_release() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 9);
    workbench.set_tool(ToolKind::Glitter);
    workbench.pointer_down(0, pos2(60.0, 80.0)).unwrap();
    assert_eq!(workbench.surfaces()[0].primitive_count(), 1);
    workbench.pointer_up(0, pos2(60.0, 80.0)).unwrap();

    let layers = workbench.surfaces()[0].layers();
    assert!(!layers.is_empty());
    assert!(layers.iter().all(|p| matches!(p, Primitive::Circle(_))));
}

#[test]
fn dots_outside_the_nail_are_dropped() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 2);
    workbench.set_tool(ToolKind::Dots);
    let bounds = workbench.surfaces()[3].bounds();
    workbench
        .pointer_down(3, pos2(bounds.left() + 1.0, bounds.bottom() - 1.0))
        .unwrap();
    assert_eq!(workbench.surfaces()[3].primitive_count(), 1);
    assert!(!workbench.can_undo());

    workbench.pointer_down(3, bounds.center()).unwrap();
    assert_eq!(workbench.surfaces()[3].primitive_count(), 2);
}

#[test]
fn shimmer_is_cancelled_when_glitter_goes_away() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 4);
    workbench.set_texture(NailTexture::Glitter);
    workbench.set_texture(NailTexture::Glitter);
    assert_eq!(workbench.scheduler().active_count(), 1);

    workbench.set_texture(NailTexture::Metallic);
    assert!(!workbench.scheduler().is_active(TaskKind::Shimmer));
    assert!(!workbench.tick());
}

#[test]
fn dropping_the_workbench_stops_every_loop() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 4);
    let scheduler = workbench.scheduler().clone();
    workbench.set_texture(NailTexture::Glitter);
    workbench.show_preview();
    assert_eq!(scheduler.active_count(), 2);

    drop(workbench);
    assert!(!scheduler.has_active());
}
