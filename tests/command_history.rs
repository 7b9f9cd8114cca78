use egui::{Color32, pos2};
use nail_studio::color::{self, BASE_TONE};
use nail_studio::command::{Command, CommandError};
use nail_studio::config::EditorConfig;
use nail_studio::primitive::Primitive;
use nail_studio::surface::FRENCH_BAND_START;
use nail_studio::{ToolKind, Workbench};

fn twelve_strokes(workbench: &mut Workbench, nail: usize) {
    for i in 0..12 {
        let y = 20.0 + i as f32 * 10.0;
        workbench.pointer_down(nail, pos2(25.0, y)).unwrap();
        workbench.pointer_move(nail, pos2(90.0, y + 4.0)).unwrap();
        workbench.pointer_up(nail, pos2(90.0, y + 4.0)).unwrap();
    }
    assert_eq!(workbench.surfaces()[nail].primitive_count(), 13);
}

#[test]
fn french_tip_replaces_the_drawing() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 8);
    twelve_strokes(&mut workbench, 0);

    workbench.set_color(color::parse_hex("#FFFFFF").unwrap());
    workbench.set_tool(ToolKind::French);
    let center = workbench.surfaces()[0].bounds().center();
    workbench.pointer_down(0, center).unwrap();

    let surface = &workbench.surfaces()[0];
    assert_eq!(surface.primitive_count(), 2);
    assert_eq!(surface.outline().fill, BASE_TONE);
    let Primitive::TipOverlay(tip) = &surface.layers()[0] else {
        panic!("expected a tip overlay, got {:?}", surface.layers()[0]);
    };
    assert_eq!(tip.color, Color32::WHITE);

    let bounds = surface.bounds();
    let band_top = bounds.top() + bounds.height() * FRENCH_BAND_START;
    assert!(tip.polygon.iter().all(|p| p.y >= band_top - 1e-3));
}

#[test]
fn undo_brings_the_strokes_back() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 8);
    twelve_strokes(&mut workbench, 1);
    let before = workbench.surfaces()[1].layers().to_vec();

    workbench
        .execute(Command::FrenchTip {
            nail: 1,
            color: Color32::WHITE,
        })
        .unwrap();
    assert_eq!(workbench.surfaces()[1].primitive_count(), 2);

    workbench.undo().unwrap();
    assert_eq!(workbench.surfaces()[1].layers(), before.as_slice());
    assert_ne!(workbench.surfaces()[1].outline().fill, BASE_TONE);

    workbench.redo().unwrap();
    assert_eq!(workbench.surfaces()[1].primitive_count(), 2);
}

#[test]
fn undo_never_goes_below_the_outline() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 8);
    assert_eq!(workbench.undo(), Err(CommandError::NothingToUndo));
    assert_eq!(workbench.redo(), Err(CommandError::NothingToRedo));

    twelve_strokes(&mut workbench, 4);
    while workbench.can_undo() {
        workbench.undo().unwrap();
    }
    assert_eq!(workbench.surfaces()[4].primitive_count(), 1);
}

#[test]
fn new_commands_drop_the_redo_stack() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 8);
    workbench.clear_all().unwrap();
    workbench.undo().unwrap();
    assert!(workbench.can_redo());

    workbench.apply_french_all().unwrap();
    assert!(!workbench.can_redo());
}

#[test]
fn commands_on_missing_nails_fail() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 8);
    assert_eq!(workbench.clear(7), Err(CommandError::NoSuchNail(7)));
    assert!(!workbench.can_undo());
}

#[test]
fn undo_after_a_color_change_keeps_the_new_color() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 13);
    workbench.set_texture(nail_studio::NailTexture::Glitter);
    workbench.set_color(Color32::RED);
    twelve_strokes(&mut workbench, 0);

    workbench.set_color(Color32::BLUE);
    workbench.undo().unwrap();

    let surface = &workbench.surfaces()[0];
    assert_eq!(surface.primitive_count(), 12);
    assert_eq!(surface.color(), Color32::BLUE);
    assert_eq!(surface.outline().fill, Color32::BLUE);
    assert!(surface.overlay().iter().all(|c| c.fill.b() == 255));
}

#[test]
fn undoing_french_on_glitter_brings_back_the_polish() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 14);
    workbench.set_texture(nail_studio::NailTexture::Glitter);
    workbench.set_color(Color32::RED);
    twelve_strokes(&mut workbench, 2);

    workbench.apply_french_all().unwrap();
    assert_eq!(workbench.surfaces()[2].outline().fill, BASE_TONE);

    workbench.undo().unwrap();
    assert_eq!(workbench.surfaces()[2].outline().fill, Color32::RED);
    workbench.redo().unwrap();
    assert_eq!(workbench.surfaces()[2].outline().fill, BASE_TONE);
}
