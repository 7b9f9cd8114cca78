use nail_studio::config::EditorConfig;
use nail_studio::tutorial::builtin_catalog;
use nail_studio::{NailShape, NailTexture, Tool, ToolKind, TutorialPlayer, Workbench};

fn tutorial(id: &str) -> nail_studio::Tutorial {
    builtin_catalog()
        .unwrap()
        .into_iter()
        .find(|tutorial| tutorial.id == id)
        .unwrap()
}

#[test]
fn navigation_stops_at_both_ends() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 1);
    let mut player = TutorialPlayer::start(tutorial("gradient-nails"), &mut workbench);

    assert!(!player.previous(&mut workbench));
    assert_eq!(player.current_index(), 0);

    while player.next(&mut workbench) {}
    let last = player.current_index();
    assert_eq!(last, player.step_count() - 1);
    assert!(!player.next(&mut workbench));
    assert_eq!(player.current_index(), last);
    assert_eq!(player.progress(), 1.0);
}

#[test]
fn marking_complete_twice_sets_one_flag() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 1);
    let mut player = TutorialPlayer::start(tutorial("french-manicure"), &mut workbench);
    player.next(&mut workbench);
    player.mark_complete();
    player.mark_complete();

    let flags = player.completed();
    assert_eq!(flags.iter().filter(|done| **done).count(), 1);
    assert!(flags[1]);
    assert_eq!(player.current_index(), 1);
}

#[test]
fn entering_steps_configures_the_editor() {
    let mut workbench = Workbench::with_seed(EditorConfig::default(), 1);
    workbench.set_shape(NailShape::Stiletto);
    workbench.set_texture(NailTexture::Matte);

    let mut player = TutorialPlayer::start(tutorial("french-manicure"), &mut workbench);
    assert_eq!(workbench.config().shape, NailShape::Round);
    assert_eq!(workbench.config().texture, NailTexture::Glossy);

    player.next(&mut workbench);
    assert_eq!(workbench.tool().kind(), ToolKind::Brush);
    assert_eq!(
        nail_studio::color::to_hex(workbench.config().color),
        "#FDE4E1"
    );

    let tutorial = player.close();
    assert_eq!(tutorial.id, "french-manicure");
}
