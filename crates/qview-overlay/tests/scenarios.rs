//! End-to-end scenarios driving the controller against recording doubles.
use pretty_assertions::assert_eq;
use qview_overlay::{
    Config, EditorState, Event, Mode, Outcome, Paint, Refresh,
    controller::{MSG_ANY_KEY, MSG_JUMP, TITLE_EXPANDED, TITLE_HELP, TITLE_OUTPUT},
    geom::{Expanse, Rect},
    key::{Ctrl, Key, KeyCode, ModifierKeyCode, Shift},
    testing::{Call, FakeViewer, RecordingSurface, TestHost},
    viewer::NormalKey,
};

fn press(st: &mut EditorState, h: &mut TestHost, k: impl Into<Key>) -> Outcome {
    st.handle_event(h, &Event::Key(k.into())).unwrap()
}

fn typ(st: &mut EditorState, h: &mut TestHost, s: &str) {
    for c in s.chars() {
        press(st, h, c);
    }
}

#[test]
fn jump_to_image() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();

    press(&mut st, &mut h, 'j');
    assert_eq!(st.mode(), Mode::JumpEdit);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());

    press(&mut st, &mut h, '5');
    assert_eq!(st.text(), "5");
    assert_eq!(st.buffer().cursor(), 1);
    assert!(st.is_displayed());
    assert!(h.surface.texts().contains(&MSG_JUMP.to_string()));

    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::Normal);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());
    assert_eq!(h.viewer.current, 4);
    assert!(h.viewer.calls.contains(&Call::Jump("5".into())));
    assert!(h.viewer.calls.contains(&Call::Load));
}

#[test]
fn jump_after_full_reload_skips_second_redraw() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    h.viewer.load_redraws = true;
    typ(&mut st, &mut h, "jf3");
    h.surface.take();
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(h.surface.refreshes(), vec![Refresh::Full]);
    assert_eq!(h.viewer.current, 3);
    assert!(!st.is_displayed());
}

#[test]
fn bad_jump_is_abandoned() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "jxyz");
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::Normal);
    assert!(!h.viewer.calls.contains(&Call::Load));
    assert_eq!(h.viewer.current, 0);
}

#[test]
fn escape_abandons_edit() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^abc");
    assert!(st.is_displayed());
    press(&mut st, &mut h, KeyCode::Esc);
    assert_eq!(st.mode(), Mode::Normal);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());
    assert!(h.viewer.commands().is_empty());
}

#[test]
fn escape_abandons_jump() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "j12");
    assert!(st.is_displayed());
    press(&mut st, &mut h, KeyCode::Esc);
    assert_eq!(st.mode(), Mode::Normal);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());
    assert!(!h.viewer.calls.contains(&Call::Jump("12".into())));
    assert_eq!(h.viewer.current, 0);
}

#[test]
fn ctrl_c_aborts_both_edit_modes() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "j3");
    press(&mut st, &mut h, Ctrl + 'c');
    assert_eq!(st.mode(), Mode::Normal);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());
    assert!(!h.viewer.calls.iter().any(|c| matches!(c, Call::Jump(_))));

    typ(&mut st, &mut h, "^ab");
    assert_eq!(st.mode(), Mode::ExtEdit);
    press(&mut st, &mut h, Ctrl + 'c');
    assert_eq!(st.mode(), Mode::Normal);
    assert_eq!(st.text(), "");
    assert!(!st.is_displayed());
    assert!(h.viewer.commands().is_empty());
    assert_eq!(
        h.viewer.modes(),
        vec![Mode::JumpEdit, Mode::Normal, Mode::ExtEdit, Mode::Normal]
    );
}

#[test]
fn tab_start_probes_empty_command() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    h.viewer.respond(["tag:", "tag:a", "tag:b"]);
    press(&mut st, &mut h, KeyCode::Tab);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(h.viewer.commands(), vec![(String::new(), true)]);
    assert_eq!(st.text(), "tag:");
    assert_eq!(st.buffer().cursor(), 4);
    assert_eq!(st.extra_lines(), ["tag:a", "tag:b"]);
    assert_eq!(h.surface.titles(), vec!["(Tab-start command)".to_string()]);
    assert!(st.renderer().state().clean);
}

#[test]
fn tab_start_from_jump_with_empty_result() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "j12");
    press(&mut st, &mut h, KeyCode::Tab);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(st.text(), "");
    assert!(st.extra_lines().is_empty());
    assert!(st.is_displayed());
}

#[test]
fn tab_completion_keeps_output_under_line() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^ta");
    h.viewer.respond(["^tag", "^tag:a", "^tag:b"]);
    h.surface.take();
    press(&mut st, &mut h, KeyCode::Tab);

    assert_eq!(
        h.surface.titles(),
        vec!["(Tab completion)".to_string(), TITLE_EXPANDED.to_string()]
    );
    assert!(
        h.surface
            .texts()
            .contains(&"<Tab> completion running...".to_string())
    );
    assert_eq!(h.viewer.commands(), vec![("^ta".to_string(), true)]);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(st.text(), "^tag");
    assert_eq!(st.buffer().cursor(), 4);

    h.surface.take();
    press(&mut st, &mut h, 'x');
    assert_eq!(st.text(), "^tagx");
    let texts = h.surface.texts();
    assert!(texts.contains(&"^tagx".to_string()));
    assert!(texts.contains(&"^tag:b".to_string()));
}

#[test]
fn command_output_is_confirmed() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^go");
    h.viewer.respond(["done", "really"]);
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::Confirm);
    assert_eq!(st.text(), "");
    assert_eq!(h.viewer.commands(), vec![("^go".to_string(), false)]);
    let texts = h.surface.texts();
    assert!(texts.contains(&"really".to_string()));
    assert!(texts.contains(&MSG_ANY_KEY.to_string()));
    assert!(h.surface.titles().contains(&TITLE_OUTPUT.to_string()));

    press(
        &mut st,
        &mut h,
        KeyCode::Modifier(ModifierKeyCode::Shift),
    );
    assert_eq!(st.mode(), Mode::Confirm);
    press(&mut st, &mut h, 'z');
    assert_eq!(st.mode(), Mode::Normal);
    assert!(!st.is_displayed());
    assert!(
        !h.viewer
            .calls
            .iter()
            .any(|c| matches!(c, Call::NormalKey(_)))
    );
}

#[test]
fn empty_output_finishes() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^go");
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::Normal);
    assert!(!st.is_displayed());
}

#[test]
fn bell_keeps_editing_at_tag_error() {
    let mut st = EditorState::new(Config::default().with_tag_error_pos(true));
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^tag: x y");
    h.viewer.respond(["tag: x y", "\u{7}unknown tags (x)"]);
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(st.text(), "tag: x y");
    assert_eq!(st.buffer().cursor(), 6);
    assert_eq!(st.extra_lines(), ["unknown tags (x)"]);
    assert!(h.surface.titles().contains(&TITLE_EXPANDED.to_string()));
}

#[test]
fn tag_error_ignored_when_disabled() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^tag: x y");
    h.viewer.respond(["tag: x y", "\u{7}unknown tags (x)"]);
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(st.buffer().cursor(), 8);
}

#[test]
fn tag_error_past_truncation_leaves_cursor_at_end() {
    let mut st = EditorState::new(
        Config::default()
            .with_tag_error_pos(true)
            .with_buffer_capacity(8),
    );
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^t");
    h.viewer
        .respond(["tag: a badtag", "\u{7}unknown tags (badtag)"]);
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::ExtEdit);
    assert_eq!(st.text(), "tag: a ");
    assert_eq!(st.buffer().cursor(), 7);
    assert_eq!(st.extra_lines(), ["unknown tags (badtag)"]);
}

#[test]
fn command_failure_is_shown() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^go");
    h.viewer.fail_command("boom");
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(st.mode(), Mode::Confirm);
    assert!(
        h.surface
            .texts()
            .contains(&"(command failed: command: boom)".to_string())
    );
}

#[test]
fn command_keys_run_directly() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    h.viewer.respond(["tagged"]);
    press(&mut st, &mut h, '7');
    assert_eq!(h.viewer.commands(), vec![("7".to_string(), false)]);
    assert_eq!(st.mode(), Mode::Confirm);

    press(&mut st, &mut h, 'q');
    press(&mut st, &mut h, Shift + 'n');
    assert_eq!(h.viewer.commands().last(), Some(&("N".to_string(), false)));
    assert_eq!(st.mode(), Mode::Normal);
}

#[test]
fn function_keys() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    press(&mut st, &mut h, KeyCode::F(5));
    assert!(h.viewer.commands().is_empty());
    assert!(h.viewer.calls.contains(&Call::NormalKey(KeyCode::F(5).into())));

    let mut st = EditorState::new(
        Config::default()
            .with_f_commands(true)
            .with_enter_command(true),
    );
    press(&mut st, &mut h, KeyCode::F(5));
    press(&mut st, &mut h, KeyCode::Enter);
    assert_eq!(
        h.viewer.commands(),
        vec![(":f5".to_string(), false), (":enter".to_string(), false)]
    );
}

#[test]
fn help() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    press(&mut st, &mut h, '?');
    assert_eq!(st.mode(), Mode::Confirm);
    assert_eq!(h.surface.titles(), vec![TITLE_HELP.to_string()]);
    press(&mut st, &mut h, KeyCode::Esc);
    h.surface.take();
    press(&mut st, &mut h, KeyCode::F(1));
    assert_eq!(st.mode(), Mode::Confirm);
}

#[test]
fn normal_keys_go_to_viewer() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    press(&mut st, &mut h, ' ');
    assert_eq!(h.viewer.current, 1);
    assert_eq!(st.mode(), Mode::Normal);

    h.viewer.bindings.insert(Key::from('x'), NormalKey::Quit);
    assert_eq!(press(&mut st, &mut h, 'x'), Outcome::Quit);
}

#[test]
fn mode_notifications() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "j1");
    press(&mut st, &mut h, KeyCode::Enter);
    typ(&mut st, &mut h, "^x");
    h.viewer.respond(["out"]);
    press(&mut st, &mut h, KeyCode::Enter);
    press(&mut st, &mut h, ' ');
    assert_eq!(
        h.viewer.modes(),
        vec![
            Mode::JumpEdit,
            Mode::Normal,
            Mode::ExtEdit,
            Mode::Confirm,
            Mode::Normal
        ]
    );
}

#[test]
fn narrowing_overlay_erases_strips() {
    let mut st = EditorState::default();
    let mut h = TestHost {
        surface: RecordingSurface::new(Expanse::new(1000, 300)),
        viewer: FakeViewer::default(),
    };
    press(&mut st, &mut h, '^');
    typ(&mut st, &mut h, &"a".repeat(40));
    h.surface.take();
    press(&mut st, &mut h, KeyCode::Backspace);
    assert_eq!(
        h.surface.fills(Paint::Background),
        vec![Rect::new(291, 116, 5, 67), Rect::new(703, 116, 5, 67)]
    );
    assert_eq!(st.renderer().state().rect, Rect::new(296, 116, 407, 67));
}

#[test]
fn strips_outside_image_are_not_refreshed() {
    let mut st = EditorState::default();
    let mut h = TestHost {
        surface: RecordingSurface::new(Expanse::new(1000, 300))
            .with_image(Rect::new(400, 0, 200, 300)),
        viewer: FakeViewer::default(),
    };
    press(&mut st, &mut h, '^');
    typ(&mut st, &mut h, &"a".repeat(40));
    h.surface.take();
    press(&mut st, &mut h, KeyCode::Backspace);
    assert_eq!(
        h.surface.fills(Paint::Background),
        vec![Rect::new(291, 116, 5, 67), Rect::new(703, 116, 5, 67)]
    );
    assert!(h.surface.refreshes().is_empty());
    assert_eq!(st.renderer().state().rect, Rect::new(296, 116, 407, 67));
}

#[test]
fn expose_forces_image_redraw() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^ab");
    st.handle_event(&mut h, &Event::Expose).unwrap();
    h.surface.take();
    press(&mut st, &mut h, 'c');
    assert_eq!(h.surface.refreshes(), vec![Refresh::Image]);
}

#[test]
fn resize_redraws_edit() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    typ(&mut st, &mut h, "^ab");
    h.surface.resize(Expanse::new(600, 400));
    h.surface.take();
    st.handle_event(&mut h, &Event::Resize(Expanse::new(600, 400)))
        .unwrap();
    assert_eq!(h.surface.refreshes(), vec![Refresh::Full]);
    assert!(h.surface.texts().contains(&"^ab".to_string()));
    assert!(st.renderer().state().clean);
}

#[test]
fn surface_errors_propagate() {
    let mut st = EditorState::default();
    let mut h = TestHost::new();
    h.surface.set_failing(true);
    let r = st.handle_event(&mut h, &Event::Key('^'.into()));
    assert!(r.is_err());
}
