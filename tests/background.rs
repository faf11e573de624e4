//! Background rotation and gradient parsing

use codecanvas::background::{next_background, Gradient, BACKGROUNDS};
use codecanvas::color::Color;
use codecanvas::messages::{EditorMsg, Msg};
use codecanvas::model::AppModel;
use codecanvas::update::update;

#[test]
fn test_rotation_visits_every_entry_then_wraps() {
    let mut model = AppModel::default();
    let mut seen = vec![model.state().background.clone()];
    for _ in 1..BACKGROUNDS.len() {
        update(&mut model, Msg::Editor(EditorMsg::RotateBackground));
        seen.push(model.state().background.clone());
    }
    assert_eq!(seen, BACKGROUNDS.iter().map(|b| b.to_string()).collect::<Vec<_>>());

    update(&mut model, Msg::Editor(EditorMsg::RotateBackground));
    assert_eq!(model.state().background, BACKGROUNDS[0]);
}

#[test]
fn test_unknown_background_rotates_to_first() {
    assert_eq!(next_background("hotpink"), BACKGROUNDS[0]);
}

#[test]
fn test_every_descriptor_parses() {
    for descriptor in BACKGROUNDS {
        let gradient = Gradient::parse(descriptor).unwrap();
        assert!(gradient.stops.len() >= 2, "{}", descriptor);
    }
}

#[test]
fn test_gradient_endpoints() {
    let gradient = Gradient::parse("linear-gradient(to right, #00c6ff, #0072ff)").unwrap();
    assert_eq!(gradient.sample(0.0, 50.0, 100.0, 100.0), Color::rgb(0x00, 0xc6, 0xff));
    assert_eq!(gradient.sample(100.0, 50.0, 100.0, 100.0), Color::rgb(0x00, 0x72, 0xff));
}

#[test]
fn test_set_background_outside_list_is_kept() {
    let mut model = AppModel::default();
    update(&mut model, Msg::Editor(EditorMsg::SetBackground("#123456".to_string())));
    assert_eq!(model.state().background, "#123456");
}
