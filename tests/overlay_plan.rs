use image::{Rgb, RgbImage};

use overlay_demo::common::OvdDetection;
use overlay_demo::data::{colour_for_class, DisplayTransform, FALLBACK_COLOUR};
use overlay_demo::overlay::{plan_overlay, render_outlines};

fn person_and_dog() -> Vec<OvdDetection> {
    vec![
        OvdDetection::default()
            .with_x1y1_wh(20.0, 30.0, 100.0, 80.0)
            .with_confidence(0.93)
            .with_label("person"),
        OvdDetection::default()
            .with_x1y1_wh(200.0, 150.0, 60.0, 40.0)
            .with_confidence(0.81)
            .with_label("dog"),
    ]
}

#[test]
fn plans_one_op_per_detection_in_input_order() {
    // 600x400 into 600x600 keeps scale 1.0
    let t = DisplayTransform::fit(600, 400, 600, 600).unwrap();
    let ops = plan_overlay(&person_and_dog(), &t);

    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].label, "Person - Score: 0.93");
    assert_eq!(ops[1].label, "Dog - Score: 0.81");
    assert_eq!(ops[0].colour, colour_for_class("person").unwrap());
    assert_eq!(ops[1].colour, colour_for_class("dog").unwrap());
}

#[test]
fn label_is_anchored_at_the_box_top_left() {
    let t = DisplayTransform::fit(600, 400, 600, 600).unwrap();
    let ops = plan_overlay(&person_and_dog(), &t);
    assert_eq!(ops[0].label_origin, (20, 30));
    assert_eq!(ops[1].label_origin, (200, 150));
}

#[test]
fn boxes_are_scaled_into_display_space() {
    // 1200x800 into 600x600 halves both axes
    let t = DisplayTransform::fit(1200, 800, 600, 600).unwrap();
    let ops = plan_overlay(&person_and_dog(), &t);

    assert_eq!(ops[0].rect.left(), 10);
    assert_eq!(ops[0].rect.top(), 15);
    assert_eq!(ops[0].rect.width(), 50);
    assert_eq!(ops[0].rect.height(), 40);
}

#[test]
fn outlines_land_on_the_expected_pixels() {
    let t = DisplayTransform::fit(600, 400, 600, 600).unwrap();
    let detections = vec![OvdDetection::default()
        .with_x1y1_wh(5.0, 5.0, 20.0, 10.0)
        .with_confidence(0.9)
        .with_label("person")];
    let ops = plan_overlay(&detections, &t);

    let mut image = RgbImage::from_pixel(600, 400, Rgb([0, 0, 0]));
    render_outlines(&mut image, &ops);

    let colour = colour_for_class("person").unwrap();
    assert_eq!(*image.get_pixel(5, 5), colour, "top-left corner");
    assert_eq!(*image.get_pixel(24, 14), colour, "bottom-right corner");
    assert_eq!(
        *image.get_pixel(10, 10),
        Rgb([0, 0, 0]),
        "interior stays untouched"
    );
}

#[test]
fn unknown_class_draws_with_the_fallback_colour() {
    let t = DisplayTransform::fit(600, 400, 600, 600).unwrap();
    let detections = vec![OvdDetection::default()
        .with_x1y1_wh(5.0, 5.0, 20.0, 10.0)
        .with_confidence(0.5)
        .with_label("unicorn")];
    let ops = plan_overlay(&detections, &t);
    assert_eq!(ops[0].colour, FALLBACK_COLOUR);
    assert_eq!(ops[0].label, "Unicorn - Score: 0.5");
}

#[test]
fn empty_detection_list_plans_nothing() {
    let t = DisplayTransform::fit(600, 400, 600, 600).unwrap();
    assert!(plan_overlay(&[], &t).is_empty());
}
