use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use motion_animator::{
    Animator, AnimatorError, Completion, CubicBezier, Layer, NodeAdapter, Point, PropertyChange,
    PropertyId, TimingDescriptor, Value, ValueKind,
};

fn timing() -> TimingDescriptor {
    TimingDescriptor::new(Duration::from_millis(500))
}

fn linear(duration: Duration) -> TimingDescriptor {
    TimingDescriptor::new(duration).with_curve(CubicBezier::LINEAR)
}

fn recorder() -> (Rc<RefCell<Vec<bool>>>, Option<Completion>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let completion: Completion = Box::new(move |finished: bool| sink.borrow_mut().push(finished));
    (calls, Some(completion))
}

#[test]
fn additive_animations_coexist() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(100.0, 0.0), None)?;
    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(200.0, 50.0), None)?;

    let animations: Vec<_> = layer.animations_for(PropertyId::Position).collect();
    assert_eq!(animations.len(), 2);
    assert!(animations.iter().all(|a| a.additive));
    assert_ne!(animations[0].key, animations[1].key);

    assert_eq!(animations[0].from, Value::from(Point::new(-100.0, 0.0)));
    assert_eq!(animations[0].to, Value::from(Point::new(0.0, 0.0)));
    assert_eq!(animations[1].from, Value::from(Point::new(-100.0, -50.0)));

    assert_eq!(layer.position(), Point::new(200.0, 50.0));
    Ok(())
}

#[test]
fn additive_interruption_keeps_presentation_continuous() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(100.0, 0.0), None)?;
    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(200.0, 50.0), None)?;

    // Neither animation has progressed, so the layer still renders its origin.
    assert_eq!(
        layer.presentation_value(PropertyId::Position),
        Some(Value::from(Point::new(0.0, 0.0)))
    );
    Ok(())
}

#[test]
fn non_additive_animation_replaces_previous() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");
    let (first, first_completion) = recorder();

    animator.animate(
        &timing(),
        &mut layer,
        &[PropertyChange::new(PropertyId::Opacity, 0.5)],
        first_completion,
    )?;
    animator.animate_property(&timing(), &mut layer, PropertyId::Opacity, 0.2, None)?;

    let animations: Vec<_> = layer.animations_for(PropertyId::Opacity).collect();
    assert_eq!(animations.len(), 1);
    assert!(!animations[0].additive);
    assert_eq!(animations[0].from, Value::from(0.5));
    assert_eq!(animations[0].to, Value::from(0.2));
    assert_eq!(layer.opacity(), 0.2);

    // The replaced animation never finished.
    assert_eq!(*first.borrow(), vec![false]);
    Ok(())
}

#[test]
fn disabling_additive_makes_every_property_absolute() -> Result<()> {
    let mut animator = Animator::new();
    animator.set_additive(false);
    let mut layer = Layer::new("box");

    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(100.0, 0.0), None)?;
    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(200.0, 0.0), None)?;

    let animations: Vec<_> = layer.animations_for(PropertyId::Position).collect();
    assert_eq!(animations.len(), 1);
    assert!(!animations[0].additive);
    assert_eq!(animations[0].from, Value::from(Point::new(100.0, 0.0)));
    Ok(())
}

#[test]
fn colors_are_never_additive() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate_property(
        &timing(),
        &mut layer,
        PropertyId::BackgroundColor,
        [1.0_f32, 0.0, 0.0, 1.0],
        None,
    )?;

    let animation = layer
        .animations_for(PropertyId::BackgroundColor)
        .next()
        .expect("color animation");
    assert!(!animation.additive);
    assert_eq!(animation.from, Value::from([0.0_f32; 4]));
    Ok(())
}

#[test]
fn remove_all_keeps_latest_target() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");
    let (calls, completion) = recorder();

    animator.animate(
        &timing(),
        &mut layer,
        &[
            PropertyChange::new(PropertyId::Position, Point::new(10.0, 10.0)),
            PropertyChange::new(PropertyId::Opacity, 0.0),
        ],
        completion,
    )?;
    animator.animate_property(&timing(), &mut layer, PropertyId::Position, Point::new(20.0, 20.0), None)?;
    assert_eq!(layer.animation_keys().len(), 3);

    animator.remove_all_animations(&mut layer);

    assert!(layer.animation_keys().is_empty());
    assert_eq!(layer.position(), Point::new(20.0, 20.0));
    assert_eq!(layer.opacity(), 0.0);
    assert_eq!(*calls.borrow(), vec![false]);
    Ok(())
}

#[test]
fn commit_writes_presentation_values() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate_property(&linear(Duration::from_secs(1)), &mut layer, PropertyId::Opacity, 0.0, None)?;
    animator.animate_property(
        &linear(Duration::from_secs(1)),
        &mut layer,
        PropertyId::Position,
        Point::new(100.0, 0.0),
        None,
    )?;
    layer.advance(Duration::from_millis(250));

    animator.commit_and_remove_all_animations(&mut layer);

    assert!(layer.animation_keys().is_empty());
    assert!((layer.opacity() - 0.75).abs() < 1e-3);
    assert!((layer.position().x - 25.0).abs() < 1e-1);
    assert_eq!(layer.position().y, 0.0);
    Ok(())
}

#[test]
fn value_kind_mismatch_fails_without_side_effects() {
    let animator = Animator::new();
    let mut layer = Layer::new("box");
    let (calls, completion) = recorder();

    let result = animator.animate(
        &timing(),
        &mut layer,
        &[
            PropertyChange::new(PropertyId::CornerRadius, 4.0),
            PropertyChange::new(PropertyId::Opacity, Point::new(1.0, 1.0)),
        ],
        completion,
    );

    assert_eq!(
        result,
        Err(AnimatorError::ValueKindMismatch {
            property: PropertyId::Opacity,
            expected: ValueKind::Scalar,
            found: ValueKind::Point,
        })
    );
    assert!(layer.animation_keys().is_empty());
    assert_eq!(layer.get(PropertyId::CornerRadius), Some(Value::from(0.0)));
    assert_eq!(layer.opacity(), 1.0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn mismatched_start_value_is_rejected() {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    let result = animator.animate(
        &timing(),
        &mut layer,
        &[PropertyChange::new(PropertyId::Opacity, 0.0).with_from(Point::new(0.0, 0.0))],
        None,
    );

    assert!(matches!(result, Err(AnimatorError::ValueKindMismatch { .. })));
}

#[test]
fn unknown_property_is_applied_directly() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");
    let (calls, completion) = recorder();

    animator.animate(
        &timing(),
        &mut layer,
        &[PropertyChange::new(PropertyId::Custom(42), 3.0)],
        completion,
    )?;

    assert_eq!(layer.get(PropertyId::Custom(42)), Some(Value::from(3.0)));
    assert!(layer.animation_keys().is_empty());
    assert_eq!(*calls.borrow(), vec![true]);
    Ok(())
}

#[test]
fn tracer_sees_each_animation_in_order() -> Result<()> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut animator = Animator::new();
    animator.add_tracer(move |node, animation| {
        sink.borrow_mut()
            .push((node.node_id().to_string(), animation.property));
    });

    let mut layer = Layer::new("traced");
    animator.animate(
        &timing(),
        &mut layer,
        &[
            PropertyChange::new(PropertyId::CornerRadius, 4.0),
            PropertyChange::new(PropertyId::Opacity, 0.5),
        ],
        None,
    )?;
    animator.animate_property(
        &TimingDescriptor::new(Duration::ZERO),
        &mut layer,
        PropertyId::BorderWidth,
        2.0,
        None,
    )?;

    assert_eq!(
        *seen.borrow(),
        vec![
            ("traced".to_string(), PropertyId::CornerRadius),
            ("traced".to_string(), PropertyId::Opacity),
        ]
    );
    Ok(())
}

#[test]
fn reversed_values_end_at_original_start() -> Result<()> {
    let mut animator = Animator::new();
    animator.set_reverse_values(true);
    let mut layer = Layer::new("box");

    animator.animate_property(&timing(), &mut layer, PropertyId::Opacity, 0.0, None)?;

    let animation = layer.animations_for(PropertyId::Opacity).next().expect("animation");
    assert_eq!(animation.from, Value::from(0.0));
    assert_eq!(animation.to, Value::from(1.0));
    assert_eq!(layer.opacity(), 1.0);
    Ok(())
}
