use std::time::Duration;

use anyhow::Result;
use motion_animator::{
    Animator, CubicBezier, Curve, Layer, NodeAdapter, Point, PropertyChange, PropertyId, Size,
    SpringCurve, TimingDescriptor, Value,
};

fn linear_second() -> TimingDescriptor {
    TimingDescriptor::new(Duration::from_secs(1)).with_curve(CubicBezier::LINEAR)
}

fn current_state_animator() -> Animator {
    let mut animator = Animator::new();
    animator.set_begin_from_current_state(true);
    animator
}

#[test]
fn absolute_interruption_starts_from_presentation() -> Result<()> {
    let animator = current_state_animator();
    let mut layer = Layer::new("box");

    animator.animate_property(&linear_second(), &mut layer, PropertyId::Opacity, 0.0, None)?;
    layer.advance(Duration::from_millis(250));
    animator.animate_property(&linear_second(), &mut layer, PropertyId::Opacity, 0.5, None)?;

    let animations: Vec<_> = layer.animations_for(PropertyId::Opacity).collect();
    assert_eq!(animations.len(), 1);
    let from = animations[0].from.as_f64().expect("scalar");
    assert!((from - 0.75).abs() < 1e-3);
    assert_eq!(layer.opacity(), 0.5);
    Ok(())
}

#[test]
fn absolute_interruption_without_current_state_starts_from_model() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate_property(&linear_second(), &mut layer, PropertyId::Opacity, 0.0, None)?;
    layer.advance(Duration::from_millis(250));
    animator.animate_property(&linear_second(), &mut layer, PropertyId::Opacity, 0.5, None)?;

    let animation = layer.animations_for(PropertyId::Opacity).next().expect("animation");
    assert_eq!(animation.from, Value::from(0.0));
    Ok(())
}

#[test]
fn additive_interruption_starts_from_presentation() -> Result<()> {
    let animator = current_state_animator();
    let mut layer = Layer::new("box");

    animator.animate_property(
        &linear_second(),
        &mut layer,
        PropertyId::Position,
        Point::new(100.0, 0.0),
        None,
    )?;
    layer.advance(Duration::from_millis(250));
    animator.animate_property(
        &linear_second(),
        &mut layer,
        PropertyId::Position,
        Point::new(100.0, 100.0),
        None,
    )?;

    let animations: Vec<_> = layer.animations_for(PropertyId::Position).collect();
    assert_eq!(animations.len(), 2);
    let delta = animations[1].from.as_point().expect("point");
    assert!((delta.x - -75.0).abs() < 1e-1);
    assert_eq!(delta.y, -100.0);
    assert_eq!(animations[1].to, Value::from(Point::new(0.0, 0.0)));
    Ok(())
}

#[test]
fn current_state_overrides_explicit_start_when_idle() -> Result<()> {
    let animator = current_state_animator();
    let mut layer = Layer::new("box");

    animator.animate(
        &linear_second(),
        &mut layer,
        &[PropertyChange::new(PropertyId::Opacity, 0.5).with_from(0.0)],
        None,
    )?;

    let animation = layer.animations_for(PropertyId::Opacity).next().expect("animation");
    assert_eq!(animation.from, Value::from(1.0));
    Ok(())
}

#[test]
fn explicit_start_is_honored_without_current_state() -> Result<()> {
    let animator = Animator::new();
    let mut layer = Layer::new("box");

    animator.animate(
        &linear_second(),
        &mut layer,
        &[PropertyChange::new(PropertyId::Opacity, 0.5).with_from(0.0)],
        None,
    )?;

    let animation = layer.animations_for(PropertyId::Opacity).next().expect("animation");
    assert_eq!(animation.from, Value::from(0.0));
    assert_eq!(layer.opacity(), 0.5);
    Ok(())
}

fn projected_velocity(layer: &Layer, property: PropertyId) -> f64 {
    match layer.animations_for(property).next().map(|a| a.curve) {
        Some(Curve::Spring(spring)) => spring.initial_velocity,
        other => panic!("expected spring for {property}, got {other:?}"),
    }
}

#[test]
fn spring_velocity_is_relative_to_displacement() -> Result<()> {
    let animator = Animator::new();
    let timing = TimingDescriptor::new(Duration::from_millis(300))
        .with_curve(SpringCurve::new(1.0, 200.0, 20.0).with_initial_velocity(50.0));

    let mut layer = Layer::new("box");
    animator.animate_property(&timing, &mut layer, PropertyId::CornerRadius, 100.0, None)?;
    assert!((projected_velocity(&layer, PropertyId::CornerRadius) - 0.5).abs() < 1e-9);

    let mut layer = Layer::new("box");
    animator.animate_property(&timing, &mut layer, PropertyId::Position, Point::new(0.0, 100.0), None)?;
    assert!((projected_velocity(&layer, PropertyId::Position) - 0.5).abs() < 1e-9);

    // Moving towards smaller values flips the sign.
    let mut layer = Layer::new("box").with_values([(PropertyId::CornerRadius, Value::from(100.0))]);
    animator.animate_property(&timing, &mut layer, PropertyId::CornerRadius, 0.0, None)?;
    assert!(projected_velocity(&layer, PropertyId::CornerRadius) < 0.0);

    let mut layer =
        Layer::new("box").with_values([(PropertyId::ShadowOffset, Value::from(Size::default()))]);
    animator.animate_property(
        &timing,
        &mut layer,
        PropertyId::ShadowOffset,
        Size::new(20.0, 200.0),
        None,
    )?;
    assert!((projected_velocity(&layer, PropertyId::ShadowOffset) - 0.25).abs() < 1e-9);
    Ok(())
}

#[test]
fn zero_displacement_projects_zero_velocity() -> Result<()> {
    let animator = Animator::new();
    let timing = TimingDescriptor::new(Duration::from_millis(300))
        .with_curve(SpringCurve::new(1.0, 200.0, 20.0).with_initial_velocity(50.0));
    let mut layer = Layer::new("box");

    animator.animate_property(&timing, &mut layer, PropertyId::CornerRadius, 0.0, None)?;

    assert_eq!(layer.animation_keys().len(), 1);
    assert_eq!(projected_velocity(&layer, PropertyId::CornerRadius), 0.0);
    Ok(())
}
