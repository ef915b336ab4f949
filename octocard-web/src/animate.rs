//! Entrance-animation runner over the Web Animations facility.

use js_sys::{Array, Object, Reflect};
use octocard_lib::{resolve, EntranceStep, FromState, ScheduledAnimation, StepTarget};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, FillMode, KeyframeAnimationOptions};

use super::log;

/// Injected animation capability. Markup is rendered at its final state
/// first; an animator only layers the entrance transition on top, so the
/// absent case degrades to elements that are immediately fully visible.
pub(crate) trait EntranceAnimator {
    fn play(&self, scope: &Element, steps: &[EntranceStep]);
}

/// Fallback when the animation facility is unavailable.
pub(crate) struct NoopAnimator;

impl EntranceAnimator for NoopAnimator {
    fn play(&self, _scope: &Element, _steps: &[EntranceStep]) {}
}

/// Schedules the resolved sequence through `Element.animate`.
pub(crate) struct WaapiAnimator;

impl EntranceAnimator for WaapiAnimator {
    fn play(&self, scope: &Element, steps: &[EntranceStep]) {
        let sets: Vec<Vec<Element>> = steps
            .iter()
            .map(|step| elements_for(scope, step.target))
            .collect();

        let scheduled = resolve(steps, |target| {
            step_index(steps, target).map(|i| sets[i].len()).unwrap_or(0)
        });

        for animation in &scheduled {
            let Some(index) = step_index(steps, animation.target) else {
                continue;
            };
            if let Some(element) = sets[index].get(animation.item) {
                animate_element(element, animation);
            }
        }
    }
}

/// Picks the real runner when `Element.animate` exists, the no-op
/// otherwise.
pub(crate) fn detect_animator(probe: &Element) -> Box<dyn EntranceAnimator> {
    let has_animate = Reflect::has(probe.as_ref(), &JsValue::from_str("animate")).unwrap_or(false);
    if has_animate {
        Box::new(WaapiAnimator)
    } else {
        console_log!("Web Animations unavailable; rendering without transitions");
        Box::new(NoopAnimator)
    }
}

fn step_index(steps: &[EntranceStep], target: StepTarget) -> Option<usize> {
    steps.iter().position(|step| step.target == target)
}

fn elements_for(scope: &Element, target: StepTarget) -> Vec<Element> {
    let mut elements = Vec::new();
    if let Ok(list) = scope.query_selector_all(target.selector()) {
        for index in 0..list.length() {
            if let Some(node) = list.item(index) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    elements.push(element);
                }
            }
        }
    }
    elements
}

fn animate_element(element: &Element, animation: &ScheduledAnimation) {
    let keyframes = Array::new();
    keyframes.push(&entrance_keyframe(&animation.from));
    keyframes.push(&resting_keyframe(&animation.from));

    let options = KeyframeAnimationOptions::new();
    options.set_delay(animation.start * 1000.0);
    options.set_duration(animation.duration * 1000.0);
    options.set_easing(animation.easing.css());
    // Backwards fill holds the entrance state through the delay, so late
    // groups do not flash at full visibility first.
    options.set_fill(FillMode::Backwards);

    let frames: &Object = keyframes.as_ref();
    let _ = element.animate_with_keyframe_animation_options(Some(frames), &options);
}

fn entrance_keyframe(from: &FromState) -> JsValue {
    let frame = Object::new();
    let mut transform = format!("translateY({}px)", from.y);
    if let Some(scale) = from.scale {
        transform.push_str(&format!(" scale({scale})"));
    }
    set(&frame, "transform", &JsValue::from_str(&transform));
    set(&frame, "opacity", &JsValue::from_f64(from.opacity));
    frame.into()
}

fn resting_keyframe(from: &FromState) -> JsValue {
    let frame = Object::new();
    let transform = if from.scale.is_some() {
        "translateY(0px) scale(1)"
    } else {
        "translateY(0px)"
    };
    set(&frame, "transform", &JsValue::from_str(transform));
    set(&frame, "opacity", &JsValue::from_f64(1.0));
    frame.into()
}

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}
