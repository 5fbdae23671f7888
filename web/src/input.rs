use bitflags::bitflags;
use twelvedays_core::Point;
use wasm_bindgen::JsCast;
use web_sys::{Element, PointerEvent};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct PointerButtons: u16 {
        const PRIMARY = 1;
        const SECONDARY = 1 << 1;
        const AUXILIARY = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub(crate) fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Device independent stroke input, in the card's logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum StrokeInput {
    Start(Point),
    Move(Point),
    End,
    Cancel,
}

/// Maps one pointer sample to stroke input; mice only scratch with the primary button held.
pub(crate) fn normalize(
    phase: PointerPhase,
    kind: PointerKind,
    buttons: PointerButtons,
    point: Point,
) -> Option<StrokeInput> {
    let pressed = is_pressed(kind, buttons);
    match phase {
        PointerPhase::Down if pressed => Some(StrokeInput::Start(point)),
        PointerPhase::Move if pressed => Some(StrokeInput::Move(point)),
        PointerPhase::Down | PointerPhase::Move => None,
        PointerPhase::Up => Some(StrokeInput::End),
        PointerPhase::Cancel => Some(StrokeInput::Cancel),
    }
}

fn is_pressed(kind: PointerKind, buttons: PointerButtons) -> bool {
    kind != PointerKind::Mouse || buttons.contains(PointerButtons::PRIMARY)
}

/// Pointer position relative to the top-left corner of the event's target.
fn local_point(e: &PointerEvent) -> Option<(Element, Point)> {
    let target = e.current_target()?.dyn_into::<Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    let point = Point::new(
        f64::from(e.client_x()) - rect.left(),
        f64::from(e.client_y()) - rect.top(),
    );
    Some((target, point))
}

/// Normalizes a DOM pointer event; on a stroke start the pointer is captured by the canvas.
pub(crate) fn pointer_input(phase: PointerPhase, e: &PointerEvent) -> Option<StrokeInput> {
    let kind = PointerKind::from_pointer_type(&e.pointer_type());
    let buttons = PointerButtons::from_bits_truncate(e.buttons());

    let point = match phase {
        PointerPhase::Down | PointerPhase::Move => {
            let (target, point) = local_point(e)?;
            if is_pressed(kind, buttons) {
                if phase == PointerPhase::Down {
                    if let Err(err) = target.set_pointer_capture(e.pointer_id()) {
                        log::debug!("pointer capture refused: {:?}", err);
                    }
                }
                if e.cancelable() {
                    e.prevent_default();
                }
            }
            point
        }
        PointerPhase::Up | PointerPhase::Cancel => Point::default(),
    };

    let input = normalize(phase, kind, buttons, point);
    log::trace!("{:?} {:?} {:?} -> {:?}", phase, kind, buttons, input);
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Point = Point::new(12.0, 34.0);

    #[test]
    fn touch_and_pen_always_scratch() {
        for kind in [PointerKind::Touch, PointerKind::Pen, PointerKind::Unknown] {
            assert_eq!(
                normalize(PointerPhase::Down, kind, PointerButtons::empty(), P),
                Some(StrokeInput::Start(P))
            );
            assert_eq!(
                normalize(PointerPhase::Move, kind, PointerButtons::empty(), P),
                Some(StrokeInput::Move(P))
            );
        }
    }

    #[test]
    fn mouse_needs_primary_button() {
        let mouse = PointerKind::Mouse;

        assert_eq!(
            normalize(PointerPhase::Down, mouse, PointerButtons::SECONDARY, P),
            None
        );
        assert_eq!(
            normalize(PointerPhase::Move, mouse, PointerButtons::empty(), P),
            None
        );
        assert_eq!(
            normalize(
                PointerPhase::Move,
                mouse,
                PointerButtons::PRIMARY | PointerButtons::AUXILIARY,
                P
            ),
            Some(StrokeInput::Move(P))
        );
    }

    #[test]
    fn release_and_cancel_end_the_stroke() {
        for kind in [PointerKind::Mouse, PointerKind::Touch] {
            assert_eq!(
                normalize(PointerPhase::Up, kind, PointerButtons::empty(), P),
                Some(StrokeInput::End)
            );
            assert_eq!(
                normalize(PointerPhase::Cancel, kind, PointerButtons::empty(), P),
                Some(StrokeInput::Cancel)
            );
        }
    }

    #[test]
    fn pointer_type_strings() {
        assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_pointer_type("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Unknown);
    }
}
