//! Card tilt that follows the pointer.

pub const TILT_DEPTH_DEGREES: f32 = 15.0;
pub const TILT_PERSPECTIVE_PX: f32 = 1000.0;
pub const TILT_LIFT_PX: f32 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

/// Tilt for a card whose bounding box is `(left, top, width, height)` when
/// the pointer is at `(px, py)`; both in client pixels. The pointer may be
/// outside the card, in which case the tilt exceeds the nominal depth.
pub fn card_tilt(rect: (f32, f32, f32, f32), px: f32, py: f32) -> Tilt {
    let (left, top, width, height) = rect;
    let cx = width / 2.0;
    let cy = height / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return Tilt::default();
    }
    let x = px - left;
    let y = py - top;
    Tilt {
        rotate_x: (y - cy) / cy * TILT_DEPTH_DEGREES,
        rotate_y: (cx - x) / cx * TILT_DEPTH_DEGREES,
    }
}

pub fn tilt_transform(tilt: Tilt) -> String {
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
        TILT_PERSPECTIVE_PX, tilt.rotate_x, tilt.rotate_y, TILT_LIFT_PX
    )
}

pub fn rest_transform() -> String {
    format!(
        "perspective({}px) rotateX(0) rotateY(0) translateZ(0)",
        TILT_PERSPECTIVE_PX
    )
}
