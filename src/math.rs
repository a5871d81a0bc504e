use bevy::color::Srgba;

pub type Real = f32;

pub const FULL_TURN_DEGREES: Real = 360.0;
pub const HALF_TURN_DEGREES: Real = 180.0;

#[inline(always)]
fn lerp_channel(from: Real, to: Real, t: Real) -> Real {
    from * (1.0 - t) + to * t
}

/// Component-wise interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_color(from: Srgba, to: Srgba, t: Real) -> Srgba {
    let t = t.clamp(0.0, 1.0);
    Srgba::new(
        lerp_channel(from.red, to.red, t),
        lerp_channel(from.green, to.green, t),
        lerp_channel(from.blue, to.blue, t),
        lerp_channel(from.alpha, to.alpha, t),
    )
}

/// Component-wise mean, alpha included
#[inline]
pub fn average_color(a: Srgba, b: Srgba) -> Srgba {
    Srgba::new(
        (a.red + b.red) / 2.0,
        (a.green + b.green) / 2.0,
        (a.blue + b.blue) / 2.0,
        (a.alpha + b.alpha) / 2.0,
    )
}

#[inline(always)]
pub fn wrap_degrees(angle: Real) -> Real {
    angle.rem_euclid(FULL_TURN_DEGREES)
}
