//! Rigid-body patrol path shared by the whole formation
//!
//! Starting at a cell's home slot the loop goes:
//! - right along the top edge for `line_width` units
//! - down one unit
//! - left back along the lower edge
//! - down one unit
//!
//! One lap is `2 * line_width + 2` long and lowers the formation by 2.

use glam::Vec2;

/// Length of one full lap for the given line width
#[inline]
pub fn lap_length(line_width: f32) -> f32 {
    2.0 * line_width + 2.0
}

/// Offset from the home slot after travelling `progress` along the loop
pub fn patrol_offset(progress: f32, line_width: f32) -> Vec2 {
    let period = lap_length(line_width);
    let local = progress.rem_euclid(period);
    // Derived from `local` so both agree right at a lap boundary
    let lap = ((progress - local) / period).round();
    let drop = -2.0 * lap;

    if local <= line_width {
        Vec2::new(local, drop)
    } else if local <= line_width + 1.0 {
        Vec2::new(line_width, drop - (local - line_width))
    } else if local <= 2.0 * line_width + 1.0 {
        Vec2::new(2.0 * line_width + 1.0 - local, drop - 1.0)
    } else {
        Vec2::new(0.0, drop - (local - 2.0 * line_width))
    }
}
