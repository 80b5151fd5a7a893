//! The two diagnostic panels: the frustum in view space, and the NDC cube.
//!
//! Each panel looks at its content through its own orbiting camera. The query
//! point is drawn green when it passes classification and red otherwise.

use crate::clip_space::{is_inside_ndc, to_clip_space, to_ndc};
use crate::colors;
use crate::frustum::{FRUSTUM_EDGES, NDC_CUBE_CORNERS};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::probe::{FrustumProbe, PointReport};

use super::canvas::{Canvas, Rect};
use super::line_clip::clip_segment;

/// Direction from a panel's subject towards its camera.
const ORBIT_DIRECTION: Vec3 = Vec3::new(1.3, 0.8, 1.1);
/// Camera distance in multiples of the subject's radius.
const ORBIT_DISTANCE: f32 = 3.2;
const PANEL_FOV_DEGREES: f32 = 40.0;
const MARKER_HALF_SIZE: i32 = 3;

/// A rectangle of the canvas with a camera looking at a subject.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    rect: Rect,
    view_projection: Mat4,
}

impl Panel {
    /// A camera orbiting `center` at a distance that fits a sphere of `radius`.
    pub fn orbit(rect: Rect, center: Vec3, radius: f32) -> Self {
        let radius = radius.max(f32::EPSILON);
        let eye = center + ORBIT_DIRECTION.normalize() * (radius * ORBIT_DISTANCE);
        let view = Mat4::look_at_rh(eye, center, Vec3::Y);
        let aspect = rect.width.max(1) as f32 / rect.height.max(1) as f32;
        let projection = Mat4::perspective_rh_gl(
            PANEL_FOV_DEGREES.to_radians(),
            aspect,
            radius * 0.05,
            radius * (ORBIT_DISTANCE + 4.0),
        );
        Self {
            rect,
            view_projection: projection * view,
        }
    }

    /// Maps NDC x/y to a pixel inside the panel (y grows downwards).
    fn to_pixel(&self, ndc: Vec3) -> (i32, i32) {
        let x = self.rect.x as f32 + (ndc.x + 1.0) * 0.5 * self.rect.width as f32;
        let y = self.rect.y as f32 + (1.0 - ndc.y) * 0.5 * self.rect.height as f32;
        (x.round() as i32, y.round() as i32)
    }

    /// Pixel position of a point, or `None` if the panel camera cannot see it.
    pub fn project(&self, point: Vec3) -> Option<(i32, i32)> {
        let clip = to_clip_space(point, &self.view_projection);
        let (clip, _) = clip_segment(clip, clip)?;
        Some(self.to_pixel(to_ndc(clip)))
    }

    pub fn draw_line(&self, canvas: &mut Canvas, a: Vec3, b: Vec3, color: u32) {
        let ca = to_clip_space(a, &self.view_projection);
        let cb = to_clip_space(b, &self.view_projection);
        if let Some((ca, cb)) = clip_segment(ca, cb) {
            let (x0, y0) = self.to_pixel(to_ndc(ca));
            let (x1, y1) = self.to_pixel(to_ndc(cb));
            canvas.draw_line(x0, y0, x1, y1, color, self.rect);
        }
    }

    pub fn draw_axes(&self, canvas: &mut Canvas, scale: f32) {
        self.draw_line(canvas, Vec3::ZERO, Vec3::X * scale, colors::AXIS_X);
        self.draw_line(canvas, Vec3::ZERO, Vec3::Y * scale, colors::AXIS_Y);
        self.draw_line(canvas, Vec3::ZERO, Vec3::Z * scale, colors::AXIS_Z);
    }

    pub fn draw_marker(&self, canvas: &mut Canvas, point: Vec3, color: u32) {
        if let Some((x, y)) = self.project(point) {
            for py in y - MARKER_HALF_SIZE..=y + MARKER_HALF_SIZE {
                for px in x - MARKER_HALF_SIZE..=x + MARKER_HALF_SIZE {
                    if self.rect.contains(px, py) {
                        canvas.set_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

fn visibility_color(visible: bool) -> u32 {
    if visible {
        colors::INSIDE
    } else {
        colors::OUTSIDE
    }
}

/// Draws both panels for `point` and returns its classification.
///
/// Left: view space with axes, the frustum wireframe, and the point.
/// Right: NDC with unit axes, the `[-1, 1]^3` cube, and the divided point when
/// it lies in front of the camera.
pub fn render_scene(canvas: &mut Canvas, probe: &FrustumProbe, point: Vec3) -> PointReport {
    let report = probe.probe(point);
    canvas.clear(colors::BACKGROUND);

    let half_width = canvas.width() / 2;
    let height = canvas.height();

    let corners = probe.corners();
    let radius = corners.radius();
    let view_panel = Panel::orbit(Rect::new(0, 0, half_width, height), corners.centroid(), radius);
    view_panel.draw_axes(canvas, radius * 0.4);
    for (a, b) in corners.edges() {
        view_panel.draw_line(canvas, a, b, colors::WIREFRAME);
    }
    view_panel.draw_marker(canvas, point, visibility_color(report.is_visible()));

    let ndc_rect = Rect::new(half_width as i32, 0, canvas.width() - half_width, height);
    let ndc_panel = Panel::orbit(ndc_rect, Vec3::ZERO, 3.0f32.sqrt());
    ndc_panel.draw_axes(canvas, 1.0);
    for (a, b) in FRUSTUM_EDGES {
        ndc_panel.draw_line(canvas, NDC_CUBE_CORNERS[a], NDC_CUBE_CORNERS[b], colors::WIREFRAME);
    }
    if let Some(ndc) = report.ndc {
        ndc_panel.draw_marker(canvas, ndc, visibility_color(is_inside_ndc(ndc)));
    }

    let divider = Rect::new(half_width as i32, 0, 1, height);
    canvas.fill_rect(divider, colors::DIVIDER);

    log::trace!("rendered scene for {point:?}: {}", report.outcode);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionParams;

    fn count(canvas: &Canvas, rect: Rect, color: u32) -> usize {
        let mut n = 0;
        for y in rect.y..rect.y + rect.height as i32 {
            for x in rect.x..rect.x + rect.width as i32 {
                if canvas.get_pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn panel_centers_its_subject() {
        let panel = Panel::orbit(Rect::new(0, 0, 200, 100), Vec3::ZERO, 1.0);
        let (x, y) = panel.project(Vec3::ZERO).unwrap();
        assert!((x - 100).abs() <= 1 && (y - 50).abs() <= 1, "({x}, {y})");
    }

    #[test]
    fn panel_cannot_see_behind_its_camera() {
        let panel = Panel::orbit(Rect::new(0, 0, 200, 100), Vec3::ZERO, 1.0);
        let behind = ORBIT_DIRECTION.normalize() * 10.0;
        assert_eq!(panel.project(behind), None);
    }

    #[test]
    fn visible_point_is_drawn_green_in_both_panels() {
        let probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let mut canvas = Canvas::new(400, 200);
        let report = render_scene(&mut canvas, &probe, Vec3::new(0.0, 0.0, -20.0));
        assert!(report.is_visible());

        let left = Rect::new(0, 0, 200, 200);
        let right = Rect::new(200, 0, 200, 200);
        assert!(count(&canvas, left, colors::INSIDE) > 0);
        assert!(count(&canvas, right, colors::INSIDE) > 0);
        assert_eq!(count(&canvas, left, colors::OUTSIDE), 0);
        assert!(count(&canvas, left, colors::WIREFRAME) > 0);
        assert!(count(&canvas, right, colors::WIREFRAME) > 0);
    }

    #[test]
    fn point_behind_camera_only_appears_in_view_panel() {
        let probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let mut canvas = Canvas::new(400, 200);
        let report = render_scene(&mut canvas, &probe, Vec3::new(0.0, 0.0, 5.0));
        assert!(report.outcode.is_behind());

        let left = Rect::new(0, 0, 200, 200);
        let right = Rect::new(200, 0, 200, 200);
        assert!(count(&canvas, left, colors::OUTSIDE) > 0);
        assert_eq!(count(&canvas, right, colors::OUTSIDE), 0);
        assert_eq!(count(&canvas, right, colors::INSIDE), 0);
    }
}
