use glam::{Mat4, Vec3};
use strum::EnumIter;

const WORLD_UP: Vec3 = Vec3::Y;
/// Units per second
const MOVEMENT_SPEED: f64 = 2.5;
/// Degrees per pixel of cursor travel
const MOUSE_SENSITIVITY: f64 = 0.1;
/// Keeps the view from flipping over at the poles
const PITCH_LIMIT: f64 = 89.0;
const MIN_FOV: f64 = 1.0;
const MAX_FOV: f64 = 45.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// A free-flying first person camera.
///
/// `front` and `up` are derived from yaw and pitch and recomputed by every mutator so they
/// always form an orthonormal pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    /// Degrees
    yaw: f64,
    /// Degrees
    pitch: f64,
    /// Vertical, in degrees
    field_of_view: f64,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::NEG_Z,
            up: WORLD_UP,
            yaw: -90.0,
            pitch: 0.0,
            field_of_view: 45.0,
        };
        camera.update_basis();
        camera
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// Right handed look-at from the current position along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection for the current field of view.
    pub fn projection_matrix(&self, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            (self.field_of_view as f32).to_radians(),
            aspect_ratio,
            near,
            far,
        )
    }

    pub fn process_keyboard(&mut self, movement: Movement, delta_time: f64) {
        let velocity = (MOVEMENT_SPEED * delta_time) as f32;
        let right = self.front.cross(self.up).normalize();
        match movement {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= right * velocity,
            Movement::Right => self.position += right * velocity,
            Movement::Up => self.position += self.up * velocity,
            Movement::Down => self.position -= self.up * velocity,
        }
        self.update_basis();
    }

    /// Turns the view by cursor offsets in pixels.
    pub fn process_mouse(&mut self, x_offset: f64, y_offset: f64) {
        self.yaw += x_offset * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch + y_offset * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Zooms by narrowing the field of view.
    pub fn process_scroll(&mut self, y_offset: f64) {
        self.field_of_view = (self.field_of_view - y_offset).clamp(MIN_FOV, MAX_FOV);
        self.update_basis();
    }

    /// Restores the state the camera was constructed with.
    pub fn reset_view(&mut self) {
        *self = Self::default();
    }

    fn update_basis(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vec3::new(
            (yaw.cos() * pitch.cos()) as f32,
            pitch.sin() as f32,
            (yaw.sin() * pitch.cos()) as f32,
        )
        .normalize();
        let right = self.front.cross(WORLD_UP).normalize();
        self.up = right.cross(self.front).normalize();
    }
}
