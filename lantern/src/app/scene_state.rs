use glam::Vec3;
use std::collections::HashSet;

use super::input::Key;
use crate::{
    camera::Camera,
    lights::{GlobalLight, PointLight, SpotLight},
};

pub const POINT_LIGHT_COUNT: usize = 4;

/// Shared by the global and point lights, the light markers are drawn in it too
pub const WARM_LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.925, 0.5568);

const GLOBAL_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
/// Point lights are stacked on top of each other at this spacing
const POINT_LIGHT_SHIFT: Vec3 = Vec3::new(0.0, 2.0, 0.0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LightToggles {
    pub global: bool,
    pub point: bool,
    pub spot: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        Self {
            global: true,
            point: true,
            spot: true,
        }
    }
}

/// Everything the frame loop mutates from input and reads when rendering.
pub struct SceneState {
    pub camera: Camera,
    pub global_light: GlobalLight,
    pub point_lights: [PointLight; POINT_LIGHT_COUNT],
    pub spot_light: SpotLight,
    pub toggles: LightToggles,
    pub held_keys: HashSet<Key>,
    /// Last cursor position, `None` until the first event after gaining focus
    pub last_cursor: Option<(f64, f64)>,
    pub focused: bool,
    pub invert_mouse_y: bool,
    /// Seconds since start
    pub time: f32,
    pub exit_requested: bool,
}

impl Default for SceneState {
    fn default() -> Self {
        let mut point_lights = [PointLight::default(); POINT_LIGHT_COUNT];
        for (i, light) in point_lights.iter_mut().enumerate() {
            light.color = WARM_LIGHT_COLOR;
            light.position = POINT_LIGHT_SHIFT * (i + 1) as f32;
        }

        Self {
            camera: Camera::default(),
            global_light: GlobalLight {
                color: WARM_LIGHT_COLOR,
                position: GLOBAL_LIGHT_POSITION,
                ..Default::default()
            },
            point_lights,
            spot_light: SpotLight::default(),
            toggles: LightToggles::default(),
            held_keys: HashSet::new(),
            last_cursor: None,
            focused: true,
            invert_mouse_y: false,
            time: 0.0,
            exit_requested: false,
        }
    }
}

impl SceneState {
    pub fn new(invert_mouse_y: bool) -> Self {
        Self {
            invert_mouse_y,
            ..Default::default()
        }
    }

    /// Global light as it should be pushed this frame, black when toggled off.
    pub fn active_global_light(&self) -> GlobalLight {
        let mut light = self.global_light;
        if !self.toggles.global {
            light.color = Vec3::ZERO;
        }
        light
    }

    pub fn active_point_light(&self, index: usize) -> PointLight {
        let mut light = self.point_lights[index];
        if !self.toggles.point {
            light.color = Vec3::ZERO;
        }
        light
    }

    /// Spot light attached to the camera like a flashlight.
    pub fn active_spot_light(&self) -> SpotLight {
        let mut light = self.spot_light;
        light.position = self.camera.position();
        light.direction = self.camera.front();
        if !self.toggles.spot {
            light.color = Vec3::ZERO;
        }
        light
    }
}
