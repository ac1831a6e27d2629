use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::handle::{AllocationError, RawHandle};
use crate::registry::{Construct, Resource};

const PITCH_LIMIT: f32 = 89.0;

/// Process-unique camera identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CameraId(u64);

impl CameraId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camera#{}", self.0)
    }
}

/// Initial camera state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraDesc {
    pub position: [f32; 3],
    /// Degrees.
    pub yaw: f32,
    /// Degrees; clamped to ±89.
    pub pitch: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            yaw: -90.0,
            pitch: 0.0,
            move_speed: 2.5,
            turn_speed: 0.1,
        }
    }
}

/// Free-look camera.
///
/// Pure data: no native handle backs it, so it never wraps one. Identity is
/// the [`CameraId`] assigned at construction; a clone is a new camera.
#[derive(Debug)]
pub struct Camera {
    id: CameraId,
    position: [f32; 3],
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    turn_speed: f32,
}

impl Camera {
    pub fn new(desc: CameraDesc) -> Self {
        Self {
            id: CameraId::next(),
            position: desc.position,
            yaw: desc.yaw,
            pitch: desc.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            move_speed: desc.move_speed,
            turn_speed: desc.turn_speed,
        }
    }

    #[inline]
    pub fn id(&self) -> CameraId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn turn_speed(&self) -> f32 {
        self.turn_speed
    }

    pub fn set_position(&mut self, position: [f32; 3]) {
        self.position = position;
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> [f32; 3] {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        [yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()]
    }

    /// Applies a mouse delta scaled by the turn speed.
    pub fn turn(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.turn_speed;
        self.pitch = (self.pitch + dy * self.turn_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves along the view direction, `dt` seconds at the move speed.
    pub fn advance(&mut self, dt: f32) {
        let front = self.front();
        let step = self.move_speed * dt;
        for (p, f) in self.position.iter_mut().zip(front) {
            *p += f * step;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraDesc::default())
    }
}

impl Clone for Camera {
    fn clone(&self) -> Self {
        Self {
            id: CameraId::next(),
            ..*self
        }
    }
}

impl PartialEq for Camera {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Camera {}

impl Resource for Camera {
    const KIND: &'static str = "camera";
    const DEFAULT_PREFIX: &'static str = "generated-camera-";

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        let _ = raw;
        false
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl Construct for Camera {
    type Desc = CameraDesc;

    fn construct(desc: CameraDesc) -> Result<Self, AllocationError> {
        Ok(Self::new(desc))
    }
}
