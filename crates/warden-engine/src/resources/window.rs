use bitflags::bitflags;

use crate::handle::{AllocationError, Handle, Kind, RawHandle};
use crate::registry::{Construct, Resource};

use super::WindowKind;

bitflags! {
    /// Window behavior switches.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct WindowTraits: u8 {
        const RESIZABLE   = 1 << 0;
        const DECORATED   = 1 << 1;
        const FULLSCREEN  = 1 << 2;
        const VSYNC       = 1 << 3;
        const TRANSPARENT = 1 << 4;
    }
}

impl Default for WindowTraits {
    fn default() -> Self {
        Self::RESIZABLE | Self::DECORATED | Self::VSYNC
    }
}

/// Requested window properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub traits: WindowTraits,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            traits: WindowTraits::default(),
        }
    }

    pub fn with_traits(mut self, traits: WindowTraits) -> Self {
        self.traits = traits;
        self
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::new("warden", 1280, 720)
    }
}

/// Native window wrapper.
///
/// Windows are torn down after every other resource kind by
/// [`ResourceStore`](crate::store::ResourceStore), since other native
/// objects may depend on the context they carry.
#[derive(Debug)]
pub struct Window {
    handle: Handle<WindowKind>,
    spec: WindowSpec,
}

impl Window {
    pub fn new(spec: WindowSpec) -> Result<Self, AllocationError> {
        log::debug!("opening window {:?} ({}x{})", spec.title, spec.width, spec.height);
        Ok(Self {
            handle: Handle::fresh()?,
            spec,
        })
    }

    /// Wraps a window created elsewhere.
    pub fn from_raw(raw: RawHandle, spec: WindowSpec, owning: bool) -> Result<Self, AllocationError> {
        Ok(Self {
            handle: Handle::adopt(raw, owning)?,
            spec,
        })
    }

    #[inline]
    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        self.handle.is_owning()
    }

    #[inline]
    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn size(&self) -> (u32, u32) {
        (self.spec.width, self.spec.height)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.spec.title = title.into();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.spec.width = width;
        self.spec.height = height;
    }

    pub fn transfer(&mut self) -> Self {
        Self {
            handle: self.handle.transfer(),
            spec: self.spec.clone(),
        }
    }

    pub fn release(&mut self) {
        self.handle.release();
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Window {}

impl Resource for Window {
    const KIND: &'static str = WindowKind::LABEL;
    const DEFAULT_PREFIX: &'static str = WindowKind::NAME_PREFIX;

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        self.handle.is_wrapper_of(raw)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl Construct for Window {
    type Desc = WindowSpec;

    fn construct(spec: WindowSpec) -> Result<Self, AllocationError> {
        Self::new(spec)
    }
}
