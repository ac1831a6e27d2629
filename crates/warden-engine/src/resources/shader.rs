use std::path::{Path, PathBuf};

use crate::handle::{AllocationError, Handle, Kind, RawHandle};
use crate::registry::{Construct, Resource};

use super::ProgramKind;

/// Source files a shader program was linked from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Shader program wrapper.
///
/// Compilation is the driver's business; this type only tracks the program
/// handle and, when known, where its sources live so it can be rebuilt.
#[derive(Debug)]
pub struct Shader {
    program: Handle<ProgramKind>,
    sources: Option<ShaderSources>,
}

impl Shader {
    pub fn new(sources: Option<ShaderSources>) -> Result<Self, AllocationError> {
        Ok(Self {
            program: Handle::fresh()?,
            sources,
        })
    }

    /// Wraps an already linked program.
    pub fn from_raw(raw: RawHandle, owning: bool) -> Result<Self, AllocationError> {
        Ok(Self {
            program: Handle::adopt(raw, owning)?,
            sources: None,
        })
    }

    #[inline]
    pub fn program(&self) -> &Handle<ProgramKind> {
        &self.program
    }

    #[inline]
    pub fn raw(&self) -> RawHandle {
        self.program.raw()
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        self.program.is_owning()
    }

    pub fn sources(&self) -> Option<&ShaderSources> {
        self.sources.as_ref()
    }

    pub fn vertex_path(&self) -> Option<&Path> {
        self.sources.as_ref().map(|s| s.vertex.as_path())
    }

    pub fn fragment_path(&self) -> Option<&Path> {
        self.sources.as_ref().map(|s| s.fragment.as_path())
    }

    /// Replaces the program with a newly allocated one.
    ///
    /// The new program is allocated before the old one is released, so a
    /// failed reload leaves the shader untouched.
    pub fn reload(&mut self) -> Result<(), AllocationError> {
        let program = Handle::fresh()?;
        log::debug!("reloading shader program {} as {}", self.program.raw(), program.raw());
        // Dropping the previous wrapper frees it if it was owned.
        self.program = program;
        Ok(())
    }

    pub fn transfer(&mut self) -> Self {
        Self {
            program: self.program.transfer(),
            sources: self.sources.clone(),
        }
    }

    pub fn release(&mut self) {
        self.program.release();
    }
}

impl PartialEq for Shader {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
    }
}

impl Eq for Shader {}

impl Resource for Shader {
    const KIND: &'static str = ProgramKind::LABEL;
    const DEFAULT_PREFIX: &'static str = ProgramKind::NAME_PREFIX;

    fn is_wrapper_of(&self, raw: RawHandle) -> bool {
        self.program.is_wrapper_of(raw)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self == other
    }
}

impl Construct for Shader {
    type Desc = Option<ShaderSources>;

    fn construct(sources: Option<ShaderSources>) -> Result<Self, AllocationError> {
        Self::new(sources)
    }
}
